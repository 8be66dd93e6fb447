//! Menu visibility rules.

use serde::Serialize;

use sellerdesk_auth::{Principal, Role, check_exact_role, check_permission};

/// A sidebar/menu entry with its role gates.
///
/// `min_role` is the usual ordinal floor. `max_role` pins an entry to one
/// exact tier: the trial tutorial is a Starter-only entry that disappears
/// the moment the account upgrades, which a floor alone cannot express.
#[derive(Debug, Clone, Serialize)]
pub struct MenuEntry {
    pub title: String,
    pub path: String,
    pub min_role: Role,
    pub max_role: Option<Role>,
}

impl MenuEntry {
    pub fn new(title: impl Into<String>, path: impl Into<String>, min_role: Role) -> Self {
        Self {
            title: title.into(),
            path: path.into(),
            min_role,
            max_role: None,
        }
    }

    /// Pin this entry to exactly `role`.
    pub fn only_for(mut self, role: Role) -> Self {
        self.max_role = Some(role);
        self
    }

    /// Should this entry render for the given viewer? Evaluated on every
    /// render pass, like every other access decision.
    pub fn visible_to(&self, principal: Option<&Principal>) -> bool {
        if !check_permission(principal, self.min_role) {
            return false;
        }
        match self.max_role {
            Some(exact) => check_exact_role(principal, exact),
            None => true,
        }
    }
}

/// Filter a menu down to what the viewer may see.
pub fn visible_entries<'a>(
    entries: &'a [MenuEntry],
    principal: Option<&Principal>,
) -> Vec<&'a MenuEntry> {
    entries.iter().filter(|e| e.visible_to(principal)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use sellerdesk_core::Identity;

    fn principal(role: Role) -> Principal {
        Principal::new(Identity::parse("m@x.io").unwrap(), "M", role)
    }

    fn menu() -> Vec<MenuEntry> {
        vec![
            MenuEntry::new("Curriculum", "/education", Role::Starter),
            MenuEntry::new("Trial Tutorial", "/education/trial", Role::Starter)
                .only_for(Role::Starter),
            MenuEntry::new("Brand Reports", "/analysis/brand", Role::Brand),
            MenuEntry::new("Member Management", "/admin", Role::Manager),
        ]
    }

    #[test]
    fn signed_out_sees_nothing() {
        assert!(visible_entries(&menu(), None).is_empty());
    }

    #[test]
    fn trial_entry_is_starter_only() {
        let menu = menu();

        let starter = principal(Role::Starter);
        let titles: Vec<_> = visible_entries(&menu, Some(&starter))
            .iter()
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(titles, ["Curriculum", "Trial Tutorial"]);

        // Upgrading hides the trial entry even though the floor still passes.
        let seller = principal(Role::Seller);
        let titles: Vec<_> = visible_entries(&menu, Some(&seller))
            .iter()
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(titles, ["Curriculum"]);
    }

    #[test]
    fn staff_see_the_full_floor_gated_menu() {
        let menu = menu();
        let master = principal(Role::Master);
        let titles: Vec<_> = visible_entries(&menu, Some(&master))
            .iter()
            .map(|e| e.title.as_str())
            .collect();
        // Everything except the Starter-pinned trial entry.
        assert_eq!(titles, ["Curriculum", "Brand Reports", "Member Management"]);
    }
}
