//! Permission engine: role-ordinal access decisions.
//!
//! Both checks back per-menu-item visibility across every rendered view, so
//! they are pure ordinal comparisons with no I/O or side effects. Callers
//! re-evaluate on every render instead of caching a decision across
//! principal changes.

use crate::principal::Principal;
use crate::roles::Role;

/// Minimum-role check: does the principal's role rank at or above `required`?
///
/// An absent principal (signed out, or resolution still in flight) is
/// denied for every required role, including the lowest.
pub fn check_permission(principal: Option<&Principal>, required: Role) -> bool {
    match principal {
        Some(p) => p.role().ordinal() >= required.ordinal(),
        None => false,
    }
}

/// Exact-role check, for features scoped to a single tier.
///
/// Not interchangeable with [`check_permission`]: the trial tutorial is
/// shown to Starter accounts only and disappears on upgrade, which a `>=`
/// comparison cannot express.
pub fn check_exact_role(principal: Option<&Principal>, role: Role) -> bool {
    principal.is_some_and(|p| p.role() == role)
}

#[cfg(test)]
mod tests {
    use super::*;

    use sellerdesk_core::Identity;

    fn principal(role: Role) -> Principal {
        Principal::new(Identity::parse("p@test.io").unwrap(), "P", role)
    }

    #[test]
    fn higher_role_passes_lower_requirement_not_vice_versa() {
        for (i, lower) in Role::ALL.iter().enumerate() {
            for higher in &Role::ALL[i + 1..] {
                assert!(check_permission(Some(&principal(*higher)), *lower));
                assert!(!check_permission(Some(&principal(*lower)), *higher));
            }
        }
    }

    #[test]
    fn role_satisfies_itself() {
        for role in Role::ALL {
            assert!(check_permission(Some(&principal(role)), role));
        }
    }

    #[test]
    fn absent_principal_is_denied_everything() {
        for role in Role::ALL {
            assert!(!check_permission(None, role));
            assert!(!check_exact_role(None, role));
        }
    }

    #[test]
    fn exact_role_hides_trial_features_from_upgraded_users() {
        let starter = principal(Role::Starter);
        let seller = principal(Role::Seller);

        assert!(check_exact_role(Some(&starter), Role::Starter));
        assert!(!check_exact_role(Some(&seller), Role::Starter));
        // The ordinal check would get this wrong:
        assert!(check_permission(Some(&seller), Role::Starter));
    }
}
