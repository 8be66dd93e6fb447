//! The fixed role table.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use sellerdesk_core::DomainError;

/// Membership tier of a dashboard user.
///
/// The set is closed and ordered: every role carries an integer ordinal,
/// strictly increasing with seniority, and all `>=`-style access checks
/// compare ordinals. Staff tiers start at 8, leaving room below for new
/// member tiers without renumbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Entry tier: fresh sign-ups and trial users.
    Starter,
    /// Paying individual seller.
    Seller,
    /// Brand / agency client.
    Brand,
    /// Staff: community and account management.
    Manager,
    /// Staff: full control, satisfies every gated feature.
    Master,
}

impl Role {
    /// All roles, ascending by seniority.
    pub const ALL: [Role; 5] = [
        Role::Starter,
        Role::Seller,
        Role::Brand,
        Role::Manager,
        Role::Master,
    ];

    /// Seniority ordinal. Stable values; never reordered or reused.
    pub const fn ordinal(self) -> u8 {
        match self {
            Role::Starter => 1,
            Role::Seller => 2,
            Role::Brand => 3,
            Role::Manager => 8,
            Role::Master => 9,
        }
    }

    /// Whether this role is one of the designated staff roles.
    pub const fn is_admin(self) -> bool {
        matches!(self, Role::Manager | Role::Master)
    }

    /// The role that satisfies every gated feature without an explicit grant.
    pub const fn top_admin() -> Role {
        Role::Master
    }

    /// Default tier for sessions whose provider metadata carries no role.
    pub const fn lowest() -> Role {
        Role::Starter
    }

    /// Provider-side attribute value for this role.
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Starter => "STARTER",
            Role::Seller => "SELLER",
            Role::Brand => "BRAND",
            Role::Manager => "MANAGER",
            Role::Master => "MASTER",
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::lowest()
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown role '{s}'")))
    }
}
