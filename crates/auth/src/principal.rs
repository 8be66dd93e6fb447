//! The resolved actor behind a session.

use serde::Serialize;

use sellerdesk_core::Identity;

use crate::roles::Role;

/// A fully resolved principal for access decisions.
///
/// # Invariants
/// - `is_admin` is derived from the role at construction and cannot be set
///   independently; there is no way to build a Starter principal with the
///   admin flag raised.
/// - A principal is replaced wholesale on every session change. Nothing in
///   this crate mutates one in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    identity: Identity,
    display_name: String,
    role: Role,
    is_admin: bool,
}

impl Principal {
    pub fn new(identity: Identity, display_name: impl Into<String>, role: Role) -> Self {
        Self {
            identity,
            display_name: display_name.into(),
            role,
            is_admin: role.is_admin(),
        }
    }

    /// The same identity and display name under a different role, with the
    /// admin flag re-derived. Used by the debug role switch.
    pub fn with_role(&self, role: Role) -> Self {
        Self::new(self.identity.clone(), self.display_name.clone(), role)
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }
}
