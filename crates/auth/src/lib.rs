//! `sellerdesk-auth` — authorization boundary for the seller dashboard.
//!
//! This crate is intentionally decoupled from HTTP and storage: the role
//! table and permission engine are pure, the resolver speaks to the
//! identity provider only through the [`SessionSource`] trait, and the
//! grant ledger is an injected in-memory service, not a global.

pub mod directory;
pub mod engine;
pub mod ledger;
pub mod principal;
pub mod resolver;
pub mod roles;

pub use directory::PrincipalDirectory;
pub use engine::{check_exact_role, check_permission};
pub use ledger::{GrantLedger, GrantRecord};
pub use principal::Principal;
pub use resolver::{
    ProviderSession, ResolveError, SessionSource, SessionState, impersonation_principal, resolve,
};
pub use roles::Role;
