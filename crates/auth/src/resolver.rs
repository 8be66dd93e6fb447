//! Principal resolution from the external identity provider.
//!
//! Resolution runs once per session change (sign-in, sign-out, token
//! refresh) and replaces the active [`Principal`] wholesale; callers never
//! observe a partially updated one. The provider itself is reached only
//! through [`SessionSource`], so tests and the debug role switch can stand
//! in for it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use sellerdesk_core::{DomainError, Identity};

use crate::principal::Principal;
use crate::roles::Role;

// ─────────────────────────────────────────────────────────────────────────────
// Provider boundary
// ─────────────────────────────────────────────────────────────────────────────

/// A session as the identity provider reports it: the verified subject
/// address plus whatever custom attributes the operator attached
/// (`role`, `nickname`, ...). Attributes arrive as arbitrary JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSession {
    pub subject_email: String,
    #[serde(default)]
    pub attributes: serde_json::Value,
}

impl ProviderSession {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).and_then(|v| v.as_str())
    }
}

/// Source of the current provider session.
///
/// `Ok(None)` means legitimately signed out. `Err` means the provider was
/// unreachable or misbehaving: a different outcome, surfaced separately so
/// the caller can show a retry state instead of bouncing to sign-in.
pub trait SessionSource {
    fn load(&self) -> Result<Option<ProviderSession>, anyhow::Error>;
}

/// Resolution failure, distinct from "not signed in".
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("identity provider unavailable: {0}")]
    Provider(#[source] anyhow::Error),

    /// The provider returned a session whose subject is not a usable
    /// identity. Treated as a fault, not a sign-out.
    #[error("provider session rejected: {0}")]
    BadSubject(#[from] DomainError),
}

// ─────────────────────────────────────────────────────────────────────────────
// Resolution
// ─────────────────────────────────────────────────────────────────────────────

/// Resolve the current session into a principal, or `None` when signed out.
///
/// Attribute handling mirrors what operators actually configure:
/// - missing `role` → the lowest tier;
/// - unrecognized `role` string → the lowest tier, with a warning (a
///   metadata typo must degrade, not lock the account out);
/// - missing `nickname` → the local part of the subject address.
pub fn resolve(source: &dyn SessionSource) -> Result<Option<Principal>, ResolveError> {
    let Some(session) = source.load().map_err(ResolveError::Provider)? else {
        return Ok(None);
    };
    resolve_provider_session(&session).map(Some)
}

fn resolve_provider_session(session: &ProviderSession) -> Result<Principal, ResolveError> {
    let identity = Identity::parse(&session.subject_email)?;

    let role = match session.attribute("role") {
        None => Role::lowest(),
        Some(raw) => raw.parse::<Role>().unwrap_or_else(|_| {
            tracing::warn!(subject = %identity, role = raw, "unrecognized provider role, defaulting");
            Role::lowest()
        }),
    };

    let display_name = session
        .attribute("nickname")
        .map(str::to_string)
        .unwrap_or_else(|| identity.local_part().to_string());

    Ok(Principal::new(identity, display_name, role))
}

// ─────────────────────────────────────────────────────────────────────────────
// Session state
// ─────────────────────────────────────────────────────────────────────────────

/// Where the session currently stands.
///
/// `Resolving` is its own state: while the provider round-trip is in
/// flight the user is neither authenticated nor unauthenticated, and
/// protected-route decisions must wait for it to settle rather than
/// redirect on a half-resolved session.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    #[default]
    Resolving,
    SignedOut,
    SignedIn(Principal),
}

impl SessionState {
    /// The active principal, if any. `Resolving` yields `None`, which every
    /// permission check treats as deny.
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            SessionState::SignedIn(p) => Some(p),
            _ => None,
        }
    }

    pub fn is_settled(&self) -> bool {
        !matches!(self, SessionState::Resolving)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Debug role switch
// ─────────────────────────────────────────────────────────────────────────────

/// Synthetic principal for the debug/impersonation switch: one fixed
/// identity per role, mirroring the demo accounts of the dashboard.
pub fn impersonation_principal(role: Role) -> Principal {
    let (email, nickname) = match role {
        Role::Starter => ("starter@demo.test", "Newbie"),
        Role::Seller => ("seller@demo.test", "ProSeller"),
        Role::Brand => ("brand@demo.test", "BigBrand"),
        Role::Manager => ("manager@demo.test", "Manager"),
        Role::Master => ("master@demo.test", "Master"),
    };
    // The table is static and email-shaped; parsing cannot fail.
    Principal::new(Identity::parse(email).expect("static identity"), nickname, role)
}
