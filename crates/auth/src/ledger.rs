//! The feature-grant ledger.
//!
//! Grants are explicit, feature-scoped unlocks keyed by principal identity,
//! independent of role. The ledger is an injected service constructed once
//! per process and shared by `Arc`, never a global.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::Serialize;

use sellerdesk_core::{FeatureCode, Identity};

use crate::engine::check_permission;
use crate::principal::Principal;
use crate::roles::Role;

/// One granted feature, with the moment it was first granted (for the
/// administrative review table).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GrantRecord {
    pub code: FeatureCode,
    pub granted_at: DateTime<Utc>,
}

/// In-memory grant ledger.
///
/// # Invariants
/// - Granting is idempotent: a code already held keeps its original
///   `granted_at` and the set does not grow.
/// - A `grant` that has returned is visible to every `verify_access` that
///   starts afterwards (all access goes through one `RwLock`).
/// - A poisoned lock reads as an empty ledger, so failures deny rather
///   than allow.
#[derive(Debug, Default)]
pub struct GrantLedger {
    inner: RwLock<HashMap<Identity, BTreeMap<FeatureCode, DateTime<Utc>>>>,
}

impl GrantLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unlock `code` for `identity`. Returns `true` when the grant is new,
    /// `false` when it was already held (a no-op, never an error).
    pub fn grant(&self, identity: &Identity, code: &FeatureCode) -> bool {
        let Ok(mut map) = self.inner.write() else {
            return false;
        };
        let grants = map.entry(identity.clone()).or_default();
        if grants.contains_key(code) {
            return false;
        }
        grants.insert(code.clone(), Utc::now());
        tracing::info!(identity = %identity, code = %code, "feature granted");
        true
    }

    /// Remove a grant. Returns whether anything was removed; the removal is
    /// visible to the next `verify_access` immediately (nothing is cached).
    pub fn revoke(&self, identity: &Identity, code: &FeatureCode) -> bool {
        let Ok(mut map) = self.inner.write() else {
            return false;
        };
        let removed = map
            .get_mut(identity)
            .is_some_and(|grants| grants.remove(code).is_some());
        if removed {
            tracing::info!(identity = %identity, code = %code, "feature revoked");
        }
        removed
    }

    /// Is `code` unlocked for this principal?
    ///
    /// True on an explicit grant, or when the principal holds the top
    /// staff role; top-level admins see every gated feature without one.
    pub fn verify_access(&self, principal: Option<&Principal>, code: &FeatureCode) -> bool {
        let Some(p) = principal else {
            return false;
        };
        if self.holds(p.identity(), code) {
            return true;
        }
        check_permission(principal, Role::top_admin())
    }

    fn holds(&self, identity: &Identity, code: &FeatureCode) -> bool {
        self.inner
            .read()
            .is_ok_and(|map| map.get(identity).is_some_and(|g| g.contains_key(code)))
    }

    /// Grants held by one identity, for display/audit.
    pub fn grants_for(&self, identity: &Identity) -> Vec<GrantRecord> {
        let Ok(map) = self.inner.read() else {
            return Vec::new();
        };
        map.get(identity)
            .map(|grants| {
                grants
                    .iter()
                    .map(|(code, granted_at)| GrantRecord {
                        code: code.clone(),
                        granted_at: *granted_at,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}
