//! Directory of principals known to this process.
//!
//! Backs the administrative review screen: who has signed in (or been
//! impersonated), so their grants can be listed next to them. This is a
//! disposable read model, not an account store; the identity provider
//! owns accounts.

use std::collections::BTreeMap;
use std::sync::RwLock;

use sellerdesk_core::Identity;

use crate::principal::Principal;

/// In-memory principal directory, ordered by identity.
#[derive(Debug, Default)]
pub struct PrincipalDirectory {
    inner: RwLock<BTreeMap<Identity, Principal>>,
}

impl PrincipalDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or refresh) a principal. The stored entry is replaced
    /// wholesale, matching how sessions replace principals.
    pub fn register(&self, principal: &Principal) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(principal.identity().clone(), principal.clone());
        }
    }

    pub fn get(&self, identity: &Identity) -> Option<Principal> {
        self.inner.read().ok()?.get(identity).cloned()
    }

    /// All known principals, ordered by identity.
    pub fn list(&self) -> Vec<Principal> {
        match self.inner.read() {
            Ok(map) => map.values().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }
}
