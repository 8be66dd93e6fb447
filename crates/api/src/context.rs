//! The access context: session state plus the injected services behind it.

use std::collections::BTreeSet;
use std::sync::{Arc, RwLock};

use sellerdesk_auth::{
    GrantLedger, GrantRecord, Principal, PrincipalDirectory, ResolveError, Role, SessionSource,
    SessionState, check_exact_role, check_permission, impersonation_principal, resolve,
};
use sellerdesk_community::{PostBoard, PostDraft, PostId, PostPatch, check_access};
use sellerdesk_core::{DomainError, DomainResult, FeatureCode, Identity};

/// One process-wide access context, shared by reference with every view.
///
/// Holds the resolved session and the three mutable services (ledger,
/// directory, board) as injected `Arc`s: constructed once, passed around,
/// never reached through a global.
pub struct AccessContext {
    session: RwLock<SessionState>,
    ledger: Arc<GrantLedger>,
    directory: Arc<PrincipalDirectory>,
    board: Arc<PostBoard>,
    /// Codes a signed-in user may redeem for themselves by typing them in.
    redeemable: BTreeSet<FeatureCode>,
}

impl AccessContext {
    pub fn new(
        ledger: Arc<GrantLedger>,
        directory: Arc<PrincipalDirectory>,
        board: Arc<PostBoard>,
    ) -> Self {
        Self {
            session: RwLock::new(SessionState::Resolving),
            ledger,
            directory,
            board,
            redeemable: BTreeSet::from([FeatureCode::premium_report()]),
        }
    }

    /// Fresh context with its own empty services. Convenience for wiring
    /// and tests; production callers may prefer [`AccessContext::new`] to
    /// share services with other consumers.
    pub fn bootstrap() -> Self {
        Self::new(
            Arc::new(GrantLedger::new()),
            Arc::new(PrincipalDirectory::new()),
            Arc::new(PostBoard::new()),
        )
    }

    pub fn ledger(&self) -> &Arc<GrantLedger> {
        &self.ledger
    }

    pub fn board(&self) -> &Arc<PostBoard> {
        &self.board
    }

    // ─────────────────────────────────────────────────────────────────────
    // Session control
    // ─────────────────────────────────────────────────────────────────────

    /// Re-resolve the session from the identity provider, replacing the
    /// active principal atomically.
    ///
    /// On a provider fault the stored state becomes `SignedOut` (a stale
    /// principal is never kept across an error) and the fault is returned
    /// so the caller can show a retry state instead of a sign-in bounce.
    pub fn sign_in(&self, source: &dyn SessionSource) -> Result<Option<Principal>, ResolveError> {
        self.replace_session(SessionState::Resolving);

        match resolve(source) {
            Ok(Some(principal)) => {
                self.directory.register(&principal);
                tracing::info!(identity = %principal.identity(), role = %principal.role(), "session resolved");
                self.replace_session(SessionState::SignedIn(principal.clone()));
                Ok(Some(principal))
            }
            Ok(None) => {
                self.replace_session(SessionState::SignedOut);
                Ok(None)
            }
            Err(e) => {
                tracing::warn!(error = %e, "session resolution failed");
                self.replace_session(SessionState::SignedOut);
                Err(e)
            }
        }
    }

    pub fn sign_out(&self) {
        tracing::info!("signed out");
        self.replace_session(SessionState::SignedOut);
    }

    /// Debug role switch: become the synthetic principal for `role`.
    pub fn impersonate(&self, role: Role) -> Principal {
        let principal = impersonation_principal(role);
        self.directory.register(&principal);
        tracing::info!(role = %role, "impersonating");
        self.replace_session(SessionState::SignedIn(principal.clone()));
        principal
    }

    fn replace_session(&self, next: SessionState) {
        if let Ok(mut session) = self.session.write() {
            *session = next;
        }
    }

    pub fn session_state(&self) -> SessionState {
        self.session
            .read()
            .map(|s| s.clone())
            .unwrap_or(SessionState::SignedOut)
    }

    pub fn current_principal(&self) -> Option<Principal> {
        self.session_state().principal().cloned()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Decisions
    // ─────────────────────────────────────────────────────────────────────

    /// Minimum-role check for the active session. While resolution is in
    /// flight there is no principal, so this denies; route guards should
    /// consult [`AccessContext::session_state`] before redirecting.
    pub fn check_permission(&self, required: Role) -> bool {
        check_permission(self.current_principal().as_ref(), required)
    }

    pub fn check_exact_role(&self, role: Role) -> bool {
        check_exact_role(self.current_principal().as_ref(), role)
    }

    /// Unlock a feature for an identity (administrative screen). Malformed
    /// input is rejected here, before anything reaches the ledger.
    pub fn grant_access(&self, identity: &str, feature: &str) -> DomainResult<()> {
        let identity = Identity::parse(identity)?;
        let code = FeatureCode::parse(feature)?;
        self.ledger.grant(&identity, &code);
        Ok(())
    }

    /// Remove a previously granted feature. Takes effect immediately.
    pub fn revoke_access(&self, identity: &str, feature: &str) -> DomainResult<bool> {
        let identity = Identity::parse(identity)?;
        let code = FeatureCode::parse(feature)?;
        Ok(self.ledger.revoke(&identity, &code))
    }

    /// Is the named feature unlocked for the active session?
    ///
    /// A malformed feature name cannot have been granted, so it simply
    /// denies rather than erroring; checks never throw.
    pub fn verify_access(&self, feature: &str) -> bool {
        let Ok(code) = FeatureCode::parse(feature) else {
            tracing::debug!(feature, "verify_access on malformed feature code");
            return false;
        };
        self.ledger
            .verify_access(self.current_principal().as_ref(), &code)
    }

    /// Self-service redemption: a signed-in user typing a recognized code
    /// unlocks it for themselves. Unknown codes and signed-out sessions
    /// are quiet no-ops.
    pub fn redeem_code(&self, code: &str) -> bool {
        let Some(principal) = self.current_principal() else {
            return false;
        };
        let Ok(code) = FeatureCode::parse(code) else {
            return false;
        };
        if !self.redeemable.contains(&code) {
            tracing::debug!(code = %code, "redemption attempt for unknown code");
            return false;
        }
        self.ledger.grant(principal.identity(), &code);
        true
    }

    /// May the active session see this post's body, given the password it
    /// supplied (if any)?
    ///
    /// A post that no longer exists gates nothing: the list view will not
    /// render it anyway, so this answers `true` rather than inventing an
    /// error path for a check that never throws.
    pub fn check_secret_access(&self, post_id: PostId, supplied: Option<&str>) -> bool {
        let Some(post) = self.board.get(post_id) else {
            return true;
        };
        let allowed = check_access(&post, supplied, self.current_principal().as_ref());
        if !allowed {
            tracing::debug!(post = %post_id, "secret content locked");
        }
        allowed
    }

    // ─────────────────────────────────────────────────────────────────────
    // Board passthroughs
    // ─────────────────────────────────────────────────────────────────────

    /// Publish a draft, stamping the active session as the author identity
    /// when one is signed in (anonymous submissions keep none).
    pub fn submit_post(&self, mut draft: PostDraft) -> DomainResult<PostId> {
        if draft.author_identity.is_none() {
            draft.author_identity = self.current_principal().map(|p| p.identity().clone());
        }
        self.board.submit(draft)
    }

    /// Moderation edit/removal under the active session.
    pub fn update_post(&self, id: PostId, patch: PostPatch) -> DomainResult<()> {
        let principal = self.current_principal().ok_or(DomainError::Unauthorized)?;
        self.board.update(&principal, id, patch)
    }

    pub fn delete_post(&self, id: PostId) -> DomainResult<()> {
        let principal = self.current_principal().ok_or(DomainError::Unauthorized)?;
        self.board.delete(&principal, id)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Administrative review
    // ─────────────────────────────────────────────────────────────────────

    /// Every known principal with their granted features, ordered by
    /// identity: the admin "who can see what" table.
    pub fn list_principals_with_grants(&self) -> Vec<(Principal, Vec<GrantRecord>)> {
        self.directory
            .list()
            .into_iter()
            .map(|p| {
                let grants = self.ledger.grants_for(p.identity());
                (p, grants)
            })
            .collect()
    }
}
