//! `sellerdesk-api` — the in-process facade the presentation layer calls.
//!
//! Every page and menu goes through [`AccessContext`] for session control,
//! permission checks, grant verification, and the secret-content gate.
//! Decisions are re-evaluated on every call; nothing is cached across a
//! principal change.

pub mod context;
pub mod menu;


pub use context::AccessContext;
pub use menu::MenuEntry;
