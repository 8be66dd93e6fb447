//! Lock code for secret content.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Four-digit code guarding a secret post.
///
/// This is a courtesy gate for a community board, not a credential: codes
/// are stored and compared in plain text. Comparison is exact, with no
/// trimming or case folding, digit for digit.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LockCode(String);

impl LockCode {
    /// Parse a lock code: exactly four ASCII digits.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        if raw.len() != 4 || !raw.chars().all(|c| c.is_ascii_digit()) {
            return Err(DomainError::validation(
                "lock code must be exactly four digits",
            ));
        }
        Ok(Self(raw.to_string()))
    }

    /// Exact string equality against a supplied code.
    pub fn matches(&self, supplied: &str) -> bool {
        self.0 == supplied
    }
}

// Keep the code itself out of logs and debug output.
impl core::fmt::Debug for LockCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("LockCode(****)")
    }
}

impl FromStr for LockCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
