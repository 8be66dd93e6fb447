//! Named feature codes for the grant ledger.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Raw code for the premium analysis report unlock.
pub const PREMIUM_REPORT: &str = "PREMIUM_REPORT";

/// A named, operator-configurable feature code (e.g. `PREMIUM_REPORT`).
///
/// Codes are uppercased at the boundary and restricted to
/// `[A-Z0-9_]` so a typo cannot silently create a permanently
/// ungrantable feature.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureCode(String);

impl FeatureCode {
    /// Parse and normalize a feature code.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let code = raw.trim().to_uppercase();
        if code.is_empty() {
            return Err(DomainError::validation("feature code is empty"));
        }
        if !code
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
        {
            return Err(DomainError::validation(format!(
                "feature code '{raw}' contains characters outside [A-Z0-9_]"
            )));
        }
        Ok(Self(code))
    }

    /// The premium report unlock, the one code the dashboard ships with.
    pub fn premium_report() -> Self {
        Self(PREMIUM_REPORT.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for FeatureCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for FeatureCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
