//! Principal identity value type.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identity of a principal: a normalized email address.
///
/// Identities are the key of the grant ledger and the owner reference on
/// content items, so they are normalized once at the boundary (trimmed,
/// lowercased) and compared byte-for-byte afterwards.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    /// Parse and normalize an identity string.
    ///
    /// Accepts anything email-shaped: non-empty local part, `@`, non-empty
    /// domain. Full RFC 5321 validation belongs to the identity provider,
    /// which has already verified the address before we ever see it.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let normalized = raw.trim().to_lowercase();
        let Some((local, domain)) = normalized.split_once('@') else {
            return Err(DomainError::validation(format!(
                "identity '{raw}' is not an email address"
            )));
        };
        if local.is_empty() || domain.is_empty() {
            return Err(DomainError::validation(format!(
                "identity '{raw}' is not an email address"
            )));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part before `@`, used as a display-name fallback when the
    /// provider supplies no nickname.
    pub fn local_part(&self) -> &str {
        self.0.split('@').next().unwrap_or(&self.0)
    }
}

impl core::fmt::Display for Identity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Identity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_normalizes_case_and_whitespace() {
        let id = Identity::parse("  Seller@Example.COM ").unwrap();
        assert_eq!(id.as_str(), "seller@example.com");
    }

    #[test]
    fn equal_after_normalization() {
        let a = Identity::parse("a@x.io").unwrap();
        let b = Identity::parse("A@X.IO").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn local_part_is_display_fallback() {
        let id = Identity::parse("bigbrand@client.co").unwrap();
        assert_eq!(id.local_part(), "bigbrand");
    }

    #[test]
    fn rejects_non_email_shapes() {
        for raw in ["", "   ", "no-at-sign", "@domain.only", "local@"] {
            assert!(Identity::parse(raw).is_err(), "accepted {raw:?}");
        }
    }
}
