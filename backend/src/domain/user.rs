//! User identity newtype.
//!
//! User accounts are owned by an external identity system; this core only
//! ever references them by identifier and adjusts their balance through the
//! ledger port.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Stable user identifier supplied by the upstream gateway.
///
/// The identifier arrives already authenticated; this core trusts it and
/// never creates or destroys the underlying account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Wrap an already-parsed UUID.
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Parse a textual identifier.
    pub fn parse(value: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(value).map(Self)
    }

    /// Generate a random identifier (test fixtures and seeds).
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn parse_accepts_canonical_uuids() {
        let id = UserId::parse("11111111-1111-1111-1111-111111111111").expect("valid uuid");
        assert_eq!(id.to_string(), "11111111-1111-1111-1111-111111111111");
    }

    #[rstest]
    #[case("")]
    #[case("not-a-uuid")]
    #[case(" 11111111-1111-1111-1111-111111111111")]
    fn parse_rejects_malformed_input(#[case] raw: &str) {
        assert!(UserId::parse(raw).is_err());
    }
}
