//! Payment ledger entries.
//!
//! Payment records are append-only: the ledger writes exactly one per credit
//! or charge and nothing ever updates or deletes them.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::UserId;

/// What a payment record accounts for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentKind {
    /// Funds added to the balance by the user.
    Deposit,
    /// The fixed fee charged for a paid server.
    ServerPurchase,
}

impl PaymentKind {
    /// Store representation of the kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::ServerPurchase => "server_purchase",
        }
    }
}

/// Settlement state of a payment.
///
/// Only `completed` exists: no partial or pending states are modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// The payment settled in the same transaction that created it.
    Completed,
}

impl PaymentStatus {
    /// Store representation of the status.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
        }
    }
}

/// Immutable ledger entry for one balance mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    /// Record identifier.
    pub id: Uuid,
    /// Owning user.
    pub user_id: UserId,
    /// Positive amount moved by this entry.
    pub amount: Decimal,
    /// Whether this was a deposit or a server charge.
    pub kind: PaymentKind,
    /// Settlement state; always completed.
    pub status: PaymentStatus,
    /// When the entry was appended.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(PaymentKind::Deposit, "deposit")]
    #[case(PaymentKind::ServerPurchase, "server_purchase")]
    fn kind_store_representation(#[case] kind: PaymentKind, #[case] expected: &str) {
        assert_eq!(kind.as_str(), expected);
    }

    #[rstest]
    fn kind_serialises_as_snake_case() {
        let value = serde_json::to_value(PaymentKind::ServerPurchase).expect("serialise");
        assert_eq!(value, "server_purchase");
    }
}
