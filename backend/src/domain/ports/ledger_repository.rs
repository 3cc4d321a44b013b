//! Port abstraction for balance and payment-history persistence.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::{PaymentRecord, UserId};

/// Persistence errors raised by ledger adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerStoreError {
    /// Store connection could not be established.
    #[error("ledger store connection failed: {message}")]
    Connection {
        /// Adapter-level failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("ledger store query failed: {message}")]
    Query {
        /// Adapter-level failure description.
        message: String,
    },
}

impl LedgerStoreError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for balance reads, credits, and the append-only payment log.
///
/// # Atomicity
///
/// `credit` must apply the balance increment as in-place arithmetic inside
/// the store (`balance = balance + amount`) and append the matching deposit
/// record in the same transaction, so concurrent credits to one user never
/// lose updates and the log never diverges from the balance.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LedgerRepository: Send + Sync {
    /// Fetch the current balance, or `None` when the user does not exist.
    async fn fetch_balance(&self, user_id: &UserId) -> Result<Option<Decimal>, LedgerStoreError>;

    /// Atomically add `amount` and append a `deposit` payment record.
    ///
    /// Returns the post-credit balance, or `None` when the user does not
    /// exist (in which case nothing was written).
    async fn credit(
        &self,
        user_id: &UserId,
        amount: Decimal,
    ) -> Result<Option<Decimal>, LedgerStoreError>;

    /// Most recent payment records for the user, newest first, at most
    /// `limit` rows.
    async fn history(
        &self,
        user_id: &UserId,
        limit: i64,
    ) -> Result<Vec<PaymentRecord>, LedgerStoreError>;
}
