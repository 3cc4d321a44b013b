//! Ledger service: balance reads, deposits, and payment history.
//!
//! All monetary invariants live here or in the store transaction behind the
//! [`LedgerRepository`] port. The service validates amounts before any store
//! interaction; the adapter guarantees the credit and its log entry commit
//! together.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde_json::json;
use tracing::info;

use super::ports::{LedgerRepository, LedgerStoreError};
use super::{Error, PaymentRecord, UserId};

/// Default number of history entries returned when the caller does not ask
/// for a specific limit.
pub const DEFAULT_HISTORY_LIMIT: u32 = 20;

/// Upper bound on one history page.
pub const MAX_HISTORY_LIMIT: u32 = 100;

/// Balance and payment-history operations for one deployment.
#[derive(Clone)]
pub struct LedgerService {
    repo: Arc<dyn LedgerRepository>,
}

impl LedgerService {
    /// Create a new service backed by the given repository.
    pub fn new(repo: Arc<dyn LedgerRepository>) -> Self {
        Self { repo }
    }

    /// Current balance of the user.
    ///
    /// # Errors
    /// `NotFound` when the user does not exist; store failures map to
    /// `ServiceUnavailable`/`InternalError`.
    pub async fn balance(&self, user_id: &UserId) -> Result<Decimal, Error> {
        self.repo
            .fetch_balance(user_id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found("user account not found"))
    }

    /// Credit `amount` to the user and append the deposit record.
    ///
    /// Returns the post-credit balance.
    ///
    /// # Errors
    /// `InvalidAmount` for non-positive amounts (nothing is written),
    /// `NotFound` for unknown users.
    pub async fn deposit(&self, user_id: &UserId, amount: Decimal) -> Result<Decimal, Error> {
        if amount <= Decimal::ZERO {
            return Err(
                Error::invalid_amount("deposit amount must be positive").with_details(json!({
                    "field": "amount",
                    "value": amount.to_string(),
                })),
            );
        }

        let balance = self
            .repo
            .credit(user_id, amount)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found("user account not found"))?;

        info!(user_id = %user_id, amount = %amount, balance = %balance, "deposit credited");
        Ok(balance)
    }

    /// Most recent payment records, newest first.
    ///
    /// `limit` defaults to [`DEFAULT_HISTORY_LIMIT`] and is capped at
    /// [`MAX_HISTORY_LIMIT`].
    ///
    /// # Errors
    /// Store failures map to `ServiceUnavailable`/`InternalError`.
    pub async fn history(
        &self,
        user_id: &UserId,
        limit: Option<u32>,
    ) -> Result<Vec<PaymentRecord>, Error> {
        let limit = limit
            .unwrap_or(DEFAULT_HISTORY_LIMIT)
            .min(MAX_HISTORY_LIMIT);

        self.repo
            .history(user_id, i64::from(limit))
            .await
            .map_err(map_store_error)
    }
}

fn map_store_error(error: LedgerStoreError) -> Error {
    match error {
        LedgerStoreError::Connection { message } => {
            Error::service_unavailable(format!("ledger store unavailable: {message}"))
        }
        LedgerStoreError::Query { message } => {
            Error::internal(format!("ledger store error: {message}"))
        }
    }
}
