//! PostgreSQL-backed [`LedgerRepository`] implementation using Diesel.
//!
//! The credit path is the concurrency-sensitive one: the balance increment is
//! expressed as in-place SQL arithmetic and committed together with the
//! deposit log entry, so parallel credits to the same user serialise in the
//! database instead of racing in the application.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use rust_decimal::Decimal;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::ports::{LedgerRepository, LedgerStoreError};
use crate::domain::{PaymentKind, PaymentRecord, PaymentStatus, UserId};

use super::models::{NewPaymentRow, PaymentRow};
use super::pool::{DbPool, PoolError};
use super::schema::{payments, users};

/// Diesel-backed implementation of the [`LedgerRepository`] port.
#[derive(Clone)]
pub struct DieselLedgerRepository {
    pool: DbPool,
}

impl DieselLedgerRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> LedgerStoreError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            LedgerStoreError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> LedgerStoreError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            LedgerStoreError::connection("database connection error")
        }
        _ => LedgerStoreError::query("database error"),
    }
}

fn row_to_record(row: PaymentRow) -> PaymentRecord {
    let kind = match row.kind.as_str() {
        "deposit" => PaymentKind::Deposit,
        "server_purchase" => PaymentKind::ServerPurchase,
        other => {
            warn!(value = other, payment_id = %row.id, "unrecognised payment type, reporting as deposit");
            PaymentKind::Deposit
        }
    };

    PaymentRecord {
        id: row.id,
        user_id: UserId::from_uuid(row.user_id),
        amount: row.amount,
        kind,
        status: PaymentStatus::Completed,
        created_at: row.created_at,
    }
}

#[async_trait]
impl LedgerRepository for DieselLedgerRepository {
    async fn fetch_balance(&self, user_id: &UserId) -> Result<Option<Decimal>, LedgerStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        users::table
            .find(user_id.as_uuid())
            .select(users::balance)
            .first::<Decimal>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)
    }

    async fn credit(
        &self,
        user_id: &UserId,
        amount: Decimal,
    ) -> Result<Option<Decimal>, LedgerStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let uid = *user_id.as_uuid();

        conn.transaction(|conn| {
            async move {
                let balance: Option<Decimal> = diesel::update(users::table.find(uid))
                    .set(users::balance.eq(users::balance + amount))
                    .returning(users::balance)
                    .get_result(conn)
                    .await
                    .optional()?;

                let Some(balance) = balance else {
                    // Unknown user: nothing to log, nothing to roll back.
                    return Ok(None);
                };

                diesel::insert_into(payments::table)
                    .values(NewPaymentRow {
                        id: Uuid::new_v4(),
                        user_id: uid,
                        amount,
                        kind: PaymentKind::Deposit.as_str(),
                        status: PaymentStatus::Completed.as_str(),
                    })
                    .execute(conn)
                    .await?;

                Ok(Some(balance))
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn history(
        &self,
        user_id: &UserId,
        limit: i64,
    ) -> Result<Vec<PaymentRecord>, LedgerStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<PaymentRow> = payments::table
            .filter(payments::user_id.eq(user_id.as_uuid()))
            .order(payments::created_at.desc())
            .limit(limit)
            .select(PaymentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_record).collect())
    }
}
