//! Port abstraction for server-record persistence and lifecycle updates.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::{
    GameServer, NewServer, ServerConfigUpdate, ServerId, ServerStatus, UserId,
};

/// Persistence errors raised by server store adapters.
///
/// Besides the transport-level `Connection`/`Query` pair this carries the
/// business outcomes only the store can decide transactionally: running out
/// of funds, the free-slot limit, and identity collisions against existing
/// rows.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServerStoreError {
    /// Store connection could not be established.
    #[error("server store connection failed: {message}")]
    Connection {
        /// Adapter-level failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("server store query failed: {message}")]
    Query {
        /// Adapter-level failure description.
        message: String,
    },
    /// The referenced user account does not exist.
    #[error("user account does not exist")]
    UserMissing,
    /// The balance did not cover the fee; nothing was charged.
    #[error("balance does not cover the server fee")]
    InsufficientFunds,
    /// The user already holds a free server; nothing was created.
    #[error("free server slot already taken")]
    FreeLimitReached,
    /// The generated port or credential pair collided with an existing row.
    #[error("generated server identity collided with an existing record")]
    IdentityConflict,
}

impl ServerStoreError {
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

/// Port for creating, listing, and mutating server records.
///
/// # Atomicity
///
/// `create_paid` owns the single most safety-critical invariant of the
/// system: the balance debit, the `server_purchase` payment record, and the
/// server row must commit or roll back together. A failure after the debit
/// must never leave the user charged without a server.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServerRepository: Send + Sync {
    /// Insert a free-tier server row.
    ///
    /// Fails with [`ServerStoreError::FreeLimitReached`] when the user
    /// already holds a free server, enforced by the store itself so
    /// concurrent requests cannot both claim the slot.
    async fn create_free(
        &self,
        user_id: &UserId,
        server: &NewServer,
    ) -> Result<GameServer, ServerStoreError>;

    /// Debit `fee`, append the purchase record, and insert the server row in
    /// one transaction.
    async fn create_paid(
        &self,
        user_id: &UserId,
        fee: Decimal,
        server: &NewServer,
    ) -> Result<GameServer, ServerStoreError>;

    /// All servers owned by the user, newest first.
    async fn list(&self, user_id: &UserId) -> Result<Vec<GameServer>, ServerStoreError>;

    /// Set the lifecycle status, scoped by `(server_id, user_id)`.
    ///
    /// Returns whether a row was affected; `false` covers both "not found"
    /// and "owned by another user".
    async fn set_status(
        &self,
        user_id: &UserId,
        server_id: &ServerId,
        status: ServerStatus,
    ) -> Result<bool, ServerStoreError>;

    /// Overwrite the mutable configuration, scoped by `(server_id, user_id)`.
    ///
    /// Same zero-rows contract as [`ServerRepository::set_status`].
    async fn update_config(
        &self,
        user_id: &UserId,
        server_id: &ServerId,
        update: &ServerConfigUpdate,
    ) -> Result<bool, ServerStoreError>;
}
