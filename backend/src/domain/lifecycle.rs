//! Lifecycle manager: status transitions and configuration updates.
//!
//! Every operation is scoped by the `(server_id, user_id)` compound predicate
//! at the store layer, so a server that is missing or owned by someone else
//! affects zero rows. The service surfaces that as `NotFoundOrForbidden`
//! without distinguishing the two cases.

use std::sync::Arc;

use tracing::info;

use super::ports::{ServerRepository, ServerStoreError};
use super::{Error, ServerConfigUpdate, ServerId, ServerStatus, UserId};

/// Status and configuration operations for existing server records.
#[derive(Clone)]
pub struct LifecycleService {
    repo: Arc<dyn ServerRepository>,
}

impl LifecycleService {
    /// Create a new service backed by the given store.
    pub fn new(repo: Arc<dyn ServerRepository>) -> Self {
        Self { repo }
    }

    /// Transition the server to `online`.
    ///
    /// # Errors
    /// `NotFoundOrForbidden` when the compound predicate matched no row.
    pub async fn start(
        &self,
        user_id: &UserId,
        server_id: &ServerId,
    ) -> Result<ServerStatus, Error> {
        self.transition(user_id, server_id, ServerStatus::Online)
            .await
    }

    /// Transition the server to `offline`.
    ///
    /// # Errors
    /// `NotFoundOrForbidden` when the compound predicate matched no row.
    pub async fn stop(
        &self,
        user_id: &UserId,
        server_id: &ServerId,
    ) -> Result<ServerStatus, Error> {
        self.transition(user_id, server_id, ServerStatus::Offline)
            .await
    }

    /// Overwrite the mutable configuration fields and `updated_at`.
    ///
    /// # Errors
    /// `NotFoundOrForbidden` when the compound predicate matched no row.
    pub async fn update_config(
        &self,
        user_id: &UserId,
        server_id: &ServerId,
        update: ServerConfigUpdate,
    ) -> Result<(), Error> {
        let affected = self
            .repo
            .update_config(user_id, server_id, &update)
            .await
            .map_err(map_store_error)?;
        if !affected {
            return Err(Error::not_found_or_forbidden(
                "server not found for this user",
            ));
        }

        info!(
            user_id = %user_id,
            server_id = %server_id,
            max_players = update.max_players,
            "server configuration updated"
        );
        Ok(())
    }

    async fn transition(
        &self,
        user_id: &UserId,
        server_id: &ServerId,
        status: ServerStatus,
    ) -> Result<ServerStatus, Error> {
        let affected = self
            .repo
            .set_status(user_id, server_id, status)
            .await
            .map_err(map_store_error)?;
        if !affected {
            return Err(Error::not_found_or_forbidden(
                "server not found for this user",
            ));
        }

        info!(user_id = %user_id, server_id = %server_id, status = %status, "server status changed");
        Ok(status)
    }
}

fn map_store_error(error: ServerStoreError) -> Error {
    match error {
        ServerStoreError::Connection { message } => {
            Error::service_unavailable(format!("server store unavailable: {message}"))
        }
        other => Error::internal(format!("server store error: {other}")),
    }
}
