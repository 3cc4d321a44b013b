//! Provisioning engine: tier eligibility, charging, and server creation.
//!
//! The engine validates the request, draws a fresh identity, and delegates
//! the money-and-row mutation to the store port, which commits the debit,
//! the purchase record, and the server row as one transaction. Identity
//! collisions reported by the store trigger regeneration within a bounded
//! retry budget.

use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use rust_decimal::Decimal;
use serde_json::json;
use tracing::{debug, info, warn};

use super::identity::{IdentitySettings, ServerIdentity};
use super::ports::{ServerRepository, ServerStoreError};
use super::{Error, GameServer, NewServer, ProvisionedServer, UserId};

/// Per-deployment provisioning tunables.
///
/// The original system embedded these as constants; they are surfaced here so
/// a deployment can tune them without a code change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisioningConfig {
    /// Fixed fee charged for a paid server.
    pub server_fee: Decimal,
    /// Public IP every server record is created under.
    pub public_ip: String,
    /// FTP host handed to the user.
    pub ftp_host: String,
    /// FTP port handed to the user.
    pub ftp_port: u16,
    /// Default player capacity of a new server.
    pub default_max_players: i32,
    /// Identity generation tunables.
    pub identity: IdentitySettings,
}

impl Default for ProvisioningConfig {
    fn default() -> Self {
        Self {
            server_fee: Decimal::new(5000, 2),
            public_ip: "185.104.248.123".to_owned(),
            ftp_host: "185.104.248.123".to_owned(),
            ftp_port: 21,
            default_max_players: 50,
            identity: IdentitySettings::default(),
        }
    }
}

/// A validated server creation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateServerRequest {
    /// Display name chosen by the user.
    pub name: String,
    /// Game template to provision from.
    pub template: String,
    /// Claim the user's free slot instead of paying the fee.
    pub is_free: bool,
}

/// Charges (or waives the charge for) and creates server records.
#[derive(Clone)]
pub struct ProvisioningService {
    repo: Arc<dyn ServerRepository>,
    config: ProvisioningConfig,
}

impl ProvisioningService {
    /// Create a new engine backed by the given store and configuration.
    pub fn new(repo: Arc<dyn ServerRepository>, config: ProvisioningConfig) -> Self {
        Self { repo, config }
    }

    /// The configured fixed fee for a paid server.
    pub const fn server_fee(&self) -> Decimal {
        self.config.server_fee
    }

    /// Provision a server record for the user.
    ///
    /// Free-tier requests are rejected when the free slot is taken; paid
    /// requests debit the fixed fee and append a `server_purchase` payment
    /// record in the same store transaction that inserts the server row.
    ///
    /// # Errors
    /// `InvalidInput` for empty name/template, `FreeLimitExceeded`,
    /// `InsufficientFunds`, `NotFound` for unknown users, and
    /// `AllocationExhausted` when every generated identity collided.
    pub async fn create_server(
        &self,
        user_id: &UserId,
        request: CreateServerRequest,
    ) -> Result<ProvisionedServer, Error> {
        let name = request.name.trim();
        let template = request.template.trim();
        if name.is_empty() || template.is_empty() {
            return Err(
                Error::invalid_input("name and template are required").with_details(json!({
                    "fields": ["name", "template"],
                })),
            );
        }

        let mut rng = SmallRng::from_entropy();
        let attempts = self.config.identity.max_attempts.max(1);

        for attempt in 1..=attempts {
            let identity = ServerIdentity::generate(&self.config.identity, &mut rng);
            let server = self.build_record(name, template, identity, request.is_free);

            let created = if request.is_free {
                self.repo.create_free(user_id, &server).await
            } else {
                self.repo
                    .create_paid(user_id, self.config.server_fee, &server)
                    .await
            };

            match created {
                Ok(record) => {
                    info!(
                        user_id = %user_id,
                        server_id = %record.id,
                        port = record.address.port,
                        is_free = record.is_free,
                        "server provisioned"
                    );
                    return Ok(ProvisionedServer {
                        id: record.id,
                        address: record.address,
                        ftp: record.ftp,
                    });
                }
                Err(ServerStoreError::IdentityConflict) => {
                    debug!(user_id = %user_id, attempt, "server identity collision, regenerating");
                }
                Err(error) => return Err(map_store_error(error)),
            }
        }

        warn!(user_id = %user_id, attempts, "identity allocation exhausted");
        Err(Error::allocation_exhausted(
            "could not allocate a unique server identity",
        ))
    }

    /// All servers owned by the user, newest first.
    ///
    /// # Errors
    /// Store failures map to `ServiceUnavailable`/`InternalError`.
    pub async fn list_servers(&self, user_id: &UserId) -> Result<Vec<GameServer>, Error> {
        self.repo.list(user_id).await.map_err(map_store_error)
    }

    fn build_record(
        &self,
        name: &str,
        template: &str,
        identity: ServerIdentity,
        is_free: bool,
    ) -> NewServer {
        NewServer {
            name: name.to_owned(),
            template: template.to_owned(),
            identity,
            ip: self.config.public_ip.clone(),
            ftp_host: self.config.ftp_host.clone(),
            ftp_port: self.config.ftp_port,
            max_players: self.config.default_max_players,
            is_free,
        }
    }
}

fn map_store_error(error: ServerStoreError) -> Error {
    match error {
        ServerStoreError::Connection { message } => {
            Error::service_unavailable(format!("server store unavailable: {message}"))
        }
        ServerStoreError::Query { message } => {
            Error::internal(format!("server store error: {message}"))
        }
        ServerStoreError::UserMissing => Error::not_found("user account not found"),
        ServerStoreError::InsufficientFunds => {
            Error::insufficient_funds("balance does not cover the server fee")
        }
        ServerStoreError::FreeLimitReached => {
            Error::free_limit_exceeded("free server limit reached")
        }
        ServerStoreError::IdentityConflict => {
            // Only reachable when the retry loop is bypassed; callers treat
            // it as exhaustion.
            Error::allocation_exhausted("could not allocate a unique server identity")
        }
    }
}
