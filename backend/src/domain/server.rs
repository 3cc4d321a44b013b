//! Game-server aggregate and the value objects around it.
//!
//! A [`GameServer`] is the bookkeeping record of a hosted server: the actual
//! process lives behind a separate orchestrator, and the telemetry fields are
//! written by an external monitor. This core creates the record, flips its
//! lifecycle status, and updates its mutable configuration.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::UserId;
use super::identity::ServerIdentity;

/// Stable server record identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct ServerId(Uuid);

impl ServerId {
    /// Wrap an already-parsed UUID.
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ServerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Operational state of a server record.
///
/// Creation always starts `offline`; transitions are freely reversible and
/// there is no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ServerStatus {
    /// The server process is stopped.
    Offline,
    /// The server process is running.
    Online,
}

impl ServerStatus {
    /// Store representation of the status.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Offline => "offline",
            Self::Online => "online",
        }
    }

    /// Parse the store representation.
    pub fn from_store(value: &str) -> Option<Self> {
        match value {
            "offline" => Some(Self::Offline),
            "online" => Some(Self::Online),
            _ => None,
        }
    }
}

impl fmt::Display for ServerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Public game endpoint of a server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NetworkAddress {
    /// IPv4 address of the host machine.
    pub ip: String,
    /// Reserved game port.
    pub port: u16,
}

/// FTP access endpoint for a server's files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FtpEndpoint {
    /// FTP host.
    pub host: String,
    /// FTP port.
    pub port: u16,
    /// Generated account name.
    pub username: String,
    /// Generated account password.
    pub password: String,
}

/// Live resource readings written by the external monitor.
///
/// Read-only from this core's perspective; new records start at zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServerTelemetry {
    /// CPU usage percentage.
    pub cpu_usage: f32,
    /// RAM usage percentage.
    pub ram_usage: f32,
    /// Players currently connected.
    pub current_players: i32,
}

/// Full bookkeeping record of a hosted game server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GameServer {
    /// Record identifier.
    pub id: ServerId,
    /// Owning user.
    pub user_id: UserId,
    /// Display name chosen by the user.
    pub name: String,
    /// Game template the server was provisioned from.
    pub template: String,
    /// Lifecycle state.
    pub status: ServerStatus,
    /// Public game endpoint.
    pub address: NetworkAddress,
    /// FTP access endpoint.
    pub ftp: FtpEndpoint,
    /// Player capacity.
    pub max_players: i32,
    /// Monitor-written resource readings.
    pub telemetry: ServerTelemetry,
    /// Restart the process automatically after a crash.
    pub auto_restart: bool,
    /// Nightly backups enabled.
    pub backup_enabled: bool,
    /// Whether this record consumed the user's free slot.
    pub is_free: bool,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Everything needed to insert a new server row.
///
/// Built by the provisioning engine; the store assigns the id and the audit
/// timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewServer {
    /// Display name chosen by the user.
    pub name: String,
    /// Game template to provision from.
    pub template: String,
    /// Generated port and FTP credentials.
    pub identity: ServerIdentity,
    /// Deployment's public IP.
    pub ip: String,
    /// Deployment's FTP host.
    pub ftp_host: String,
    /// Deployment's FTP port.
    pub ftp_port: u16,
    /// Initial player capacity.
    pub max_players: i32,
    /// Whether this consumes the user's free slot.
    pub is_free: bool,
}

/// Mutable configuration overwritten by one lifecycle update.
///
/// `max_players` is deliberately not bounds-checked; the original system
/// accepted any integer and callers rely on that.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfigUpdate {
    /// New player capacity.
    pub max_players: i32,
    /// New auto-restart flag.
    pub auto_restart: bool,
    /// New backup flag.
    pub backup_enabled: bool,
}

/// What a successful provisioning returns to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionedServer {
    /// Identifier of the new record.
    pub id: ServerId,
    /// Public game endpoint.
    pub address: NetworkAddress,
    /// FTP access endpoint, including the generated credentials.
    pub ftp: FtpEndpoint,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ServerStatus::Offline, "offline")]
    #[case(ServerStatus::Online, "online")]
    fn status_round_trips_through_store_representation(
        #[case] status: ServerStatus,
        #[case] stored: &str,
    ) {
        assert_eq!(status.as_str(), stored);
        assert_eq!(ServerStatus::from_store(stored), Some(status));
    }

    #[rstest]
    fn unknown_status_values_are_rejected() {
        assert_eq!(ServerStatus::from_store("crashed"), None);
    }
}
