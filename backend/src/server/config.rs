//! Runtime settings parsed from the command line and the environment.

use std::net::SocketAddr;

use backend::domain::{IdentitySettings, ProvisioningConfig};
use clap::Parser;
use rust_decimal::Decimal;

/// Deployment settings for the panel backend.
///
/// Every flag falls back to an environment variable so the container image
/// can be configured without editing the unit file.
#[derive(Debug, Clone, Parser)]
#[command(name = "backend", about = "Game panel backend service")]
pub struct ServiceSettings {
    /// Socket address to bind the HTTP listener to.
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
    pub bind_addr: SocketAddr,

    /// PostgreSQL connection string.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Maximum number of pooled database connections.
    #[arg(long, env = "DB_POOL_SIZE", default_value_t = 10)]
    pub db_pool_size: u32,

    /// Fee charged for a paid server.
    #[arg(long, env = "SERVER_FEE", default_value = "50.00")]
    pub server_fee: Decimal,

    /// Public IP new server records are created under.
    #[arg(long, env = "PUBLIC_IP", default_value = "185.104.248.123")]
    pub public_ip: String,

    /// FTP host handed to users.
    #[arg(long, env = "FTP_HOST", default_value = "185.104.248.123")]
    pub ftp_host: String,

    /// FTP port handed to users.
    #[arg(long, env = "FTP_PORT", default_value_t = 21)]
    pub ftp_port: u16,

    /// Default player capacity of a new server.
    #[arg(long, env = "DEFAULT_MAX_PLAYERS", default_value_t = 50)]
    pub default_max_players: i32,

    /// Prefix for generated FTP account names.
    #[arg(long, env = "FTP_USERNAME_PREFIX", default_value = "samp_")]
    pub ftp_username_prefix: String,

    /// Lowest game port that may be reserved.
    #[arg(long, env = "PORT_RANGE_START", default_value_t = 7777)]
    pub port_range_start: u16,

    /// Highest game port that may be reserved.
    #[arg(long, env = "PORT_RANGE_END", default_value_t = 8777)]
    pub port_range_end: u16,

    /// Identity generation attempts before provisioning gives up.
    #[arg(long, env = "IDENTITY_ATTEMPTS", default_value_t = 5)]
    pub identity_attempts: u32,
}

impl ServiceSettings {
    /// Translate the flat flag set into the domain provisioning tunables.
    #[must_use]
    pub fn provisioning_config(&self) -> ProvisioningConfig {
        ProvisioningConfig {
            server_fee: self.server_fee,
            public_ip: self.public_ip.clone(),
            ftp_host: self.ftp_host.clone(),
            ftp_port: self.ftp_port,
            default_max_players: self.default_max_players,
            identity: IdentitySettings {
                username_prefix: self.ftp_username_prefix.clone(),
                port_range: self.port_range_start..=self.port_range_end,
                max_attempts: self.identity_attempts,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn parse(args: &[&str]) -> ServiceSettings {
        ServiceSettings::try_parse_from(args).expect("settings parse")
    }

    #[test]
    fn defaults_match_the_deployment_profile() {
        let settings = parse(&["backend", "--database-url", "postgres://localhost/panel"]);

        assert_eq!(settings.bind_addr.port(), 8080);
        assert_eq!(settings.server_fee, dec!(50.00));
        assert_eq!(settings.port_range_start, 7777);
        assert_eq!(settings.port_range_end, 8777);

        let config = settings.provisioning_config();
        assert_eq!(config.ftp_port, 21);
        assert_eq!(config.default_max_players, 50);
        assert_eq!(config.identity.username_prefix, "samp_");
        assert_eq!(config.identity.max_attempts, 5);
    }

    #[test]
    fn flags_override_defaults() {
        let settings = parse(&[
            "backend",
            "--database-url",
            "postgres://localhost/panel",
            "--server-fee",
            "25.50",
            "--port-range-start",
            "9000",
            "--port-range-end",
            "9100",
        ]);

        let config = settings.provisioning_config();
        assert_eq!(config.server_fee, dec!(25.50));
        assert_eq!(config.identity.port_range, 9000..=9100);
    }
}
