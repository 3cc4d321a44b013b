//! Server construction and state wiring.

mod config;

pub use config::ServiceSettings;

use std::sync::Arc;
use std::time::Duration;

use backend::domain::{LedgerService, LifecycleService, ProvisioningService};
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::{
    DbPool, DieselLedgerRepository, DieselServerRepository, PoolConfig,
};

/// Build the database pool described by the settings.
///
/// # Errors
/// Returns [`std::io::Error`] when the pool cannot be constructed.
pub async fn build_pool(settings: &ServiceSettings) -> std::io::Result<DbPool> {
    let config = PoolConfig::new(&settings.database_url)
        .with_max_size(settings.db_pool_size)
        .with_connection_timeout(Duration::from_secs(30));

    DbPool::new(config)
        .await
        .map_err(|e| std::io::Error::other(format!("database pool construction failed: {e}")))
}

/// Wire the Diesel adapters into the domain services handlers depend on.
#[must_use]
pub fn build_http_state(settings: &ServiceSettings, pool: DbPool) -> HttpState {
    let ledger_repo = Arc::new(DieselLedgerRepository::new(pool.clone()));
    let server_repo = Arc::new(DieselServerRepository::new(pool));

    HttpState::new(
        LedgerService::new(ledger_repo),
        ProvisioningService::new(server_repo.clone(), settings.provisioning_config()),
        LifecycleService::new(server_repo),
    )
}
