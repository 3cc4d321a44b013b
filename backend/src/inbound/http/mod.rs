//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod error;
pub mod health;
pub mod payments;
pub mod servers;
pub mod state;
pub mod validation;

pub use error::ApiResult;

use actix_web::web;

/// Registers every `/api/v1` handler on the given service config.
///
/// Health probes live outside the versioned scope and are registered by
/// the composition root directly.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(payments::get_balance)
        .service(payments::deposit)
        .service(payments::payment_history)
        .service(servers::list_servers)
        .service(servers::create_server)
        .service(servers::start_server)
        .service(servers::stop_server)
        .service(servers::update_server_config);
}
