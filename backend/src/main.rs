//! Backend entry-point: wires the REST endpoints and health probes.

mod server;

use actix_web::{App, HttpServer, web};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::configure_api;
use backend::inbound::http::health::{HealthState, live, ready};
use server::{ServiceSettings, build_http_state, build_pool};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServiceSettings::parse();
    let pool = build_pool(&settings).await?;
    let state = web::Data::new(build_http_state(&settings, pool));

    let health_state = web::Data::new(HealthState::new());
    // Clone for the server factory so the readiness probe stays reachable.
    let server_health_state = health_state.clone();
    let bind_addr = settings.bind_addr;
    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(server_health_state.clone())
            .service(web::scope("/api/v1").configure(configure_api))
            .service(ready)
            .service(live)
    })
    .bind(bind_addr)?;

    info!(%bind_addr, "listening");
    health_state.mark_ready();
    server.run().await
}
