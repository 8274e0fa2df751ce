//! Users service entry-point: loads settings, prepares the SQLite schema, and
//! serves the REST endpoints.

mod server;

use std::sync::Arc;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{
    ServerConfig, ServerSettings, build_http_state, create_server, drain_on_interrupt,
};
use users_service::domain::ports::UserRepository;
use users_service::inbound::http::health::HealthState;
use users_service::outbound::persistence::DieselUserRepository;

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

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let config = ServerConfig::try_from(settings).map_err(std::io::Error::other)?;

    let repository = DieselUserRepository::new(config.store().clone());
    repository
        .initialize()
        .await
        .map_err(|e| std::io::Error::other(format!("failed to initialise database: {e}")))?;
    info!(
        database = %config.store().database_path().display(),
        bind_addr = %config.bind_addr(),
        "users service starting"
    );

    let health_state = web::Data::new(HealthState::new());
    let http_state = build_http_state(Arc::new(repository));
    let server = create_server(health_state.clone(), http_state, &config)?;
    drain_on_interrupt(&server, health_state);
    server.await
}
