//! Users API - REST server over an in-memory user store

use axum_helpers::server::create_production_app;
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_users::InMemoryUserRepository;
use tracing::info;

mod api;
mod app;
mod config;
mod openapi;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);
    observability::init_metrics();

    // Records live only as long as the process
    let repository = InMemoryUserRepository::new();
    let router = app::build(&config, repository.clone())?;

    info!(
        environment = ?config.environment,
        "Starting {} v{} on {}",
        config.app.name,
        config.app.version,
        config.server.address()
    );

    create_production_app(router, &config.server, app::discard_store(repository))
        .await
        .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Users API shutdown complete");
    Ok(())
}
