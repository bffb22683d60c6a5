mod config;
mod github;
mod http;
mod logger;
mod mail;
mod relay;
mod server;

use anyhow::{Context, Result};
use config::Config;
use server::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load().await.context("Cannot load configuration")?;
    logger::init(&config.log_level)?;

    log::info!("Starting");
    log::debug!("Configuration: {:?}", config);

    let state = AppState::new(config).context("Cannot initialise the relay")?;

    server::run(state).await.context("Relay stopped")?;

    Ok(())
}
