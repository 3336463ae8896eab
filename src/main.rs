//! Application entry point for arena-bot.
//!
//! Initializes all components and starts the Discord bot.

pub mod bot;
pub mod clan;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;
pub mod timeparse;
pub mod timezone;
pub mod vanity;

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use dotenv::dotenv;
use log::debug;
use log::info;

use crate::bot::Bot;
use crate::config::Config;
use crate::logging::setup_logging;
use crate::service::Services;
use crate::store::PreferenceStore;
use crate::store::json_store::JsonPreferenceStore;
use crate::vanity::StatusRules;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let init_start = Instant::now();
    let config = load_config().await?;

    let store = setup_store(&config, init_start).await?;
    let services = setup_services(&config, store);

    let _bot = setup_bot(&config, services, init_start).await?;

    run(init_start).await
}

async fn load_config() -> Result<Arc<Config>> {
    debug!("Loading configuration...");
    let mut config = Config::new();
    config.load()?;
    let config = Arc::new(config);
    setup_logging(&config)?;
    info!("Starting arena-bot...");
    Ok(config)
}

async fn setup_store(config: &Config, init_start: Instant) -> Result<Arc<dyn PreferenceStore>> {
    debug!("Setting up preference store...");
    let store = JsonPreferenceStore::load(config.preferences_path()).await?;
    info!(
        "Preference store loaded with {} records ({:.2}s).",
        store.len(),
        init_start.elapsed().as_secs_f64()
    );
    Ok(Arc::new(store))
}

fn setup_services(config: &Config, store: Arc<dyn PreferenceStore>) -> Arc<Services> {
    debug!("Setting up Services...");
    let rules = StatusRules::new(&config.site_host, &config.invite_slug);
    Arc::new(Services::new(store, rules))
}

async fn setup_bot(
    config: &Arc<Config>,
    services: Arc<Services>,
    init_start: Instant,
) -> Result<Bot> {
    info!("Starting bot...");
    let mut bot = Bot::new(config.clone(), services).await?;

    bot.start();
    info!(
        "Bot setup complete ({:.2}s).",
        init_start.elapsed().as_secs_f64()
    );

    Ok(bot)
}

async fn run(init_start: Instant) -> Result<()> {
    info!(
        "arena-bot is up in {:.2}s. Press Ctrl+C to stop.",
        init_start.elapsed().as_secs_f64()
    );

    tokio::signal::ctrl_c().await?;
    info!("Ctrl+C received, shutting down.");

    Ok(())
}
