//! Herald - Modular Discord Bot Scaffold
//!
//! Routes slash commands, component clicks and modal submissions to
//! registered handlers, with a layered permission authority.
//!
//! ## Architecture
//!
//! - `config` - Environment configuration
//! - `interaction` - Decoded interaction model
//! - `payload` - Embeds, components and responses
//! - `registry` - Handler tables, built once at startup
//! - `permissions` - Owner, admin and guild based permission levels
//! - `transport` - Gateway boundary (serenity adapter)
//! - `bot` - Router and gateway runtime
//! - `plugins` - Command handlers (extensible)

mod bot;
mod config;
mod interaction;
mod payload;
mod permissions;
mod plugins;
mod registry;
mod transport;

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use bot::Router;
use config::Config;
use permissions::{PermissionAuthority, PermissionConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file first (before anything else)
    dotenvy::dotenv().ok();

    // If RUST_LOG is not set, default to "info" level for our crate
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("herald=info,serenity=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();

    info!("Starting Herald bot...");

    let config = Config::from_env()?;
    info!("Configuration loaded successfully");
    match config.guild_id {
        Some(guild) => info!("Commands will be published to guild {}", guild),
        None => info!("Commands will be published globally"),
    }

    // Log owner info
    if config.owner_ids.is_empty() {
        info!("No owner IDs configured (BOT_OWNER_IDS is empty)");
    } else {
        info!("Bot owners: {:?}", config.owner_ids);
    }

    let registry = plugins::build_registry()?;
    info!(
        "Registered {} commands, {} components, {} modals",
        registry.command_count(),
        registry.component_count(),
        registry.modal_count()
    );

    let permissions = PermissionAuthority::new(PermissionConfig::from(&config));
    let router = Router::new(Arc::new(registry), permissions);

    bot::run(&config, router).await
}
