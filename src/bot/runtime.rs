//! Bot runtime - gateway client, event handling and shutdown.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serenity::all::{ActivityData, Context, EventHandler, GatewayIntents, Interaction, Ready};
use serenity::Client;
use tracing::{error, info, warn};

use super::dispatcher::Router;
use crate::config::Config;
use crate::transport::discord::{decode_interaction, DiscordSession};
use crate::transport::{CommandRegistrar, CommandScope};

/// Serenity event handler feeding the router.
pub struct GatewayHandler {
    router: Router,
    scope: CommandScope,
    status: String,
    published: AtomicBool,
}

impl GatewayHandler {
    pub fn new(router: Router, config: &Config) -> Self {
        Self {
            router,
            scope: CommandScope::from_guild(config.guild_id),
            status: config.status.clone(),
            published: AtomicBool::new(false),
        }
    }

    /// Intents the bot needs. Interactions arrive regardless of intents.
    pub fn intents() -> GatewayIntents {
        GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES
    }
}

#[async_trait]
impl EventHandler for GatewayHandler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        ctx.http.set_application_id(ready.application.id);

        info!(
            "Logged in as {} (serving {} guilds)",
            ready.user.name,
            ready.guilds.len()
        );

        ctx.set_activity(Some(ActivityData::playing(self.status.clone())));

        // Ready fires again after every reconnect.
        if self.published.swap(true, Ordering::SeqCst) {
            return;
        }

        let session = DiscordSession::new(ctx.http.clone());
        let definitions = self.router.registry().definitions();
        if let Err(e) = session.publish_commands(self.scope, &definitions).await {
            error!("Failed to publish commands: {}", e);
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let interaction = match decode_interaction(&interaction) {
            Ok(interaction) => interaction,
            Err(e) => {
                warn!("Dropping undecodable interaction: {}", e);
                return;
            }
        };

        let session = Arc::new(DiscordSession::new(ctx.http.clone()));
        self.router.route(session, interaction).await;
    }
}

/// Connect to the gateway and run until a shutdown signal arrives.
pub async fn run(config: &Config, router: Router) -> anyhow::Result<()> {
    let handler = GatewayHandler::new(router, config);

    let mut client = Client::builder(&config.token, GatewayHandler::intents())
        .event_handler(handler)
        .await?;

    let shard_manager = client.shard_manager.clone();
    let session = DiscordSession::new(client.http.clone());
    let scope = CommandScope::from_guild(config.guild_id);
    let remove_commands = config.remove_commands_on_shutdown;

    tokio::spawn(async move {
        shutdown_signal().await;
        info!("Shutdown signal received");

        if remove_commands {
            if let Err(e) = session.remove_commands(scope).await {
                warn!("Failed to remove commands: {}", e);
            }
        }

        shard_manager.shutdown_all().await;
    });

    info!("Connecting to Discord...");
    client.start().await?;
    info!("Client stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
