//! Ping command plugin.
//!
//! Measures and displays Discord API latency.

use std::time::Instant;

use crate::interaction::Interaction;
use crate::payload::{reload_row, Embed, InteractionResponse, MessagePayload};
use crate::registry::{handler, CommandDefinition, HandlerContext, Registry, RegistryError};

pub const RELOAD_ID: &str = "ping_reload";

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.register_command(
        CommandDefinition::new("ping", "Check bot latency and response time"),
        handler(ping_command),
    )?;
    registry.register_component(RELOAD_ID, handler(reload_button))?;
    Ok(())
}

/// Handle the /ping command - defers, then edits in the measured latency.
pub async fn ping_command(ctx: HandlerContext, interaction: Interaction) -> anyhow::Result<()> {
    measure(&ctx, &interaction, InteractionResponse::DeferredMessage).await
}

/// Handle the reload button under a ping report.
pub async fn reload_button(ctx: HandlerContext, interaction: Interaction) -> anyhow::Result<()> {
    measure(&ctx, &interaction, InteractionResponse::DeferredUpdate).await
}

async fn measure(
    ctx: &HandlerContext,
    interaction: &Interaction,
    ack: InteractionResponse,
) -> anyhow::Result<()> {
    // Time the acknowledgement call itself.
    let start = Instant::now();
    ctx.respond(interaction, ack).await?;
    let roundtrip = start.elapsed();

    let payload = MessagePayload::new()
        .embed(Embed::ping(roundtrip, None))
        .components([reload_row(RELOAD_ID)]);

    ctx.edit_response(interaction, payload).await?;
    Ok(())
}
