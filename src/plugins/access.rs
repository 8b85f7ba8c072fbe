//! Access command plugin.
//!
//! Reports the caller's effective permission level, or another user's when
//! the caller is at least a server admin.

use crate::interaction::{Interaction, UserId};
use crate::payload::{colors, markdown, Embed, InteractionResponse, MessagePayload};
use crate::permissions::PermissionLevel;
use crate::registry::{
    handler, CommandDefinition, CommandOptionDef, HandlerContext, OptionKind, Registry,
    RegistryError,
};

pub const USER_OPTION: &str = "user";

/// Level needed to look up someone else.
const INSPECT_LEVEL: PermissionLevel = PermissionLevel::ServerAdmin;

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.register_command(
        CommandDefinition::new("access", "Show your permission level").option(
            CommandOptionDef::new(OptionKind::User, USER_OPTION, "Check someone else instead"),
        ),
        handler(access_command),
    )
}

fn level_color(level: PermissionLevel) -> u32 {
    match level {
        PermissionLevel::None => colors::GREY,
        PermissionLevel::ServerAdmin => colors::BLUE,
        PermissionLevel::BotAdmin => colors::PURPLE,
        PermissionLevel::BotOwner => colors::GOLD,
    }
}

/// The `user` option, if given and well formed.
fn target_user(interaction: &Interaction) -> Option<UserId> {
    interaction
        .command()?
        .option(USER_OPTION)?
        .value
        .as_ref()?
        .as_str()?
        .parse()
        .ok()
}

/// Handle /access.
pub async fn access_command(ctx: HandlerContext, interaction: Interaction) -> anyhow::Result<()> {
    let target = match target_user(&interaction) {
        Some(user) if user != interaction.user.id => {
            if !ctx.has_permission(&interaction, INSPECT_LEVEL).await {
                let embed = Embed::error(
                    "Not allowed",
                    &format!("Checking other users requires {}.", markdown::bold(INSPECT_LEVEL.label())),
                );
                let payload = MessagePayload::new().embed(embed).ephemeral();
                ctx.respond(&interaction, InteractionResponse::Message(payload)).await?;
                return Ok(());
            }
            user
        }
        _ => interaction.user.id,
    };

    let level = ctx
        .permissions
        .effective_level(&*ctx.session, target, interaction.guild_id)
        .await;

    let ladder = PermissionLevel::ALL
        .iter()
        .rev()
        .map(|&tier| {
            let mark = if level >= tier { "✅" } else { "▫️" };
            format!("{} {}", mark, tier)
        })
        .collect::<Vec<_>>()
        .join("\n");

    let embed = Embed::new()
        .title("Access Level")
        .description(format!(
            "{} is {}",
            markdown::mention(target),
            markdown::bold(level.label())
        ))
        .color(level_color(level))
        .block_field("Tiers", ladder);

    let payload = MessagePayload::new().embed(embed).ephemeral();
    ctx.respond(&interaction, InteractionResponse::Message(payload)).await?;
    Ok(())
}
