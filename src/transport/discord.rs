//! Serenity-backed transport.
//!
//! Everything here goes through serenity's HTTP client. Outbound payloads
//! are turned into serenity builders, so the wire encoding is serenity's.
//! Gateway interactions are converted into the crate's own [`Interaction`]
//! model through their JSON form.

use std::sync::Arc;

use async_trait::async_trait;
use serenity::all::{
    ButtonStyle as DiscordButtonStyle, CommandId, CreateActionRow, CreateButton, CreateCommand,
    CreateCommandOption, CreateEmbed, CreateEmbedAuthor, CreateEmbedFooter,
    CreateInputText, CreateInteractionResponse, CreateInteractionResponseMessage, CreateModal,
    CreateSelectMenu, CreateSelectMenuKind, CreateSelectMenuOption, EditInteractionResponse, Http,
    InputTextStyle, Interaction as GatewayInteraction, ReactionType,
};
use tracing::{debug, info, instrument, warn};

use super::{
    CommandRegistrar, CommandScope, GuildInfo, MemberInfo, MemberLookup, RoleInfo, Session,
    TransportError,
};
use crate::interaction::{GuildId, Interaction, InteractionError, UserId};
use crate::payload::{
    ActionRow, Button, ButtonAction, ButtonStyle, Component, Embed, Emoji, InteractionResponse,
    MessagePayload, Modal, SelectKind, SelectMenu, TextInput, TextInputStyle,
};
use crate::registry::CommandDefinition;

/// Decode a gateway interaction into the crate's interaction model.
///
/// serenity does not write the `type` field back out, so it is restored from
/// [`GatewayInteraction::kind`]. Kinds the router does not handle decode to
/// `Other`.
pub fn decode_interaction(gateway: &GatewayInteraction) -> Result<Interaction, InteractionError> {
    let mut value = serde_json::to_value(gateway)?;
    if let Some(object) = value.as_object_mut() {
        object.insert("type".to_string(), u8::from(gateway.kind()).into());
    }

    Interaction::from_value(value)
}

fn build_emoji(emoji: &Emoji) -> ReactionType {
    ReactionType::Unicode(emoji.name().to_string())
}

fn build_embed(embed: &Embed) -> CreateEmbed {
    let mut out = CreateEmbed::new();
    if let Some(title) = embed.get_title() {
        out = out.title(title);
    }
    if let Some(description) = embed.get_description() {
        out = out.description(description);
    }
    if let Some(url) = embed.get_url() {
        out = out.url(url);
    }
    if let Some(color) = embed.get_color() {
        out = out.color(color);
    }
    if let Some(at) = embed.get_timestamp() {
        out = out.timestamp(at);
    }
    if let Some(footer) = embed.get_footer() {
        let mut built = CreateEmbedFooter::new(&footer.text);
        if let Some(icon) = &footer.icon_url {
            built = built.icon_url(icon);
        }
        out = out.footer(built);
    }
    if let Some(author) = embed.get_author() {
        let mut built = CreateEmbedAuthor::new(&author.name);
        if let Some(icon) = &author.icon_url {
            built = built.icon_url(icon);
        }
        out = out.author(built);
    }
    if let Some(url) = embed.get_thumbnail() {
        out = out.thumbnail(url);
    }
    if let Some(url) = embed.get_image() {
        out = out.image(url);
    }

    out.fields(
        embed
            .fields()
            .iter()
            .map(|field| (field.name.as_str(), field.value.as_str(), field.inline)),
    )
}

fn build_button(button: &Button) -> CreateButton {
    let mut out = match button.action() {
        ButtonAction::Interact { custom_id, style } => {
            CreateButton::new(custom_id).style(match style {
                ButtonStyle::Primary => DiscordButtonStyle::Primary,
                ButtonStyle::Secondary => DiscordButtonStyle::Secondary,
                ButtonStyle::Success => DiscordButtonStyle::Success,
                ButtonStyle::Danger => DiscordButtonStyle::Danger,
            })
        }
        ButtonAction::Link(url) => CreateButton::new_link(url),
    };
    if let Some(label) = button.get_label() {
        out = out.label(label);
    }
    if let Some(emoji) = button.get_emoji() {
        out = out.emoji(build_emoji(emoji));
    }
    out
}

fn build_select(menu: &SelectMenu) -> CreateSelectMenu {
    let kind = match menu.kind() {
        SelectKind::String => CreateSelectMenuKind::String {
            options: menu
                .options()
                .iter()
                .map(|option| {
                    let mut out = CreateSelectMenuOption::new(option.get_label(), option.value())
                        .default_selection(option.is_default());
                    if let Some(description) = option.get_description() {
                        out = out.description(description);
                    }
                    if let Some(emoji) = option.get_emoji() {
                        out = out.emoji(build_emoji(emoji));
                    }
                    out
                })
                .collect(),
        },
        SelectKind::User => CreateSelectMenuKind::User { default_users: None },
    };

    let mut out = CreateSelectMenu::new(menu.custom_id(), kind);
    if let Some(placeholder) = menu.get_placeholder() {
        out = out.placeholder(placeholder);
    }
    out
}

fn build_input(input: &TextInput) -> CreateInputText {
    let style = match input.get_style() {
        TextInputStyle::Short => InputTextStyle::Short,
        TextInputStyle::Paragraph => InputTextStyle::Paragraph,
    };

    let mut out = CreateInputText::new(style, input.get_label(), input.custom_id());
    if let Some(placeholder) = input.get_placeholder() {
        out = out.placeholder(placeholder);
    }
    let (min, max) = input.length();
    if let Some(min) = min {
        out = out.min_length(min);
    }
    if let Some(max) = max {
        out = out.max_length(max);
    }
    out
}

/// A row holds either buttons or a single select/input. The first component
/// decides which; anything that does not fit is dropped.
fn build_row(row: &ActionRow) -> Option<CreateActionRow> {
    match row.components() {
        [] => None,
        [Component::Select(menu), ..] => Some(CreateActionRow::SelectMenu(build_select(menu))),
        [Component::TextInput(input), ..] => Some(CreateActionRow::InputText(build_input(input))),
        components => Some(CreateActionRow::Buttons(
            components
                .iter()
                .filter_map(|component| match component {
                    Component::Button(button) => Some(build_button(button)),
                    _ => None,
                })
                .collect(),
        )),
    }
}

fn build_rows(rows: &[ActionRow]) -> Vec<CreateActionRow> {
    rows.iter().filter_map(build_row).collect()
}

fn build_message(payload: &MessagePayload) -> CreateInteractionResponseMessage {
    let mut out = CreateInteractionResponseMessage::new()
        .embeds(payload.get_embeds().iter().map(build_embed).collect())
        .components(build_rows(payload.get_components()))
        .ephemeral(payload.is_ephemeral());
    if let Some(content) = payload.get_content() {
        out = out.content(content);
    }
    out
}

fn build_modal(modal: &Modal) -> CreateModal {
    CreateModal::new(modal.custom_id(), modal.get_title()).components(
        modal
            .inputs()
            .iter()
            .map(|input| CreateActionRow::InputText(build_input(input)))
            .collect(),
    )
}

fn build_response(response: &InteractionResponse) -> CreateInteractionResponse {
    match response {
        InteractionResponse::Message(payload) => {
            CreateInteractionResponse::Message(build_message(payload))
        }
        InteractionResponse::DeferredMessage => {
            CreateInteractionResponse::Defer(CreateInteractionResponseMessage::new())
        }
        InteractionResponse::DeferredUpdate => CreateInteractionResponse::Acknowledge,
        InteractionResponse::UpdateMessage(payload) => {
            CreateInteractionResponse::UpdateMessage(build_message(payload))
        }
        InteractionResponse::Modal(modal) => CreateInteractionResponse::Modal(build_modal(modal)),
    }
}

/// Edits replace embeds and components wholesale. Ephemerality is fixed by
/// the initial response.
fn build_edit(payload: &MessagePayload) -> EditInteractionResponse {
    let mut out = EditInteractionResponse::new()
        .embeds(payload.get_embeds().iter().map(build_embed).collect())
        .components(build_rows(payload.get_components()));
    if let Some(content) = payload.get_content() {
        out = out.content(content);
    }
    out
}

fn build_command(definition: &CommandDefinition) -> CreateCommand {
    let mut out = CreateCommand::new(definition.name()).description(definition.description());
    for option in definition.options() {
        out = out.add_option(
            CreateCommandOption::new(option.kind(), option.name(), option.description())
                .required(option.is_required()),
        );
    }
    if let Some(permissions) = definition.get_default_member_permissions() {
        out = out.default_member_permissions(permissions);
    }
    if let Some(allowed) = definition.get_dm_permission() {
        out = out.dm_permission(allowed);
    }
    out
}

/// HTTP session shared by every event of a running client.
#[derive(Clone)]
pub struct DiscordSession {
    http: Arc<Http>,
}

impl DiscordSession {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }

    async fn publish_one(
        &self,
        scope: CommandScope,
        definition: &CommandDefinition,
    ) -> Result<(), TransportError> {
        let command = build_command(definition);
        match scope {
            CommandScope::Global => self.http.create_global_command(&command).await,
            CommandScope::Guild(guild) => self.http.create_guild_command(guild, &command).await,
        }
        .map(|_| ())
        .map_err(TransportError::backend)
    }
}

#[async_trait]
impl MemberLookup for DiscordSession {
    async fn guild_member(&self, guild: GuildId, user: UserId) -> Result<MemberInfo, TransportError> {
        let member = self
            .http
            .get_member(guild, user)
            .await
            .map_err(TransportError::backend)?;

        Ok(MemberInfo {
            user_id: member.user.id,
            roles: member.roles,
        })
    }

    async fn guild(&self, guild: GuildId) -> Result<GuildInfo, TransportError> {
        let partial = self
            .http
            .get_guild(guild)
            .await
            .map_err(TransportError::backend)?;

        Ok(GuildInfo {
            id: guild,
            owner_id: partial.owner_id,
            roles: partial
                .roles
                .values()
                .map(|role| RoleInfo {
                    id: role.id,
                    permissions: role.permissions,
                })
                .collect(),
        })
    }
}

#[async_trait]
impl Session for DiscordSession {
    async fn respond(
        &self,
        interaction: &Interaction,
        response: &InteractionResponse,
    ) -> Result<(), TransportError> {
        self.http
            .create_interaction_response(
                interaction.id,
                &interaction.token,
                &build_response(response),
                Vec::new(),
            )
            .await
            .map_err(TransportError::backend)
    }

    async fn edit_response(
        &self,
        interaction: &Interaction,
        payload: &MessagePayload,
    ) -> Result<(), TransportError> {
        self.http
            .edit_original_interaction_response(&interaction.token, &build_edit(payload), Vec::new())
            .await
            .map(|_| ())
            .map_err(TransportError::backend)
    }
}

#[async_trait]
impl CommandRegistrar for DiscordSession {
    #[instrument(skip_all, fields(scope = %scope, count = definitions.len()))]
    async fn publish_commands(
        &self,
        scope: CommandScope,
        definitions: &[&CommandDefinition],
    ) -> Result<usize, TransportError> {
        let mut published = 0;
        for definition in definitions {
            match self.publish_one(scope, definition).await {
                Ok(()) => {
                    debug!("Published /{}", definition.name());
                    published += 1;
                }
                Err(e) => warn!("Failed to publish /{}: {}", definition.name(), e),
            }
        }

        info!("Published {}/{} commands ({})", published, definitions.len(), scope);
        Ok(published)
    }

    #[instrument(skip_all, fields(scope = %scope))]
    async fn remove_commands(&self, scope: CommandScope) -> Result<usize, TransportError> {
        let guild = match scope {
            CommandScope::Global => None,
            CommandScope::Guild(guild) => Some(guild),
        };

        let commands = match guild {
            None => self.http.get_global_commands().await,
            Some(guild) => self.http.get_guild_commands(guild).await,
        }
        .map_err(TransportError::backend)?;

        let mut removed = 0;
        for command in &commands {
            let id: CommandId = command.id;
            let result = match guild {
                None => self.http.delete_global_command(id).await,
                Some(guild) => self.http.delete_guild_command(guild, id).await,
            };

            match result {
                Ok(()) => {
                    debug!("Removed /{}", command.name);
                    removed += 1;
                }
                Err(e) => warn!("Failed to remove /{}: {}", command.name, e),
            }
        }

        info!("Removed {}/{} commands ({})", removed, commands.len(), scope);
        Ok(removed)
    }
}
