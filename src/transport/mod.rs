//! Transport boundary.
//!
//! The gateway connection is an external collaborator. The rest of the bot
//! only talks to it through these traits:
//!
//! - [`Session`] answers interactions and edits earlier answers
//! - [`MemberLookup`] fetches guild membership and role definitions
//! - [`CommandRegistrar`] publishes slash command definitions
//!
//! [`discord::DiscordSession`] implements all three over serenity's HTTP
//! client. Tests use the in-memory `mock::MockSession`.

pub mod discord;
#[cfg(test)]
pub mod mock;

use async_trait::async_trait;
use serenity::all::Permissions;
use thiserror::Error;

use crate::interaction::{GuildId, Interaction, RoleId, UserId};
use crate::payload::{InteractionResponse, MessagePayload};
use crate::registry::CommandDefinition;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("transport request failed: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl TransportError {
    pub fn backend<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Backend(Box::new(err))
    }
}

/// A guild member's role assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberInfo {
    pub user_id: UserId,
    pub roles: Vec<RoleId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleInfo {
    pub id: RoleId,
    pub permissions: Permissions,
}

impl RoleInfo {
    #[inline]
    pub fn is_administrator(&self) -> bool {
        self.permissions.administrator()
    }
}

/// Guild ownership and role definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildInfo {
    pub id: GuildId,
    pub owner_id: UserId,
    pub roles: Vec<RoleInfo>,
}

impl GuildInfo {
    pub fn role(&self, id: RoleId) -> Option<&RoleInfo> {
        self.roles.iter().find(|role| role.id == id)
    }
}

#[async_trait]
pub trait MemberLookup: Send + Sync {
    /// Fetch `user`'s membership in `guild`. Fails if the user is not a member.
    async fn guild_member(&self, guild: GuildId, user: UserId) -> Result<MemberInfo, TransportError>;

    async fn guild(&self, guild: GuildId) -> Result<GuildInfo, TransportError>;
}

/// Per-event handle handlers use to answer the interaction.
#[async_trait]
pub trait Session: MemberLookup {
    /// Send the initial response. Discord accepts exactly one per interaction.
    async fn respond(
        &self,
        interaction: &Interaction,
        response: &InteractionResponse,
    ) -> Result<(), TransportError>;

    /// Edit the original response (after a deferred or direct reply).
    async fn edit_response(
        &self,
        interaction: &Interaction,
        payload: &MessagePayload,
    ) -> Result<(), TransportError>;
}

/// Where slash commands are published.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandScope {
    Global,
    Guild(GuildId),
}

impl CommandScope {
    /// No guild configured means global commands.
    pub fn from_guild(guild: Option<GuildId>) -> Self {
        guild.map_or(Self::Global, Self::Guild)
    }
}

impl std::fmt::Display for CommandScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Global => write!(f, "global"),
            Self::Guild(id) => write!(f, "guild {}", id),
        }
    }
}

#[async_trait]
pub trait CommandRegistrar: Send + Sync {
    /// Create each definition remotely. Returns how many were accepted.
    async fn publish_commands(
        &self,
        scope: CommandScope,
        definitions: &[&CommandDefinition],
    ) -> Result<usize, TransportError>;

    /// Delete every command in `scope`. Returns how many were removed.
    async fn remove_commands(&self, scope: CommandScope) -> Result<usize, TransportError>;
}
