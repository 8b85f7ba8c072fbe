//! Permission authority.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, warn};

use super::PermissionLevel;
use crate::config::Config;
use crate::interaction::{GuildId, UserId};
use crate::transport::{MemberLookup, TransportError};

/// Configured bot-level identities. Loaded once, never mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionConfig {
    pub owner_ids: HashSet<UserId>,
    pub admin_ids: HashSet<UserId>,
}

impl PermissionConfig {
    pub fn new(
        owner_ids: impl IntoIterator<Item = UserId>,
        admin_ids: impl IntoIterator<Item = UserId>,
    ) -> Self {
        Self {
            owner_ids: owner_ids.into_iter().collect(),
            admin_ids: admin_ids.into_iter().collect(),
        }
    }
}

impl From<&Config> for PermissionConfig {
    fn from(config: &Config) -> Self {
        Self::new(config.owner_ids.iter().copied(), config.admin_ids.iter().copied())
    }
}

/// Computes a user's effective permission level.
///
/// Sources are consulted highest rank first and the first match wins:
/// configured owners, configured admins, then the guild itself (guild owner
/// or an administrator role). A failed guild lookup never grants anything.
///
/// Nothing is cached; every call for a guild-level answer hits the transport.
#[derive(Debug, Clone, Default)]
pub struct PermissionAuthority {
    config: Arc<PermissionConfig>,
}

impl PermissionAuthority {
    pub fn new(config: PermissionConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    #[inline]
    pub fn is_bot_owner(&self, user: UserId) -> bool {
        self.config.owner_ids.contains(&user)
    }

    #[inline]
    pub fn is_bot_admin(&self, user: UserId) -> bool {
        self.config.admin_ids.contains(&user)
    }

    /// Highest level `user` holds in `guild`.
    ///
    /// Without a guild (direct messages) only the configured lists apply.
    pub async fn effective_level<L>(
        &self,
        lookup: &L,
        user: UserId,
        guild: Option<GuildId>,
    ) -> PermissionLevel
    where
        L: MemberLookup + ?Sized,
    {
        if self.is_bot_owner(user) {
            debug!("User {} is a bot owner", user);
            return PermissionLevel::BotOwner;
        }

        if self.is_bot_admin(user) {
            debug!("User {} is a bot admin", user);
            return PermissionLevel::BotAdmin;
        }

        let Some(guild) = guild else {
            debug!("User {} has no guild context", user);
            return PermissionLevel::None;
        };

        match self.is_server_admin(lookup, guild, user).await {
            Ok(true) => {
                debug!("User {} is a server admin in guild {}", user, guild);
                PermissionLevel::ServerAdmin
            }
            Ok(false) => PermissionLevel::None,
            Err(e) => {
                warn!(
                    "Permission lookup for user {} in guild {} failed: {}",
                    user, guild, e
                );
                PermissionLevel::None
            }
        }
    }

    /// Whether `user` holds at least `required`.
    pub async fn has_permission<L>(
        &self,
        lookup: &L,
        user: UserId,
        guild: Option<GuildId>,
        required: PermissionLevel,
    ) -> bool
    where
        L: MemberLookup + ?Sized,
    {
        self.effective_level(lookup, user, guild).await >= required
    }

    async fn is_server_admin<L>(
        &self,
        lookup: &L,
        guild_id: GuildId,
        user: UserId,
    ) -> Result<bool, TransportError>
    where
        L: MemberLookup + ?Sized,
    {
        let member = lookup.guild_member(guild_id, user).await?;
        let guild = lookup.guild(guild_id).await?;

        if guild.owner_id == member.user_id {
            debug!("User {} owns guild {}", user, guild.id);
            return Ok(true);
        }

        Ok(member
            .roles
            .iter()
            .filter_map(|role_id| guild.role(*role_id))
            .any(|role| role.is_administrator()))
    }
}
