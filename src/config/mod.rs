//! Configuration module for Herald.
//!
//! Loads configuration from environment variables.

use std::env;

use thiserror::Error;
use tracing::warn;

use crate::interaction::{GuildId, UserId};

/// Default presence text.
pub const DEFAULT_STATUS: &str = "/example | Herald";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    // Discord
    pub token: String,

    /// Publish commands to this guild only. `None` publishes globally.
    pub guild_id: Option<GuildId>,

    /// Presence text shown under the bot's name.
    pub status: String,

    /// Delete published commands when the process shuts down.
    pub remove_commands_on_shutdown: bool,

    /// Owner user IDs (comma-separated)
    /// These users pass every permission check.
    pub owner_ids: Vec<UserId>,

    /// Bot admin user IDs (comma-separated)
    pub admin_ids: Vec<UserId>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Call `dotenvy::dotenv()` first if a `.env` file should be honored.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let token = var("DISCORD_TOKEN").ok_or(ConfigError::Missing("DISCORD_TOKEN"))?;

        let guild_id = var("GUILD_ID")
            .map(|raw| {
                raw.parse::<GuildId>()
                    .map_err(|_| ConfigError::Invalid {
                        var: "GUILD_ID",
                        reason: format!("'{}' is not a guild id", raw),
                    })
            })
            .transpose()?;

        let status = var("BOT_STATUS").unwrap_or_else(|| DEFAULT_STATUS.to_string());

        let remove_commands_on_shutdown = var("REMOVE_COMMANDS_ON_SHUTDOWN")
            .map(|flag| flag.eq_ignore_ascii_case("true") || flag == "1")
            .unwrap_or(false);

        Ok(Self {
            token,
            guild_id,
            status,
            remove_commands_on_shutdown,
            owner_ids: parse_ids("BOT_OWNER_IDS", var("BOT_OWNER_IDS").as_deref()),
            admin_ids: parse_ids("BOT_ADMIN_IDS", var("BOT_ADMIN_IDS").as_deref()),
        })
    }
}

/// Parse a comma separated id list, skipping malformed entries.
fn parse_ids(var: &str, raw: Option<&str>) -> Vec<UserId> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| match s.parse::<UserId>() {
            Ok(id) => Some(id),
            Err(_) => {
                warn!("Skipping malformed entry '{}' in {}", s, var);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_minimal_config() {
        let config = load(&[("DISCORD_TOKEN", "abc")]).unwrap();
        assert_eq!(config.token, "abc");
        assert_eq!(config.guild_id, None);
        assert_eq!(config.status, DEFAULT_STATUS);
        assert!(!config.remove_commands_on_shutdown);
        assert!(config.owner_ids.is_empty());
        assert!(config.admin_ids.is_empty());
    }

    #[test]
    fn test_missing_token() {
        assert_eq!(load(&[]).unwrap_err(), ConfigError::Missing("DISCORD_TOKEN"));
        assert_eq!(
            load(&[("DISCORD_TOKEN", "   ")]).unwrap_err(),
            ConfigError::Missing("DISCORD_TOKEN")
        );
    }

    #[test]
    fn test_id_lists_skip_malformed_entries() {
        let config = load(&[
            ("DISCORD_TOKEN", "abc"),
            ("BOT_OWNER_IDS", "123, 456,,oops"),
            ("BOT_ADMIN_IDS", "789"),
        ])
        .unwrap();
        assert_eq!(config.owner_ids, vec![UserId::new(123), UserId::new(456)]);
        assert_eq!(config.admin_ids, vec![UserId::new(789)]);
    }

    #[test]
    fn test_guild_id() {
        let config = load(&[("DISCORD_TOKEN", "abc"), ("GUILD_ID", "42")]).unwrap();
        assert_eq!(config.guild_id, Some(GuildId::new(42)));

        let config = load(&[("DISCORD_TOKEN", "abc"), ("GUILD_ID", "")]).unwrap();
        assert_eq!(config.guild_id, None);

        assert!(matches!(
            load(&[("DISCORD_TOKEN", "abc"), ("GUILD_ID", "not-a-guild")]),
            Err(ConfigError::Invalid { var: "GUILD_ID", .. })
        ));
        assert!(load(&[("DISCORD_TOKEN", "abc"), ("GUILD_ID", "0")]).is_err());
    }

    #[test]
    fn test_flags_and_status() {
        for (raw, expected) in [("true", true), ("TRUE", true), ("1", true), ("0", false), ("yes", false)] {
            let config = load(&[("DISCORD_TOKEN", "abc"), ("REMOVE_COMMANDS_ON_SHUTDOWN", raw)]).unwrap();
            assert_eq!(config.remove_commands_on_shutdown, expected, "{}", raw);
        }

        let config = load(&[("DISCORD_TOKEN", "abc"), ("BOT_STATUS", "Testing")]).unwrap();
        assert_eq!(config.status, "Testing");
    }
}
