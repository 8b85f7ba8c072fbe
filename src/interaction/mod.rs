//! Interaction model.
//!
//! Typed view of the interactions the gateway delivers. Only the three kinds
//! the router handles carry decoded data; everything else is kept as
//! [`InteractionKind::Other`] with its raw type code so new kinds never break
//! decoding.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use serenity::all::InteractionType;
use thiserror::Error;

pub use serenity::all::{GuildId, InteractionId, RoleId, UserId};

/// Errors raised while decoding an interaction payload.
#[derive(Debug, Error)]
pub enum InteractionError {
    #[error("malformed interaction payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("interaction {0} has no invoking user")]
    MissingUser(InteractionId),

    #[error("{kind} interaction {id} has no data")]
    MissingData { kind: &'static str, id: InteractionId },

    #[error("{kind} interaction {id} has malformed data: {source}")]
    Data {
        kind: &'static str,
        id: InteractionId,
        #[source]
        source: serde_json::Error,
    },
}

/// A Discord user as seen in interaction payloads.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub global_name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

impl User {
    /// Global display name, falling back to the username.
    pub fn display_name(&self) -> &str {
        self.global_name.as_deref().unwrap_or(&self.username)
    }

    /// CDN url of the user's avatar, or the default avatar if none is set.
    pub fn avatar_url(&self, size: u16) -> String {
        match &self.avatar {
            Some(hash) => {
                let ext = if hash.starts_with("a_") { "gif" } else { "png" };
                format!(
                    "https://cdn.discordapp.com/avatars/{}/{}.{}?size={}",
                    self.id, hash, ext, size
                )
            }
            None => format!(
                "https://cdn.discordapp.com/embed/avatars/{}.png",
                (self.id.get() >> 22) % 6
            ),
        }
    }
}

/// Data of a slash command invocation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CommandData {
    pub name: String,
    #[serde(default)]
    pub options: Vec<CommandOption>,
}

impl CommandData {
    /// Find a top-level option by name.
    pub fn option(&self, name: &str) -> Option<&CommandOption> {
        self.options.iter().find(|opt| opt.name == name)
    }
}

/// A top-level command option. Subcommand nesting is not decoded.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CommandOption {
    pub name: String,
    #[serde(default)]
    pub value: Option<Value>,
}

/// Data of a button click or select menu choice.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ComponentData {
    pub custom_id: String,
    #[serde(default, deserialize_with = "string_list")]
    pub values: Vec<String>,
}

impl ComponentData {
    /// First selected value of a select menu.
    pub fn first_value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }
}

/// Data of a submitted modal form.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModalData {
    pub custom_id: String,
    #[serde(default)]
    pub components: Vec<ModalRow>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModalRow {
    #[serde(default)]
    pub components: Vec<ModalField>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModalField {
    #[serde(default)]
    pub custom_id: String,
    #[serde(default)]
    pub value: Option<String>,
}

impl ModalData {
    /// Submitted value of the text input with the given custom id.
    pub fn value(&self, custom_id: &str) -> Option<&str> {
        self.components
            .iter()
            .flat_map(|row| row.components.iter())
            .find(|field| field.custom_id == custom_id)
            .and_then(|field| field.value.as_deref())
    }
}

/// What the user did.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionKind {
    Command(CommandData),
    Component(ComponentData),
    ModalSubmit(ModalData),
    /// Any kind the router does not handle (ping, autocomplete, future kinds).
    Other(u8),
}

impl InteractionKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Command(_) => "command",
            Self::Component(_) => "component",
            Self::ModalSubmit(_) => "modal",
            Self::Other(_) => "other",
        }
    }
}

/// A decoded inbound interaction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawInteraction")]
pub struct Interaction {
    pub id: InteractionId,
    pub token: String,
    pub guild_id: Option<GuildId>,
    /// The invoking user (`member.user` in guilds, `user` in DMs).
    pub user: User,
    pub kind: InteractionKind,
}

impl Interaction {
    /// Decode an interaction from its wire representation.
    pub fn from_value(value: Value) -> Result<Self, InteractionError> {
        let raw: RawInteraction = serde_json::from_value(value)?;
        Self::try_from(raw)
    }

    pub fn command(&self) -> Option<&CommandData> {
        match &self.kind {
            InteractionKind::Command(data) => Some(data),
            _ => None,
        }
    }

    pub fn component(&self) -> Option<&ComponentData> {
        match &self.kind {
            InteractionKind::Component(data) => Some(data),
            _ => None,
        }
    }

    pub fn modal(&self) -> Option<&ModalData> {
        match &self.kind {
            InteractionKind::ModalSubmit(data) => Some(data),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct RawInteraction {
    id: InteractionId,
    #[serde(default)]
    token: String,
    #[serde(rename = "type")]
    kind: InteractionType,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    guild_id: Option<GuildId>,
    #[serde(default)]
    member: Option<RawMember>,
    #[serde(default)]
    user: Option<User>,
}

#[derive(Deserialize)]
struct RawMember {
    #[serde(default)]
    user: Option<User>,
}

impl RawInteraction {
    fn decode_data<T: for<'de> Deserialize<'de>>(
        &mut self,
        kind: &'static str,
    ) -> Result<T, InteractionError> {
        let data = self
            .data
            .take()
            .filter(|data| !data.is_null())
            .ok_or(InteractionError::MissingData { kind, id: self.id })?;
        serde_json::from_value(data).map_err(|source| InteractionError::Data {
            kind,
            id: self.id,
            source,
        })
    }
}

impl TryFrom<RawInteraction> for Interaction {
    type Error = InteractionError;

    fn try_from(mut raw: RawInteraction) -> Result<Self, Self::Error> {
        let user = raw
            .member
            .take()
            .and_then(|member| member.user)
            .or_else(|| raw.user.take())
            .ok_or(InteractionError::MissingUser(raw.id))?;

        let kind = match raw.kind {
            InteractionType::Command => InteractionKind::Command(raw.decode_data("command")?),
            InteractionType::Component => InteractionKind::Component(raw.decode_data("component")?),
            InteractionType::Modal => InteractionKind::ModalSubmit(raw.decode_data("modal")?),
            other => InteractionKind::Other(other.into()),
        };

        Ok(Self {
            id: raw.id,
            token: raw.token,
            guild_id: raw.guild_id,
            user,
            kind,
        })
    }
}

fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(values
        .into_iter()
        .map(|value| match value {
            Value::String(s) => s,
            other => other.to_string(),
        })
        .collect())
}
