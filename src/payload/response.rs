//! Interaction responses.

use super::component::{ActionRow, TextInput};
use super::embed::Embed;

/// Message content for initial responses, updates and edits.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessagePayload {
    content: Option<String>,
    embeds: Vec<Embed>,
    components: Vec<ActionRow>,
    ephemeral: bool,
}

impl MessagePayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn embed(mut self, embed: Embed) -> Self {
        self.embeds.push(embed);
        self
    }

    pub fn components(mut self, rows: impl IntoIterator<Item = ActionRow>) -> Self {
        self.components.extend(rows);
        self
    }

    /// Only the invoking user sees the message. Ignored on edits.
    pub fn ephemeral(mut self) -> Self {
        self.ephemeral = true;
        self
    }

    pub fn is_ephemeral(&self) -> bool {
        self.ephemeral
    }

    pub fn get_content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn get_embeds(&self) -> &[Embed] {
        &self.embeds
    }

    pub fn get_components(&self) -> &[ActionRow] {
        &self.components
    }
}

/// A popup form.
#[derive(Debug, Clone, PartialEq)]
pub struct Modal {
    custom_id: String,
    title: String,
    inputs: Vec<TextInput>,
}

impl Modal {
    pub fn new(custom_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            custom_id: custom_id.into(),
            title: title.into(),
            inputs: Vec::new(),
        }
    }

    /// Add a text input. Each input gets its own row.
    pub fn input(mut self, input: TextInput) -> Self {
        self.inputs.push(input);
        self
    }

    pub fn custom_id(&self) -> &str {
        &self.custom_id
    }

    pub fn get_title(&self) -> &str {
        &self.title
    }

    pub fn inputs(&self) -> &[TextInput] {
        &self.inputs
    }
}

/// The initial answer to an interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionResponse {
    /// Reply with a new message.
    Message(MessagePayload),
    /// Show "thinking..." and edit the reply later.
    DeferredMessage,
    /// Acknowledge a component click and edit its message later.
    DeferredUpdate,
    /// Replace the message the component is attached to.
    UpdateMessage(MessagePayload),
    Modal(Modal),
}

impl InteractionResponse {
    #[allow(dead_code)]
    pub fn payload(&self) -> Option<&MessagePayload> {
        match self {
            Self::Message(payload) | Self::UpdateMessage(payload) => Some(payload),
            _ => None,
        }
    }
}
