//! Outbound payload builders.
//!
//! Plain value types describing what a handler wants to send. The transport
//! turns them into serenity builders at the boundary. No I/O happens here.

pub mod colors;
mod component;
mod embed;
pub mod markdown;
mod response;

pub use component::{
    reload_row, ActionRow, Button, ButtonAction, ButtonStyle, Component, Emoji, SelectKind,
    SelectMenu, SelectOption, TextInput, TextInputStyle,
};
pub use embed::Embed;
pub use response::{InteractionResponse, MessagePayload, Modal};
