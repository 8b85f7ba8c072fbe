//! Discord markdown helpers.

use chrono::{DateTime, Utc};
use serenity::all::Mentionable;

use crate::interaction::UserId;

pub fn bold(text: &str) -> String {
    format!("**{}**", text)
}

pub fn italic(text: &str) -> String {
    format!("*{}*", text)
}

pub fn spoiler(text: &str) -> String {
    format!("||{}||", text)
}

pub fn inline_code(text: &str) -> String {
    format!("`{}`", text)
}

pub fn mention(user: UserId) -> String {
    user.mention().to_string()
}

/// Client-rendered timestamp. `style` is one of `t T d D f F R`.
pub fn timestamp(at: DateTime<Utc>, style: char) -> String {
    format!("<t:{}:{}>", at.timestamp(), style)
}

/// "2 hours ago" style timestamp.
pub fn relative_time(at: DateTime<Utc>) -> String {
    timestamp(at, 'R')
}
