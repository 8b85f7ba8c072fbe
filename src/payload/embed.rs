//! Embed builder.

use std::time::Duration;

use chrono::{DateTime, Utc};

use super::colors;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Embed {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    color: Option<u32>,
    timestamp: Option<DateTime<Utc>>,
    footer: Option<EmbedFooter>,
    author: Option<EmbedAuthor>,
    thumbnail: Option<String>,
    image: Option<String>,
    fields: Vec<EmbedField>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmbedFooter {
    pub text: String,
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmbedAuthor {
    pub name: String,
    pub icon_url: Option<String>,
}

impl Embed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }

    /// Stamp the embed with the current time.
    pub fn timestamp(mut self) -> Self {
        self.timestamp = Some(Utc::now());
        self
    }

    pub fn footer(mut self, text: impl Into<String>) -> Self {
        self.footer = Some(EmbedFooter {
            text: text.into(),
            icon_url: None,
        });
        self
    }

    pub fn footer_with_icon(mut self, text: impl Into<String>, icon_url: impl Into<String>) -> Self {
        self.footer = Some(EmbedFooter {
            text: text.into(),
            icon_url: Some(icon_url.into()),
        });
        self
    }

    pub fn author_with_icon(mut self, name: impl Into<String>, icon_url: impl Into<String>) -> Self {
        self.author = Some(EmbedAuthor {
            name: name.into(),
            icon_url: Some(icon_url.into()),
        });
        self
    }

    pub fn thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail = Some(url.into());
        self
    }

    pub fn image(mut self, url: impl Into<String>) -> Self {
        self.image = Some(url.into());
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    pub fn inline_field(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.field(name, value, true)
    }

    pub fn block_field(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.field(name, value, false)
    }

    pub fn fields(&self) -> &[EmbedField] {
        &self.fields
    }

    pub fn get_title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn get_description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn get_url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn get_color(&self) -> Option<u32> {
        self.color
    }

    pub fn get_timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }

    pub fn get_footer(&self) -> Option<&EmbedFooter> {
        self.footer.as_ref()
    }

    pub fn get_author(&self) -> Option<&EmbedAuthor> {
        self.author.as_ref()
    }

    pub fn get_thumbnail(&self) -> Option<&str> {
        self.thumbnail.as_deref()
    }

    pub fn get_image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    // Presets

    #[allow(dead_code)]
    pub fn success(title: &str, description: &str) -> Self {
        Self::status("✅", title, description, colors::SUCCESS)
    }

    pub fn error(title: &str, description: &str) -> Self {
        Self::status("❌", title, description, colors::ERROR)
    }

    #[allow(dead_code)]
    pub fn warning(title: &str, description: &str) -> Self {
        Self::status("⚠️", title, description, colors::WARNING)
    }

    #[allow(dead_code)]
    pub fn info(title: &str, description: &str) -> Self {
        Self::status("ℹ️", title, description, colors::INFO)
    }

    #[allow(dead_code)]
    pub fn loading(message: &str) -> Self {
        Self::new()
            .description(format!("⏳ {}", message))
            .color(colors::GREY)
    }

    /// Latency report. The gateway figure is omitted when unknown.
    pub fn ping(roundtrip: Duration, gateway: Option<Duration>) -> Self {
        let embed = Self::new()
            .title("🏓 Pong!")
            .color(colors::SUCCESS)
            .inline_field("Roundtrip", format!("`{}ms`", roundtrip.as_millis()));
        let embed = match gateway {
            Some(latency) => embed.inline_field("Gateway", format!("`{}ms`", latency.as_millis())),
            None => embed,
        };
        embed.timestamp()
    }

    fn status(icon: &str, title: &str, description: &str, color: u32) -> Self {
        Self::new()
            .title(format!("{} {}", icon, title))
            .description(description)
            .color(color)
            .timestamp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_carry_icon_and_color() {
        let embed = Embed::warning("Careful", "Mind the gap");
        assert_eq!(embed.get_title(), Some("⚠️ Careful"));
        assert_eq!(embed.get_color(), Some(colors::WARNING));
        assert!(embed.get_timestamp().is_some());

        let embed = Embed::loading("Fetching");
        assert_eq!(embed.get_description(), Some("⏳ Fetching"));
        assert_eq!(embed.get_timestamp(), None);
    }

    #[test]
    fn test_fields_keep_order() {
        let embed = Embed::new()
            .inline_field("a", "1")
            .block_field("b", "2");
        let fields = embed.fields();
        assert_eq!(fields.len(), 2);
        assert!(fields[0].inline);
        assert!(!fields[1].inline);
    }

    #[test]
    fn test_ping_without_gateway() {
        let embed = Embed::ping(Duration::from_millis(42), None);
        assert_eq!(embed.fields().len(), 1);
        assert_eq!(embed.fields()[0].value, "`42ms`");
    }
}
