//! Interactive feature tour.
//!
//! `/example` opens a message with a navigation select. Each page shows off
//! one family of payload builders: embeds, buttons, select menus and modals.

use anyhow::{bail, Context as _};
use chrono::{Duration, Utc};

use crate::interaction::{Interaction, User, UserId};
use crate::payload::{
    colors, markdown, reload_row, ActionRow, Button, Embed, Emoji, InteractionResponse,
    MessagePayload, Modal, SelectMenu, SelectOption, TextInput,
};
use crate::registry::{handler, CommandDefinition, HandlerContext, Registry, RegistryError};

pub const NAV_ID: &str = "example_nav";
pub const RELOAD_ID: &str = "example_reload";
pub const COLOR_SELECT_ID: &str = "example_color_select";
pub const USER_SELECT_ID: &str = "example_user_select";
pub const OPEN_MODAL_ID: &str = "example_open_modal";
pub const MODAL_ID: &str = "example_modal";

pub const MODAL_TITLE_FIELD: &str = "modal_title";
pub const MODAL_MESSAGE_FIELD: &str = "modal_message";

/// Demo buttons by custom id, with the style name they announce.
const BUTTONS: [(&str, &str); 4] = [
    ("example_primary", "Primary"),
    ("example_secondary", "Secondary"),
    ("example_success", "Success"),
    ("example_danger", "Danger"),
];

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.register_command(
        CommandDefinition::new("example", "Interactive demo of all template features"),
        handler(example_command),
    )?;

    registry.register_component(NAV_ID, handler(nav_select))?;
    registry.register_component(RELOAD_ID, handler(reload_button))?;

    let button = handler(style_button);
    for (custom_id, _) in BUTTONS {
        registry.register_component(custom_id, button.clone())?;
    }

    registry.register_component(COLOR_SELECT_ID, handler(color_select))?;
    registry.register_component(USER_SELECT_ID, handler(user_select))?;
    registry.register_component(OPEN_MODAL_ID, handler(open_modal))?;
    registry.register_modal(MODAL_ID, handler(modal_submit))?;
    Ok(())
}

/// Pages reachable from the navigation select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Embed,
    Buttons,
    Selects,
    Modal,
}

impl Page {
    pub fn value(self) -> &'static str {
        match self {
            Self::Embed => "embed",
            Self::Buttons => "buttons",
            Self::Selects => "selects",
            Self::Modal => "modal",
        }
    }

    /// Unknown values fall back to the embed page.
    pub fn from_value(value: &str) -> Self {
        match value {
            "buttons" => Self::Buttons,
            "selects" => Self::Selects,
            "modal" => Self::Modal,
            _ => Self::Embed,
        }
    }

    pub fn render(self, user: &User) -> MessagePayload {
        let (embed, rows) = match self {
            Self::Embed => embed_page(user),
            Self::Buttons => buttons_page(),
            Self::Selects => selects_page(),
            Self::Modal => modal_page(),
        };
        MessagePayload::new().embed(embed).components(rows)
    }
}

fn nav_row(current: Page) -> ActionRow {
    let menu = SelectMenu::string(NAV_ID)
        .placeholder("Select a demo...")
        .option(
            SelectOption::new("Embed Features", Page::Embed.value())
                .description("Rich embed with all features")
                .emoji(Emoji::unicode("📝")),
        )
        .option(
            SelectOption::new("Buttons", Page::Buttons.value())
                .description("All button styles")
                .emoji(Emoji::unicode("🔘")),
        )
        .option(
            SelectOption::new("Select Menus", Page::Selects.value())
                .description("Dropdown menus")
                .emoji(Emoji::unicode("📋")),
        )
        .option(
            SelectOption::new("Modal Form", Page::Modal.value())
                .description("Popup form demo")
                .emoji(Emoji::unicode("📝")),
        )
        .select(current.value());

    ActionRow::single(menu)
}

fn embed_page(user: &User) -> (Embed, Vec<ActionRow>) {
    let description = format!(
        "This embed demonstrates all available features:\n\n{}, {}, {}, {}\n\nMention: {}",
        markdown::bold("Bold"),
        markdown::italic("Italic"),
        markdown::inline_code("Code"),
        markdown::spoiler("Spoiler"),
        markdown::mention(user.id),
    );

    let embed = Embed::new()
        .title("Embed Features Demo")
        .url("https://discord.com")
        .description(description)
        .color(colors::FUCHSIA)
        .author_with_icon(user.display_name(), user.avatar_url(32))
        .thumbnail(user.avatar_url(128))
        .inline_field("Inline 1", "Value")
        .inline_field("Inline 2", "Value")
        .inline_field("Inline 3", "Value")
        .block_field("Block Field", "This takes full width")
        .block_field("Relative Time", markdown::relative_time(Utc::now() - Duration::hours(2)))
        .image("https://cdn-icons-png.flaticon.com/512/5277/5277459.png")
        .footer("Footer Text")
        .timestamp();

    (embed, vec![nav_row(Page::Embed), reload_row(RELOAD_ID)])
}

fn buttons_page() -> (Embed, Vec<ActionRow>) {
    let embed = Embed::new()
        .title("Button Styles Demo")
        .description(
            "Click any button to see it in action.\n\n\
             **Available styles:**\n\
             • Primary (Blue)\n\
             • Secondary (Gray)\n\
             • Success (Green)\n\
             • Danger (Red)\n\
             • Link (External URL)",
        )
        .color(colors::BLURPLE);

    let [primary, secondary, success, danger] = BUTTONS;
    let buttons = ActionRow::new()
        .push(Button::new(primary.0).label(primary.1).primary())
        .push(Button::new(secondary.0).label(secondary.1).secondary())
        .push(Button::new(success.0).label(success.1).success())
        .push(Button::new(danger.0).label(danger.1).danger())
        .push(Button::link("https://discord.com", "Link"));

    (embed, vec![nav_row(Page::Buttons), buttons])
}

fn selects_page() -> (Embed, Vec<ActionRow>) {
    let embed = Embed::new()
        .title("Select Menu Demo")
        .description(
            "**Available select types:**\n\
             • String Select - Custom options\n\
             • User Select - Pick a user\n\n\
             Try the menus below!",
        )
        .color(colors::GREEN);

    let color_select = SelectMenu::string(COLOR_SELECT_ID)
        .placeholder("Pick a color...")
        .option(color_option("Red", "red", "Warm and passionate", "🔴"))
        .option(color_option("Green", "green", "Nature and growth", "🟢"))
        .option(color_option("Blue", "blue", "Calm and peaceful", "🔵"))
        .option(color_option("Purple", "purple", "Royal and creative", "🟣"));

    let user_select = SelectMenu::user(USER_SELECT_ID).placeholder("Pick a user...");

    (
        embed,
        vec![
            nav_row(Page::Selects),
            ActionRow::single(color_select),
            ActionRow::single(user_select),
        ],
    )
}

fn color_option(label: &str, value: &str, description: &str, emoji: &str) -> SelectOption {
    SelectOption::new(label, value)
        .description(description)
        .emoji(Emoji::unicode(emoji))
}

fn modal_page() -> (Embed, Vec<ActionRow>) {
    let embed = Embed::new()
        .title("Modal Form Demo")
        .description(
            "Modals are popup forms that collect user input.\n\n\
             **Features:**\n\
             • Short text input (single line)\n\
             • Paragraph input (multi-line)\n\
             • Required fields\n\
             • Min/Max length validation\n\n\
             Click the button below to try it!",
        )
        .color(colors::GOLD);

    let open = Button::new(OPEN_MODAL_ID)
        .label("Open Form")
        .primary()
        .emoji(Emoji::unicode("📝"));

    (embed, vec![nav_row(Page::Modal), ActionRow::single(open)])
}

fn ephemeral_embed(embed: Embed) -> InteractionResponse {
    InteractionResponse::Message(MessagePayload::new().embed(embed).ephemeral())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// Handlers

pub async fn example_command(ctx: HandlerContext, interaction: Interaction) -> anyhow::Result<()> {
    let payload = Page::Embed.render(&interaction.user);
    ctx.respond(&interaction, InteractionResponse::Message(payload)).await?;
    Ok(())
}

pub async fn nav_select(ctx: HandlerContext, interaction: Interaction) -> anyhow::Result<()> {
    let selected = interaction
        .component()
        .and_then(|data| data.first_value())
        .unwrap_or_default();

    let payload = Page::from_value(selected).render(&interaction.user);
    ctx.respond(&interaction, InteractionResponse::UpdateMessage(payload)).await?;
    Ok(())
}

pub async fn reload_button(ctx: HandlerContext, interaction: Interaction) -> anyhow::Result<()> {
    let payload = Page::Embed.render(&interaction.user);
    ctx.respond(&interaction, InteractionResponse::UpdateMessage(payload)).await?;
    Ok(())
}

pub async fn style_button(ctx: HandlerContext, interaction: Interaction) -> anyhow::Result<()> {
    let custom_id = interaction
        .component()
        .map(|data| data.custom_id.as_str())
        .unwrap_or_default();

    let Some(style) = BUTTONS
        .iter()
        .find(|(id, _)| *id == custom_id)
        .map(|(_, style)| *style)
    else {
        bail!("unexpected button '{}'", custom_id);
    };

    let embed = Embed::new()
        .description(format!("You clicked the {} button!", markdown::bold(style)))
        .color(colors::BLURPLE);

    ctx.respond(&interaction, ephemeral_embed(embed)).await?;
    Ok(())
}

pub async fn color_select(ctx: HandlerContext, interaction: Interaction) -> anyhow::Result<()> {
    let selected = interaction
        .component()
        .and_then(|data| data.first_value())
        .context("color select submitted without a value")?;

    let color = colors::by_name(selected).unwrap_or(colors::DEFAULT);
    let embed = Embed::new()
        .description(format!("You selected {}!", markdown::bold(&capitalize(selected))))
        .color(color);

    ctx.respond(&interaction, ephemeral_embed(embed)).await?;
    Ok(())
}

pub async fn user_select(ctx: HandlerContext, interaction: Interaction) -> anyhow::Result<()> {
    let selected = interaction
        .component()
        .and_then(|data| data.first_value())
        .context("user select submitted without a value")?;
    let user: UserId = selected
        .parse()
        .with_context(|| format!("'{}' is not a user id", selected))?;

    let embed = Embed::new()
        .description(format!("You selected {}!", markdown::mention(user)))
        .color(colors::BLURPLE);

    ctx.respond(&interaction, ephemeral_embed(embed)).await?;
    Ok(())
}

pub async fn open_modal(ctx: HandlerContext, interaction: Interaction) -> anyhow::Result<()> {
    let modal = Modal::new(MODAL_ID, "Example Form")
        .input(
            TextInput::short(MODAL_TITLE_FIELD, "Title")
                .placeholder("Enter a title...")
                .max_length(100),
        )
        .input(
            TextInput::paragraph(MODAL_MESSAGE_FIELD, "Message")
                .placeholder("Enter your message...")
                .min_length(10)
                .max_length(500),
        );

    ctx.respond(&interaction, InteractionResponse::Modal(modal)).await?;
    Ok(())
}

pub async fn modal_submit(ctx: HandlerContext, interaction: Interaction) -> anyhow::Result<()> {
    let data = interaction.modal().context("not a modal submission")?;
    let title = data.value(MODAL_TITLE_FIELD).unwrap_or_default();
    let message = data.value(MODAL_MESSAGE_FIELD).unwrap_or_default();

    let user = &interaction.user;
    let embed = Embed::new()
        .title("Form Submitted!")
        .color(colors::SUCCESS)
        .block_field("Title", title)
        .block_field("Message", message)
        .footer_with_icon(format!("By {}", user.username), user.avatar_url(32))
        .timestamp();

    ctx.respond(&interaction, ephemeral_embed(embed)).await?;
    Ok(())
}
