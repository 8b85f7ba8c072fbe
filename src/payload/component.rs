//! Message components: buttons, select menus, text inputs and action rows.

/// Color of an interactive button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonStyle {
    Primary,
    Secondary,
    Success,
    Danger,
}

/// A unicode emoji shown next to a label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emoji(String);

impl Emoji {
    pub fn unicode(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

/// What a click on a button does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonAction {
    /// Sends a component interaction routed by `custom_id`.
    Interact { custom_id: String, style: ButtonStyle },
    /// Opens the url. Never reaches the bot.
    Link(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    action: ButtonAction,
    label: Option<String>,
    emoji: Option<Emoji>,
}

impl Button {
    /// A primary button routed by `custom_id`.
    pub fn new(custom_id: impl Into<String>) -> Self {
        Self {
            action: ButtonAction::Interact {
                custom_id: custom_id.into(),
                style: ButtonStyle::Primary,
            },
            label: None,
            emoji: None,
        }
    }

    pub fn link(url: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            action: ButtonAction::Link(url.into()),
            label: Some(label.into()),
            emoji: None,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// No effect on link buttons.
    pub fn style(mut self, new_style: ButtonStyle) -> Self {
        if let ButtonAction::Interact { style, .. } = &mut self.action {
            *style = new_style;
        }
        self
    }

    pub fn primary(self) -> Self {
        self.style(ButtonStyle::Primary)
    }

    pub fn secondary(self) -> Self {
        self.style(ButtonStyle::Secondary)
    }

    pub fn success(self) -> Self {
        self.style(ButtonStyle::Success)
    }

    pub fn danger(self) -> Self {
        self.style(ButtonStyle::Danger)
    }

    pub fn emoji(mut self, emoji: Emoji) -> Self {
        self.emoji = Some(emoji);
        self
    }

    pub fn action(&self) -> &ButtonAction {
        &self.action
    }

    pub fn get_label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn get_emoji(&self) -> Option<&Emoji> {
        self.emoji.as_ref()
    }

    #[allow(dead_code)]
    pub fn custom_id(&self) -> Option<&str> {
        match &self.action {
            ButtonAction::Interact { custom_id, .. } => Some(custom_id),
            ButtonAction::Link(_) => None,
        }
    }
}

/// Where a select menu's choices come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectKind {
    /// Options listed by the bot.
    String,
    /// Guild members, filled in by the client.
    User,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    label: String,
    value: String,
    description: Option<String>,
    emoji: Option<Emoji>,
    default: bool,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            description: None,
            emoji: None,
            default: false,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn emoji(mut self, emoji: Emoji) -> Self {
        self.emoji = Some(emoji);
        self
    }

    pub fn get_label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn get_description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn get_emoji(&self) -> Option<&Emoji> {
        self.emoji.as_ref()
    }

    pub fn is_default(&self) -> bool {
        self.default
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectMenu {
    kind: SelectKind,
    custom_id: String,
    placeholder: Option<String>,
    options: Vec<SelectOption>,
}

impl SelectMenu {
    fn with_kind(kind: SelectKind, custom_id: impl Into<String>) -> Self {
        Self {
            kind,
            custom_id: custom_id.into(),
            placeholder: None,
            options: Vec::new(),
        }
    }

    /// A select menu with bot-defined options.
    pub fn string(custom_id: impl Into<String>) -> Self {
        Self::with_kind(SelectKind::String, custom_id)
    }

    pub fn user(custom_id: impl Into<String>) -> Self {
        Self::with_kind(SelectKind::User, custom_id)
    }

    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }

    pub fn option(mut self, option: SelectOption) -> Self {
        self.options.push(option);
        self
    }

    /// Mark the option with `value` as the default choice, clearing any other.
    pub fn select(mut self, value: &str) -> Self {
        for option in &mut self.options {
            option.default = option.value == value;
        }
        self
    }

    pub fn kind(&self) -> SelectKind {
        self.kind
    }

    pub fn custom_id(&self) -> &str {
        &self.custom_id
    }

    pub fn get_placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextInputStyle {
    Short,
    Paragraph,
}

/// A required modal text field.
#[derive(Debug, Clone, PartialEq)]
pub struct TextInput {
    custom_id: String,
    label: String,
    style: TextInputStyle,
    placeholder: Option<String>,
    min_length: Option<u16>,
    max_length: Option<u16>,
}

impl TextInput {
    /// A single-line input.
    pub fn short(custom_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            custom_id: custom_id.into(),
            label: label.into(),
            style: TextInputStyle::Short,
            placeholder: None,
            min_length: None,
            max_length: None,
        }
    }

    /// A multi-line input.
    pub fn paragraph(custom_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            style: TextInputStyle::Paragraph,
            ..Self::short(custom_id, label)
        }
    }

    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }

    pub fn min_length(mut self, min: u16) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn max_length(mut self, max: u16) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn custom_id(&self) -> &str {
        &self.custom_id
    }

    pub fn get_label(&self) -> &str {
        &self.label
    }

    pub fn get_style(&self) -> TextInputStyle {
        self.style
    }

    pub fn get_placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    /// Allowed length range, each bound optional.
    pub fn length(&self) -> (Option<u16>, Option<u16>) {
        (self.min_length, self.max_length)
    }
}

/// Anything that can sit inside an action row.
#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    Button(Button),
    Select(SelectMenu),
    TextInput(TextInput),
}

impl From<Button> for Component {
    fn from(button: Button) -> Self {
        Self::Button(button)
    }
}

impl From<SelectMenu> for Component {
    fn from(menu: SelectMenu) -> Self {
        Self::Select(menu)
    }
}

impl From<TextInput> for Component {
    fn from(input: TextInput) -> Self {
        Self::TextInput(input)
    }
}

/// Top-level layout container. Holds up to five buttons or one select/input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionRow {
    components: Vec<Component>,
}

impl ActionRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// A row holding a single component.
    pub fn single(component: impl Into<Component>) -> Self {
        Self::new().push(component)
    }

    pub fn push(mut self, component: impl Into<Component>) -> Self {
        self.components.push(component.into());
        self
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }
}

/// A row with a single secondary "Reload" button.
pub fn reload_row(custom_id: &str) -> ActionRow {
    ActionRow::single(
        Button::new(custom_id)
            .label("Reload")
            .secondary()
            .emoji(Emoji::unicode("🔄")),
    )
}
