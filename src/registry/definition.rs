//! Slash command definitions.
//!
//! The registry only reads the name; everything else is handed to the
//! transport when commands are published.

pub use serenity::all::CommandOptionType as OptionKind;
use serenity::all::Permissions;

#[derive(Debug, Clone, PartialEq)]
pub struct CommandOptionDef {
    kind: OptionKind,
    name: String,
    description: String,
    required: bool,
}

impl CommandOptionDef {
    pub fn new(kind: OptionKind, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            description: description.into(),
            required: false,
        }
    }

    #[allow(dead_code)]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn kind(&self) -> OptionKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_required(&self) -> bool {
        self.required
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommandDefinition {
    name: String,
    description: String,
    options: Vec<CommandOptionDef>,
    default_member_permissions: Option<Permissions>,
    dm_permission: Option<bool>,
}

impl CommandDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            options: Vec::new(),
            default_member_permissions: None,
            dm_permission: None,
        }
    }

    pub fn option(mut self, option: CommandOptionDef) -> Self {
        self.options.push(option);
        self
    }

    /// Permissions a member needs to see the command by default.
    #[allow(dead_code)]
    pub fn default_member_permissions(mut self, permissions: Permissions) -> Self {
        self.default_member_permissions = Some(permissions);
        self
    }

    #[allow(dead_code)]
    pub fn dm_permission(mut self, allowed: bool) -> Self {
        self.dm_permission = Some(allowed);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn options(&self) -> &[CommandOptionDef] {
        &self.options
    }

    pub fn get_default_member_permissions(&self) -> Option<Permissions> {
        self.default_member_permissions
    }

    pub fn get_dm_permission(&self) -> Option<bool> {
        self.dm_permission
    }
}
