//! Interaction registry.
//!
//! Maps routing keys to handlers in three independent namespaces:
//!
//! - command name → (definition, handler), kept in registration order
//! - component custom id → handler
//! - modal custom id → handler
//!
//! The registry is built once in `main` before the client connects and is
//! shared read-only afterwards (`Arc<Registry>`), so lookups never lock.
//! Registering a key twice in the same namespace is rejected.

mod definition;
mod error;
mod handler;

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::debug;

pub use definition::{CommandDefinition, CommandOptionDef, OptionKind};
pub use error::{Namespace, RegistryError};
pub use handler::{handler, Handler, HandlerContext, HandlerFuture, HandlerResult};

/// A slash command with its published definition.
pub struct CommandEntry {
    definition: CommandDefinition,
    handler: Handler,
}

impl CommandEntry {
    pub fn name(&self) -> &str {
        self.definition.name()
    }

    pub fn definition(&self) -> &CommandDefinition {
        &self.definition
    }

    pub fn handler(&self) -> &Handler {
        &self.handler
    }
}

#[derive(Default)]
pub struct Registry {
    commands: Vec<CommandEntry>,
    command_index: HashMap<String, usize>,
    components: HashMap<String, Handler>,
    modals: HashMap<String, Handler>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a slash command under its definition's name.
    pub fn register_command(
        &mut self,
        definition: CommandDefinition,
        handler: Handler,
    ) -> Result<(), RegistryError> {
        let name = definition.name().to_string();
        if name.is_empty() {
            return Err(RegistryError::EmptyKey {
                namespace: Namespace::Command,
            });
        }

        match self.command_index.entry(name) {
            Entry::Occupied(entry) => Err(RegistryError::DuplicateKey {
                namespace: Namespace::Command,
                key: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                debug!("Registered command: /{}", entry.key());
                entry.insert(self.commands.len());
                self.commands.push(CommandEntry {
                    definition,
                    handler,
                });
                Ok(())
            }
        }
    }

    /// Register a button or select menu handler by custom id.
    pub fn register_component(
        &mut self,
        custom_id: impl Into<String>,
        handler: Handler,
    ) -> Result<(), RegistryError> {
        insert_handler(&mut self.components, Namespace::Component, custom_id.into(), handler)
    }

    /// Register a modal submission handler by custom id.
    pub fn register_modal(
        &mut self,
        custom_id: impl Into<String>,
        handler: Handler,
    ) -> Result<(), RegistryError> {
        insert_handler(&mut self.modals, Namespace::Modal, custom_id.into(), handler)
    }

    /// Command definitions in registration order, for publication.
    pub fn definitions(&self) -> Vec<&CommandDefinition> {
        self.commands.iter().map(CommandEntry::definition).collect()
    }

    pub fn lookup_command(&self, name: &str) -> Option<&Handler> {
        self.command_index
            .get(name)
            .and_then(|&index| self.commands.get(index))
            .map(CommandEntry::handler)
    }

    pub fn lookup_component(&self, custom_id: &str) -> Option<&Handler> {
        self.components.get(custom_id)
    }

    pub fn lookup_modal(&self, custom_id: &str) -> Option<&Handler> {
        self.modals.get(custom_id)
    }

    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub fn modal_count(&self) -> usize {
        self.modals.len()
    }
}

fn insert_handler(
    map: &mut HashMap<String, Handler>,
    namespace: Namespace,
    key: String,
    handler: Handler,
) -> Result<(), RegistryError> {
    if key.is_empty() {
        return Err(RegistryError::EmptyKey { namespace });
    }

    match map.entry(key) {
        Entry::Occupied(entry) => Err(RegistryError::DuplicateKey {
            namespace,
            key: entry.key().clone(),
        }),
        Entry::Vacant(entry) => {
            debug!("Registered {}: {}", namespace, entry.key());
            entry.insert(handler);
            Ok(())
        }
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("commands", &self.commands.iter().map(CommandEntry::name).collect::<Vec<_>>())
            .field("components", &self.components.keys().collect::<Vec<_>>())
            .field("modals", &self.modals.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn noop() -> Handler {
        handler(|_, _| async { Ok(()) })
    }

    #[test]
    fn test_lookup_returns_registered_handler() {
        let mut registry = Registry::new();
        let ping = noop();
        let example = noop();
        registry
            .register_command(CommandDefinition::new("ping", "Pong"), ping.clone())
            .unwrap();
        registry
            .register_command(CommandDefinition::new("example", "Demo"), example.clone())
            .unwrap();

        assert!(Arc::ptr_eq(registry.lookup_command("ping").unwrap(), &ping));
        assert!(Arc::ptr_eq(registry.lookup_command("example").unwrap(), &example));
    }

    #[test]
    fn test_unknown_keys_are_not_found() {
        let mut registry = Registry::new();
        registry.register_component("ping_reload", noop()).unwrap();

        assert!(registry.lookup_command("ping_reload").is_none());
        assert!(registry.lookup_component("unknown_button").is_none());
        assert!(registry.lookup_modal("ping_reload").is_none());
        assert!(registry.lookup_command("").is_none());
    }

    #[test]
    fn test_duplicates_are_rejected_per_namespace() {
        let mut registry = Registry::new();
        registry
            .register_command(CommandDefinition::new("ping", "Pong"), noop())
            .unwrap();
        registry.register_component("same", noop()).unwrap();
        registry.register_modal("same", noop()).unwrap();

        assert_eq!(
            registry.register_command(CommandDefinition::new("ping", "Again"), noop()),
            Err(RegistryError::DuplicateKey {
                namespace: Namespace::Command,
                key: "ping".into()
            })
        );
        assert_eq!(
            registry.register_component("same", noop()),
            Err(RegistryError::DuplicateKey {
                namespace: Namespace::Component,
                key: "same".into()
            })
        );
        assert!(matches!(
            registry.register_modal("same", noop()),
            Err(RegistryError::DuplicateKey { namespace: Namespace::Modal, .. })
        ));

        // The first registration survives.
        assert_eq!(registry.command_count(), 1);
        assert_eq!(registry.definitions()[0].description(), "Pong");
    }

    #[test]
    fn test_namespaces_are_disjoint() {
        let mut registry = Registry::new();
        let command = noop();
        let component = noop();
        registry
            .register_command(CommandDefinition::new("shared", "cmd"), command.clone())
            .unwrap();
        registry.register_component("shared", component.clone()).unwrap();

        assert!(Arc::ptr_eq(registry.lookup_command("shared").unwrap(), &command));
        assert!(Arc::ptr_eq(registry.lookup_component("shared").unwrap(), &component));
        assert!(registry.lookup_modal("shared").is_none());
    }

    #[test]
    fn test_empty_keys_are_rejected() {
        let mut registry = Registry::new();
        assert_eq!(
            registry.register_command(CommandDefinition::new("", "nameless"), noop()),
            Err(RegistryError::EmptyKey { namespace: Namespace::Command })
        );
        assert_eq!(
            registry.register_modal("", noop()),
            Err(RegistryError::EmptyKey { namespace: Namespace::Modal })
        );
    }

    #[test]
    fn test_definitions_keep_registration_order() {
        let mut registry = Registry::new();
        for name in ["zeta", "alpha", "mid"] {
            registry
                .register_command(CommandDefinition::new(name, "x"), noop())
                .unwrap();
        }

        let names = |r: &Registry| r.definitions().iter().map(|d| d.name().to_string()).collect::<Vec<_>>();
        assert_eq!(names(&registry), ["zeta", "alpha", "mid"]);
        assert_eq!(names(&registry), names(&registry));
    }

    #[test]
    fn test_shared_handler_under_many_ids() {
        let mut registry = Registry::new();
        let button = noop();
        for id in ["example_primary", "example_secondary"] {
            registry.register_component(id, button.clone()).unwrap();
        }

        assert_eq!(registry.component_count(), 2);
        assert!(Arc::ptr_eq(
            registry.lookup_component("example_primary").unwrap(),
            registry.lookup_component("example_secondary").unwrap()
        ));
    }
}
