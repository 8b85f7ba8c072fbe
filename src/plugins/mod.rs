//! Plugin system for interaction handlers.
//!
//! Add new plugins by:
//! 1. Creating a new file in this directory
//! 2. Adding `pub mod your_plugin;` below
//! 3. Calling its `register` from `build_registry()`

pub mod access;
pub mod example;
pub mod ping;

use crate::registry::{Registry, RegistryError};

/// Build the registry with every plugin's commands, components and modals.
///
/// Fails on the first key registered twice.
pub fn build_registry() -> Result<Registry, RegistryError> {
    let mut registry = Registry::new();

    ping::register(&mut registry)?;
    example::register(&mut registry)?;
    access::register(&mut registry)?;

    Ok(registry)
}
