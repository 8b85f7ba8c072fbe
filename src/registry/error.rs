//! Registration errors.

use std::fmt;

use thiserror::Error;

/// The three independent key spaces of the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    Command,
    Component,
    Modal,
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Command => "command",
            Self::Component => "component",
            Self::Modal => "modal",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("{namespace} '{key}' is already registered")]
    DuplicateKey { namespace: Namespace, key: String },

    #[error("{namespace} key must not be empty")]
    EmptyKey { namespace: Namespace },
}
