//! Name to factory mapping for data source extensions

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::application::Context;
use crate::extension::{DataExtension, ExtensionFactory, ExtensionResult};

/// Registration and lookup errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("invalid source name: {0:?}")]
    InvalidName(String),

    #[error("source already registered: {0}")]
    Duplicate(String),

    #[error("source not registered: {0}")]
    NotRegistered(String),
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

struct Entry {
    about: String,
    factory: ExtensionFactory,
}

/// Read-only (after startup) mapping from source name to extension factory.
///
/// Names are kept sorted; [`ExtensionRegistry::names`] is the exact set of
/// values the `--source` option accepts.
#[derive(Default)]
pub struct ExtensionRegistry {
    entries: BTreeMap<String, Entry>,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under `name`.
    ///
    /// Names are lowercase ASCII letters, digits, `-` and `_`, starting with a letter.
    pub fn register<F>(
        &mut self,
        name: impl Into<String>,
        about: impl Into<String>,
        factory: F,
    ) -> RegistryResult<()>
    where
        F: Fn(&Context) -> ExtensionResult<Box<dyn DataExtension>> + Send + Sync + 'static,
    {
        let name = name.into();
        if !is_valid_name(&name) {
            return Err(RegistryError::InvalidName(name));
        }
        if self.entries.contains_key(&name) {
            return Err(RegistryError::Duplicate(name));
        }
        tracing::debug!(source = %name, "registered data extension");
        self.entries.insert(
            name,
            Entry {
                about: about.into(),
                factory: Arc::new(factory),
            },
        );
        Ok(())
    }

    /// Sorted source names.
    pub fn names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Sorted `(name, about)` pairs.
    pub fn describe(&self) -> Vec<(&str, &str)> {
        self.entries
            .iter()
            .map(|(name, entry)| (name.as_str(), entry.about.as_str()))
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Factory registered under `name`.
    ///
    /// Callers pass names already validated against [`ExtensionRegistry::names`];
    /// an unknown name is reported rather than trusted.
    pub fn get_extension(&self, name: &str) -> RegistryResult<ExtensionFactory> {
        self.entries
            .get(name)
            .map(|entry| Arc::clone(&entry.factory))
            .ok_or_else(|| RegistryError::NotRegistered(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for ExtensionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionRegistry")
            .field("names", &self.names())
            .finish()
    }
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_lowercase() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
}
