//! Data source extensions
//!
//! An extension is a runnable unit built from a [`Context`] by a factory
//! registered under a source name. The dispatcher only knows that a name
//! resolves to something runnable; what "fetching data" means is up to the
//! extension.

pub mod probe;
pub mod registry;

use std::sync::Arc;

use thiserror::Error;

use crate::application::Context;

pub use registry::{ExtensionRegistry, RegistryError};

/// Failure raised while constructing or running an extension.
#[derive(Error, Debug)]
pub enum ExtensionError {
    #[error("extension `{source_name}` failed: {message}")]
    Failed {
        source_name: String,
        message: String,
    },

    #[error("extension `{source_name}` I/O error: {context}")]
    Io {
        source_name: String,
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("extension `{source_name}` failed")]
    Other {
        source_name: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ExtensionError {
    pub fn failed(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Failed {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    pub fn io(
        source_name: impl Into<String>,
        context: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Self::Io {
            source_name: source_name.into(),
            context: context.into(),
            source,
        }
    }

    /// Wrap an error raised by a library the extension depends on.
    pub fn other(
        source_name: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Other {
            source_name: source_name.into(),
            source: source.into(),
        }
    }

    /// Name of the source whose extension raised this error.
    pub fn source_name(&self) -> &str {
        match self {
            Self::Failed { source_name, .. }
            | Self::Io { source_name, .. }
            | Self::Other { source_name, .. } => source_name,
        }
    }
}

/// Result type for extension operations.
pub type ExtensionResult<T> = Result<T, ExtensionError>;

/// A runnable data source.
///
/// `run` is called exactly once, synchronously, on the invoking thread.
pub trait DataExtension {
    fn run(&mut self) -> ExtensionResult<()>;
}

/// Builds a fresh extension for one invocation.
pub type ExtensionFactory =
    Arc<dyn Fn(&Context) -> ExtensionResult<Box<dyn DataExtension>> + Send + Sync>;

/// Registry holding the extensions compiled into this binary.
pub fn builtin_registry() -> Result<ExtensionRegistry, RegistryError> {
    let mut registry = ExtensionRegistry::new();
    registry.register(probe::NAME, probe::ABOUT, probe::ProbeExtension::factory)?;
    Ok(registry)
}
