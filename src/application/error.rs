//! Application-level errors (wraps domain, registry and extension errors)

use thiserror::Error;

use crate::domain::DomainError;
use crate::extension::{ExtensionError, RegistryError};

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("config error: {message}")]
    Config { message: String },

    #[error("configuration error: `{command}` has no parent context")]
    MissingParent { command: String },

    #[error("log setup failed for {location}")]
    LogSetup {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Registry(#[from] RegistryError),

    #[error("{0}")]
    Extension(#[from] ExtensionError),
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
