//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent invalid runtime values.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("invalid location {field}: {value:?}")]
    InvalidLocation { field: &'static str, value: String },

    #[error("invalid log level: {0} (expected trace, debug, info, warning, error or critical)")]
    InvalidLogLevel(String),
}
