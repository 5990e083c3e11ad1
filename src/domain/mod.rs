//! Domain layer: runtime primitives
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod error;
pub mod location;
pub mod logger;

pub use error::DomainError;
pub use location::{Category, Layout, Location, Mode, RuntimeLocator};
pub use logger::{LogLevel, Logger};
