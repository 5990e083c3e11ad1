//! Application layer: contexts and command services
//!
//! This layer orchestrates domain logic and depends on I/O boundary traits.

pub mod context;
pub mod error;
pub mod services;

pub use context::{Context, ProcessContext};
pub use error::{ApplicationError, ApplicationResult};
