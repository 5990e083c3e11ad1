//! Application services
//!
//! Concrete service implementations that orchestrate the command tree.
//! Services depend on I/O boundary traits (LoggerFactory, RuntimeLog)
//! but are themselves concrete structs, not traits.

mod data;

pub use data::{DataGroup, DataService, DATA_GROUP};
