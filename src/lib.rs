//! kfc data: command-line entry point for market data extensions
//!
//! `kfc data get -s <source>` builds a root [`application::Context`] for the
//! `data` group, derives a child context for `get`, resolves `<source>` in the
//! [`extension::ExtensionRegistry`] and runs the resulting extension once.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod extension;
pub mod infrastructure;
pub mod util;
