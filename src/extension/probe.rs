//! `probe`: built-in diagnostic source
//!
//! Reports the runtime layout the data command resolved and fails when the
//! runtime directory is unusable. Useful for checking a home directory before
//! installing real data source plugins.

use std::path::PathBuf;

use crate::application::Context;
use crate::domain::{Layout, Location, Logger};
use crate::extension::{DataExtension, ExtensionError, ExtensionResult};

pub const NAME: &str = "probe";
pub const ABOUT: &str = "Report the resolved runtime layout";

#[derive(Debug)]
pub struct ProbeExtension {
    logger: Logger,
    low_latency: bool,
    runtime_dir: PathBuf,
    archive_dir: PathBuf,
    locations: Vec<(&'static str, Location)>,
}

impl ProbeExtension {
    pub fn new(ctx: &Context) -> Self {
        Self {
            logger: ctx.logger().clone(),
            low_latency: ctx.low_latency(),
            runtime_dir: ctx.runtime_dir().to_path_buf(),
            archive_dir: ctx.archive_dir().to_path_buf(),
            locations: vec![
                ("config", ctx.config_location().clone()),
                ("console", ctx.console_location().clone()),
                ("index", ctx.index_location().clone()),
            ],
        }
    }

    pub fn factory(ctx: &Context) -> ExtensionResult<Box<dyn DataExtension>> {
        Ok(Box::new(Self::new(ctx)))
    }
}

impl DataExtension for ProbeExtension {
    fn run(&mut self) -> ExtensionResult<()> {
        let meta = std::fs::metadata(&self.runtime_dir).map_err(|e| {
            ExtensionError::io(
                NAME,
                format!("runtime dir {}", self.runtime_dir.display()),
                e,
            )
        })?;
        if !meta.is_dir() {
            return Err(ExtensionError::failed(
                NAME,
                format!("runtime dir is not a directory: {}", self.runtime_dir.display()),
            ));
        }

        self.logger
            .info(format!("runtime dir: {}", self.runtime_dir.display()));
        if self.archive_dir.is_dir() {
            self.logger
                .info(format!("archive dir: {}", self.archive_dir.display()));
        } else {
            self.logger.warn(format!(
                "archive dir missing: {}",
                self.archive_dir.display()
            ));
        }
        self.logger.info(format!("low latency: {}", self.low_latency));

        for (label, location) in &self.locations {
            let log_dir = location.layout_dir(Layout::Log);
            self.logger.info(format!(
                "{label}: {} (log dir {}, {})",
                location.uname(),
                log_dir.display(),
                if log_dir.is_dir() { "present" } else { "absent" }
            ));
        }
        Ok(())
    }
}
