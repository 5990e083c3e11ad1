//! Execution contexts passed down the command tree
//!
//! [`ProcessContext`] is what the top-level command resolves from settings
//! and flags. A command group turns it into a root [`Context`]; subcommands
//! derive child contexts from their parent. Contexts are immutable once built.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::application::{ApplicationError, ApplicationResult};
use crate::config::Settings;
use crate::domain::{Category, Location, LogLevel, Logger, Mode, RuntimeLocator};
use crate::infrastructure::traits::{LoggerFactory, RuntimeLog};

/// Process-level state resolved by the top-level command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessContext {
    pub log_level: LogLevel,
    pub runtime_dir: PathBuf,
    pub archive_dir: PathBuf,
    pub runtime_locator: RuntimeLocator,
    pub config_location: Location,
    pub console_location: Location,
    pub index_location: Location,
}

impl ProcessContext {
    /// Derive runtime paths and system locations from a home directory.
    pub fn from_home(home: impl Into<PathBuf>, log_level: LogLevel) -> ApplicationResult<Self> {
        let home = home.into();
        let runtime_dir = home.join("runtime");
        let archive_dir = home.join("archive");
        let runtime_locator = RuntimeLocator::new(runtime_dir.clone());

        let system = |group: &str, name: &str| {
            Location::new(
                Mode::Live,
                Category::System,
                group,
                name,
                runtime_locator.clone(),
            )
        };
        let config_location = system("etc", "kungfu")?;
        let console_location = system("service", "console")?;
        let index_location = system("journal", "index")?;

        Ok(Self {
            log_level,
            runtime_dir,
            archive_dir,
            runtime_locator,
            config_location,
            console_location,
            index_location,
        })
    }

    pub fn from_settings(settings: &Settings) -> ApplicationResult<Self> {
        Self::from_home(settings.home.clone(), settings.log_level)
    }
}

/// Configuration snapshot for one command invocation.
#[derive(Debug, Clone)]
pub struct Context {
    logger: Logger,
    low_latency: bool,
    runtime_dir: PathBuf,
    archive_dir: PathBuf,
    runtime_locator: RuntimeLocator,
    config_location: Location,
    console_location: Location,
    index_location: Location,
    parent: Option<Arc<Context>>,
}

impl Context {
    /// Root context of the `label` command group.
    ///
    /// Creates a logger named `label` and sets up runtime logging for the
    /// console location. Low-latency mode is always off at the root.
    pub fn root(
        label: &str,
        process: &ProcessContext,
        loggers: &dyn LoggerFactory,
        runtime_log: &dyn RuntimeLog,
    ) -> ApplicationResult<Self> {
        let logger = loggers.create_logger(label, process.log_level, &process.console_location);
        runtime_log
            .setup_log(&process.console_location, label)
            .map_err(|source| ApplicationError::LogSetup {
                location: process.console_location.uname(),
                source,
            })?;

        Ok(Self {
            logger,
            low_latency: false,
            runtime_dir: process.runtime_dir.clone(),
            archive_dir: process.archive_dir.clone(),
            runtime_locator: process.runtime_locator.clone(),
            config_location: process.config_location.clone(),
            console_location: process.console_location.clone(),
            index_location: process.index_location.clone(),
            parent: None,
        })
    }

    /// Child context inheriting every field of `parent`.
    ///
    /// A missing parent means the command was wired outside its group.
    pub fn child(command: &str, parent: Option<&Arc<Context>>) -> ApplicationResult<Self> {
        let parent = parent.ok_or_else(|| ApplicationError::MissingParent {
            command: command.to_string(),
        })?;

        Ok(Self {
            logger: parent.logger.clone(),
            low_latency: parent.low_latency,
            runtime_dir: parent.runtime_dir.clone(),
            archive_dir: parent.archive_dir.clone(),
            runtime_locator: parent.runtime_locator.clone(),
            config_location: parent.config_location.clone(),
            console_location: parent.console_location.clone(),
            index_location: parent.index_location.clone(),
            parent: Some(Arc::clone(parent)),
        })
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    pub fn low_latency(&self) -> bool {
        self.low_latency
    }

    pub fn runtime_dir(&self) -> &Path {
        &self.runtime_dir
    }

    pub fn archive_dir(&self) -> &Path {
        &self.archive_dir
    }

    pub fn runtime_locator(&self) -> &RuntimeLocator {
        &self.runtime_locator
    }

    pub fn config_location(&self) -> &Location {
        &self.config_location
    }

    pub fn console_location(&self) -> &Location {
        &self.console_location
    }

    pub fn index_location(&self) -> &Location {
        &self.index_location
    }

    pub fn parent(&self) -> Option<&Context> {
        self.parent.as_deref()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use rstest::{fixture, rstest};

    #[derive(Default)]
    struct CountingLog {
        calls: AtomicUsize,
    }

    impl RuntimeLog for CountingLog {
        fn setup_log(&self, _location: &Location, _label: &str) -> io::Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct FailingLog;

    impl RuntimeLog for FailingLog {
        fn setup_log(&self, _location: &Location, _label: &str) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
        }
    }

    struct PlainLoggers;

    impl LoggerFactory for PlainLoggers {
        fn create_logger(&self, name: &str, level: LogLevel, console: &Location) -> Logger {
            Logger::new(name, level, console)
        }
    }

    #[fixture]
    fn process() -> ProcessContext {
        ProcessContext::from_home("/opt/kfc", LogLevel::Info).unwrap()
    }

    #[rstest]
    fn given_home_when_building_process_context_then_derives_layout(process: ProcessContext) {
        assert_eq!(process.runtime_dir, PathBuf::from("/opt/kfc/runtime"));
        assert_eq!(process.archive_dir, PathBuf::from("/opt/kfc/archive"));
        assert_eq!(process.runtime_locator.root(), Path::new("/opt/kfc/runtime"));
        assert_eq!(process.config_location.uname(), "system/etc/kungfu/live");
        assert_eq!(process.console_location.uname(), "system/service/console/live");
        assert_eq!(process.index_location.uname(), "system/journal/index/live");
    }

    #[rstest]
    fn given_process_context_when_root_then_logger_named_after_group(process: ProcessContext) {
        let log = CountingLog::default();
        let ctx = Context::root("data", &process, &PlainLoggers, &log).unwrap();

        assert!(ctx.is_root());
        assert!(!ctx.low_latency());
        assert_eq!(ctx.logger().component(), "data");
        assert_eq!(ctx.logger().level(), LogLevel::Info);
        assert_eq!(ctx.runtime_dir(), process.runtime_dir.as_path());
        assert_eq!(log.calls.load(Ordering::SeqCst), 1);
    }

    #[rstest]
    fn given_root_when_child_then_every_field_inherited(process: ProcessContext) {
        let log = CountingLog::default();
        let root = Arc::new(Context::root("data", &process, &PlainLoggers, &log).unwrap());
        let child = Context::child("get", Some(&root)).unwrap();

        assert!(child.logger().ptr_eq(root.logger()));
        assert_eq!(child.low_latency(), root.low_latency());
        assert_eq!(child.runtime_dir(), root.runtime_dir());
        assert_eq!(child.archive_dir(), root.archive_dir());
        assert!(child.runtime_locator().ptr_eq(root.runtime_locator()));
        assert_eq!(child.config_location(), root.config_location());
        assert_eq!(child.console_location(), root.console_location());
        assert_eq!(child.index_location(), root.index_location());
        assert!(!child.is_root());
        assert!(child.parent().is_some_and(|p| p.is_root()));
        assert_eq!(log.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn given_no_parent_when_child_then_configuration_error() {
        let err = Context::child("get", None).unwrap_err();
        assert!(matches!(err, ApplicationError::MissingParent { ref command } if command == "get"));
    }

    #[rstest]
    fn given_failing_runtime_log_when_root_then_log_setup_error(process: ProcessContext) {
        let err = Context::root("data", &process, &PlainLoggers, &FailingLog).unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::LogSetup { ref location, .. } if location == "system/service/console/live"
        ));
    }
}
