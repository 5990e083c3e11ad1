//! `data` command group service
//!
//! Entering the group builds the root context (one logger, one runtime log
//! setup). Subcommands run against the entered group and derive their own
//! child contexts from it.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationResult, Context, ProcessContext};
use crate::extension::ExtensionRegistry;
use crate::infrastructure::traits::{LoggerFactory, RuntimeLog};

/// Label of the data command group, used for its logger and runtime log.
pub const DATA_GROUP: &str = "data";

/// Service resolving data sources to extensions and running them.
pub struct DataService {
    registry: Arc<ExtensionRegistry>,
    loggers: Arc<dyn LoggerFactory>,
    runtime_log: Arc<dyn RuntimeLog>,
}

impl DataService {
    pub fn new(
        registry: Arc<ExtensionRegistry>,
        loggers: Arc<dyn LoggerFactory>,
        runtime_log: Arc<dyn RuntimeLog>,
    ) -> Self {
        Self {
            registry,
            loggers,
            runtime_log,
        }
    }

    pub fn registry(&self) -> &ExtensionRegistry {
        &self.registry
    }

    /// Enter the `data` group.
    pub fn enter(&self, process: &ProcessContext) -> ApplicationResult<DataGroup<'_>> {
        let context = Context::root(
            DATA_GROUP,
            process,
            self.loggers.as_ref(),
            self.runtime_log.as_ref(),
        )?;
        debug!(runtime_dir = %context.runtime_dir().display(), "entered data group");
        Ok(DataGroup {
            registry: &self.registry,
            context: Arc::new(context),
        })
    }
}

/// An entered `data` group holding its root context.
pub struct DataGroup<'a> {
    registry: &'a ExtensionRegistry,
    context: Arc<Context>,
}

impl DataGroup<'_> {
    pub fn context(&self) -> &Arc<Context> {
        &self.context
    }

    /// `data get`: build the extension registered as `source` and run it once.
    ///
    /// Errors from the extension are returned unchanged.
    #[instrument(skip(self))]
    pub fn get(&self, source: &str) -> ApplicationResult<()> {
        let ctx = Context::child("get", Some(&self.context))?;
        let factory = self.registry.get_extension(source)?;

        let mut extension = factory(&ctx)?;
        ctx.logger().info(format!("running data source {source}"));
        extension.run()?;
        ctx.logger().info(format!("data source {source} finished"));
        Ok(())
    }

    /// `data list`: registered sources with their descriptions.
    pub fn sources(&self) -> Vec<(&str, &str)> {
        self.registry.describe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::domain::{Location, LogLevel, Logger};
    use crate::extension::{DataExtension, ExtensionError, ExtensionResult};
    use crate::infrastructure::traits::TracingLoggerFactory;

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

    struct Failing;

    impl DataExtension for Failing {
        fn run(&mut self) -> ExtensionResult<()> {
            Err(ExtensionError::failed("rest", "connection refused"))
        }
    }

    fn service(registry: ExtensionRegistry, log: Arc<CountingLog>) -> DataService {
        DataService::new(Arc::new(registry), Arc::new(TracingLoggerFactory), log)
    }

    fn process() -> ProcessContext {
        ProcessContext::from_home("/opt/kfc", LogLevel::Debug).unwrap()
    }

    #[test]
    fn given_group_when_running_several_subcommands_then_setup_log_once() {
        let log = Arc::new(CountingLog::default());
        let mut registry = ExtensionRegistry::new();
        registry
            .register("csv", "", |_: &Context| {
                Ok(Box::new(Noop) as Box<dyn DataExtension>)
            })
            .unwrap();
        let service = service(registry, Arc::clone(&log));

        let group = service.enter(&process()).unwrap();
        group.get("csv").unwrap();
        group.get("csv").unwrap();
        let _ = group.sources();

        assert_eq!(log.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn given_failing_extension_when_get_then_error_propagated() {
        let mut registry = ExtensionRegistry::new();
        registry
            .register("rest", "", |_: &Context| {
                Ok(Box::new(Failing) as Box<dyn DataExtension>)
            })
            .unwrap();
        let service = service(registry, Arc::new(CountingLog::default()));

        let group = service.enter(&process()).unwrap();
        let err = group.get("rest").unwrap_err();
        assert!(matches!(
            err,
            crate::application::ApplicationError::Extension(ExtensionError::Failed { .. })
        ));
    }

    #[test]
    fn given_group_when_entered_then_root_logger_is_data() {
        let service = service(ExtensionRegistry::new(), Arc::new(CountingLog::default()));
        let group = service.enter(&process()).unwrap();
        let logger: &Logger = group.context().logger();
        assert_eq!(logger.component(), DATA_GROUP);
        assert!(group.context().is_root());
    }

    struct Noop;

    impl DataExtension for Noop {
        fn run(&mut self) -> ExtensionResult<()> {
            Ok(())
        }
    }
}
