//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::DataService;
use crate::config::Settings;
use crate::extension::ExtensionRegistry;
use crate::infrastructure::traits::{
    ConsoleRuntimeLog, LoggerFactory, RuntimeLog, TracingLoggerFactory,
};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Data sources available to `data get`
    pub registry: Arc<ExtensionRegistry>,

    pub data: DataService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings, registry: ExtensionRegistry) -> Self {
        Self::with_deps(
            settings,
            registry,
            Arc::new(TracingLoggerFactory),
            Arc::new(ConsoleRuntimeLog),
        )
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        registry: ExtensionRegistry,
        loggers: Arc<dyn LoggerFactory>,
        runtime_log: Arc<dyn RuntimeLog>,
    ) -> Self {
        let settings = Arc::new(settings);
        let registry = Arc::new(registry);
        let data = DataService::new(Arc::clone(&registry), loggers, runtime_log);

        Self {
            settings,
            registry,
            data,
        }
    }
}
