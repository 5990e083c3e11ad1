use std::env;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::Context;
use crate::domain::Location;
use crate::extension::{DataExtension, ExtensionError, ExtensionResult};
use crate::infrastructure::traits::RuntimeLog;

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        if env::var("RUST_LOG").is_err() {
            env::set_var("RUST_LOG", "trace");
        }
        // global logging subscriber, used by all tracing log macros
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");

    let noisy_modules = [""];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| !name.is_empty() && metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

/// Runtime log recording every `setup_log` call as `(location uname, label)`.
#[derive(Debug, Default)]
pub struct RecordingRuntimeLog {
    calls: Mutex<Vec<(String, String)>>,
}

impl RecordingRuntimeLog {
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl RuntimeLog for RecordingRuntimeLog {
    fn setup_log(&self, location: &Location, label: &str) -> io::Result<()> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((location.uname(), label.to_string()));
        }
        Ok(())
    }
}

/// Counters shared between a [`CountingExtension`] factory and the test.
#[derive(Debug, Default)]
pub struct ExtensionProbe {
    pub built: AtomicUsize,
    pub runs: AtomicUsize,
}

impl ExtensionProbe {
    pub fn built(&self) -> usize {
        self.built.load(Ordering::SeqCst)
    }

    pub fn runs(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }
}

/// Extension counting constructions and runs; fails on run when `fail` is set.
pub struct CountingExtension {
    name: String,
    fail: bool,
    probe: Arc<ExtensionProbe>,
}

impl CountingExtension {
    /// Factory building a fresh `CountingExtension` per call.
    pub fn factory(
        name: &str,
        fail: bool,
        probe: Arc<ExtensionProbe>,
    ) -> impl Fn(&Context) -> ExtensionResult<Box<dyn DataExtension>> + Send + Sync + 'static
    {
        let name = name.to_string();
        move |_ctx: &Context| {
            probe.built.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(CountingExtension {
                name: name.clone(),
                fail,
                probe: Arc::clone(&probe),
            }) as Box<dyn DataExtension>)
        }
    }
}

impl DataExtension for CountingExtension {
    fn run(&mut self) -> ExtensionResult<()> {
        self.probe.runs.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ExtensionError::failed(&self.name, "simulated failure"));
        }
        Ok(())
    }
}
