use kfc_data::cli::args::Cli;
use kfc_data::cli::commands::execute_command;
use kfc_data::cli::{output, CliError};
use kfc_data::config::Settings;
use kfc_data::extension::builtin_registry;
use kfc_data::infrastructure::di::ServiceContainer;
use kfc_data::exitcode;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

fn main() {
    let registry = match builtin_registry() {
        Ok(registry) => registry,
        Err(e) => {
            output::error(&e);
            std::process::exit(exitcode::SOFTWARE);
        }
    };

    let cli = Cli::parse_with(&registry);

    let settings = match Settings::load() {
        Ok(settings) => settings.with_overrides(cli.home.as_deref(), cli.log_level),
        Err(e) => {
            let e = CliError::from(e);
            output::error(&e);
            std::process::exit(e.exit_code());
        }
    };

    setup_logging(cli.verbose, settings.log_level.level_filter());

    let container = ServiceContainer::new(settings, registry);
    if let Err(e) = execute_command(&cli, &container) {
        output::error(&e);
        std::process::exit(e.exit_code());
    }
}

/// Terminal logging: `-v` flags win over the configured log level.
fn setup_logging(verbosity: u8, configured: LevelFilter) {
    let filter = match verbosity {
        0 => configured,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        3 => LevelFilter::TRACE,
        _ => {
            eprintln!("Don't be crazy, max is -v -v -v");
            LevelFilter::TRACE
        }
    };

    // Dependencies that are chatty at debug level
    let noisy_modules = ["config"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    let filtered_layer = fmt_layer.with_filter(filter).with_filter(module_filter);

    tracing_subscriber::registry().with(filtered_layer).init();

    match filter {
        LevelFilter::INFO => tracing::info!("Debug mode: info"),
        LevelFilter::DEBUG => tracing::debug!("Debug mode: debug"),
        LevelFilter::TRACE => tracing::debug!("Debug mode: trace"),
        _ => {}
    }
}
