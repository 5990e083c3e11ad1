//! CLI argument definitions using clap
//!
//! The static shape comes from the derive definitions below. The accepted
//! values of `data get --source` depend on the extension registry, so the
//! final command is assembled by [`command_for`] at startup.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::builder::{PossibleValue, PossibleValuesParser};
use clap::{ArgMatches, Command, CommandFactory, FromArgMatches, Parser, Subcommand, ValueHint};

use crate::domain::LogLevel;
use crate::extension::ExtensionRegistry;

/// Command-line entry point for market data extensions
#[derive(Parser, Debug)]
#[command(name = "kfc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log level: trace, debug, info, warning, error, critical
    #[arg(short, long, global = true)]
    pub log_level: Option<LogLevel>,

    /// Home directory (default: ~/.kfc)
    #[arg(short = 'H', long, global = true, value_hint = ValueHint::DirPath)]
    pub home: Option<PathBuf>,

    /// Increase terminal verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch market data through source extensions
    Data {
        #[command(subcommand)]
        command: DataCommands,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum DataCommands {
    /// Run the extension of a data source
    Get {
        /// Data source
        #[arg(short, long)]
        source: String,
    },

    /// List available data sources
    List,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create global config template
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },

    /// Show config path
    Path,
}

/// Full command with `data get --source` restricted to the registry's names.
pub fn command_for(registry: &ExtensionRegistry) -> Command {
    let sources: Vec<PossibleValue> = registry
        .describe()
        .into_iter()
        .map(|(name, about)| {
            let value = PossibleValue::new(name.to_string());
            if about.is_empty() {
                value
            } else {
                value.help(about.to_string())
            }
        })
        .collect();

    Cli::command().mut_subcommand("data", |data| {
        data.mut_subcommand("get", |get| {
            get.mut_arg("source", |arg| {
                arg.value_parser(PossibleValuesParser::new(sources))
            })
        })
    })
}

impl Cli {
    /// Parse process arguments; exits with clap's usage error on invalid input.
    pub fn parse_with(registry: &ExtensionRegistry) -> Self {
        let matches = command_for(registry).get_matches();
        Self::from_matches(&matches).unwrap_or_else(|e| e.exit())
    }

    /// Parse an explicit argument list.
    pub fn try_parse_with<I, T>(registry: &ExtensionRegistry, args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = command_for(registry).try_get_matches_from(args)?;
        Self::from_matches(&matches)
    }

    fn from_matches(matches: &ArgMatches) -> Result<Self, clap::Error> {
        <Self as FromArgMatches>::from_arg_matches(matches)
    }
}
