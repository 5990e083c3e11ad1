//! Command dispatch

use std::io;
use std::path::PathBuf;

use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::ProcessContext;
use crate::cli::args::{command_for, Cli, Commands, ConfigCommands, DataCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli, container: &ServiceContainer) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Data { command }) => cmd_data(command, container),
        Some(Commands::Config { command }) => cmd_config(command, container),
        Some(Commands::Completion { shell }) => cmd_completion(*shell, container),
        None => Err(CliError::Usage(
            "no command given (try `kfc --help`)".to_string(),
        )),
    }
}

#[instrument(skip(container))]
fn cmd_data(command: &DataCommands, container: &ServiceContainer) -> CliResult<()> {
    let process = ProcessContext::from_settings(&container.settings)?;
    let group = container.data.enter(&process)?;

    match command {
        DataCommands::Get { source } => {
            debug!(source = %source, "dispatching data source");
            group.get(source)?;
        }
        DataCommands::List => {
            let sources = group.sources();
            if sources.is_empty() {
                output::warning("no data sources registered");
            } else {
                output::header("Data sources:");
                for (name, about) in sources {
                    output::entry(name, about);
                }
            }
        }
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_config(command: &ConfigCommands, container: &ServiceContainer) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&container.settings.to_toml()?);
        }
        ConfigCommands::Init { force } => {
            let path = config_path()?;
            if path.exists() && !force {
                return Err(CliError::InvalidArgs(format!(
                    "config already exists: {} (use --force to overwrite)",
                    path.display()
                )));
            }
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| InfraError::io(format!("create {}", parent.display()), e))?;
            }
            std::fs::write(&path, Settings::template())
                .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
            output::success(&format!("Created {}", path.display()));
        }
        ConfigCommands::Path => {
            let path = config_path()?;
            let state = if path.exists() { "exists" } else { "not found" };
            output::action("global", &format!("{} ({state})", path.display()));
        }
    }
    Ok(())
}

fn config_path() -> CliResult<PathBuf> {
    global_config_path()
        .ok_or_else(|| CliError::Usage("cannot determine config directory".to_string()))
}

fn cmd_completion(shell: Shell, container: &ServiceContainer) -> CliResult<()> {
    let mut cmd = command_for(&container.registry);
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
