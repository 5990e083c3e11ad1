//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/kfc/kfc.toml`
//! 3. Environment variables: `KFC_*` prefix
//! 4. Command-line flags (`--home`, `--log-level`)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::LogLevel;

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub home: Option<PathBuf>,
    pub log_level: Option<LogLevel>,
}

/// Unified configuration for kfc.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Home directory holding `runtime/` and `archive/` (default: ~/.kfc)
    pub home: PathBuf,
    /// Default log level for command loggers
    pub log_level: LogLevel,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            home: dirs_default_home(),
            log_level: LogLevel::default(),
        }
    }
}

/// Get the default home directory (~/.kfc).
fn dirs_default_home() -> PathBuf {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".kfc"))
        .unwrap_or_else(|| PathBuf::from("~/.kfc"))
}

/// Get the XDG config directory for kfc.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "kfc").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("kfc.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand shell variables and tilde in `home`.
    fn expand_paths(&mut self) {
        let raw = self.home.to_string_lossy().into_owned();
        let expanded = shellexpand::full(&raw)
            .map(|s| s.into_owned())
            .unwrap_or(raw);
        self.home = PathBuf::from(expanded);
    }

    /// Overlay values specified in `raw`.
    fn merge_with(&self, raw: &RawSettings) -> Self {
        Self {
            home: raw.home.clone().unwrap_or_else(|| self.home.clone()),
            log_level: raw.log_level.unwrap_or(self.log_level),
        }
    }

    /// Load settings from defaults, the global config file and `KFC_*` env vars.
    pub fn load() -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref())
    }

    /// Load settings using `config_path` as the global config file.
    ///
    /// A missing file is skipped; an unreadable or malformed one is an error.
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config file
        if let Some(path) = config_path {
            if path.exists() {
                let raw = load_raw_settings(path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Environment variables (explicit override)
        current = Self::apply_env_overrides(current)?;

        current.expand_paths();
        Ok(current)
    }

    /// Apply KFC_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("KFC")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("home") {
            settings.home = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("log_level") {
            settings.log_level = val.parse().map_err(|e| ApplicationError::Config {
                message: format!("KFC_LOG_LEVEL: {e}"),
            })?;
        }

        Ok(settings)
    }

    /// Apply command-line flags; they win over every other layer.
    pub fn with_overrides(mut self, home: Option<&Path>, log_level: Option<LogLevel>) -> Self {
        if let Some(home) = home {
            self.home = home.to_path_buf();
            self.expand_paths();
        }
        if let Some(level) = log_level {
            self.log_level = level;
        }
        self
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# kfc configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/kfc/kfc.toml   (this file)
#   Env:    KFC_* environment variables (KFC_HOME, KFC_LOG_LEVEL)
#   Flags:  --home, --log-level

# Home directory; runtime data lives in home/runtime, archives in home/archive
# home = "~/.kfc"

# Log level of command loggers: trace, debug, info, warning, error, critical
# log_level = "warning"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
