//! TOML-based configuration for the touch screen toggle.
//!
//! The config file lives at `$XDG_CONFIG_HOME/touchscreen-toggle/config.toml`,
//! falling back to `~/.config/touchscreen-toggle/config.toml`.  A missing file
//! is not an error: every field has a default matching the supported panel.
//!
//! ```toml
//! [general]
//! log_level = "info"
//!
//! [device]
//! identifier = "06CB:19AC"
//! property_label = "Device Enabled"
//!
//! [tool]
//! program = "xinput"
//! timeout_ms = 5000
//! ```
//!
//! Every section and field is optional; absent ones take their defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use touch_core::xinput::{DEFAULT_IDENTIFIER, DEFAULT_PROGRAM, DEFAULT_PROPERTY_LABEL};
use touch_core::DeviceQuery;

/// Directory name below the XDG config base.
const CONFIG_DIR_NAME: &str = "touchscreen-toggle";

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Neither `XDG_CONFIG_HOME` nor `HOME` is set.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// `[tool] timeout_ms` is zero, which would fail every invocation.
    #[error("tool.timeout_ms must be greater than zero")]
    ZeroTimeout,
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub device: DeviceConfig,
    #[serde(default)]
    pub tool: ToolConfig,
}

/// Process-wide settings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// `tracing` filter used when `RUST_LOG` is unset, e.g. `"info"` or
    /// `"touch_toggle=debug"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// How the touch screen is recognised.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DeviceConfig {
    /// vendor:product pair searched for in `xinput list`.
    #[serde(default = "default_identifier")]
    pub identifier: String,
    /// Property label searched for in `xinput list-props`.
    #[serde(default = "default_property_label")]
    pub property_label: String,
}

/// The external device tool.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ToolConfig {
    /// Program name or absolute path.
    #[serde(default = "default_program")]
    pub program: String,
    /// Upper bound for a single invocation, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}
fn default_identifier() -> String {
    DEFAULT_IDENTIFIER.to_string()
}
fn default_property_label() -> String {
    DEFAULT_PROPERTY_LABEL.to_string()
}
fn default_program() -> String {
    DEFAULT_PROGRAM.to_string()
}
fn default_timeout_ms() -> u64 {
    5000
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            identifier: default_identifier(),
            property_label: default_property_label(),
        }
    }
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl ToolConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl AppConfig {
    /// Rejects values the toggle cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroTimeout`] when `tool.timeout_ms` is 0.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tool.timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }

    /// Builds the device lookup settings from this config.
    pub fn device_query(&self) -> DeviceQuery {
        DeviceQuery {
            program: self.tool.program.clone(),
            identifier: self.device.identifier.clone(),
            property_label: self.device.property_label.clone(),
        }
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Determines the directory holding the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when neither
/// `XDG_CONFIG_HOME` nor `HOME` is set.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the full path to the default config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot be
/// determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Loads the config from the default location.
///
/// # Errors
///
/// See [`load_config_from`].
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(&config_file_path()?)
}

/// Loads `AppConfig` from `path`, returning `AppConfig::default()` if the file
/// does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// [`ConfigError::Parse`] if the TOML is malformed, and
/// [`ConfigError::ZeroTimeout`] if the file sets `timeout_ms = 0`.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let config: AppConfig = toml::from_str(&content)?;
            config.validate()?;
            Ok(config)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn platform_config_dir() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
    Some(base.join(CONFIG_DIR_NAME))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
