//! Configuration module for boxhaul.
//!
//! Typed configuration structs that map to the YAML configuration file,
//! with loading, defaults and a platform-appropriate default path.
//!
//! Credentials are deliberately *not* part of this file; they come from
//! environment variables only (see `domain::credentials`).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Top-level configuration for boxhaul.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub mirror: MirrorConfig,
    pub sweep: SweepConfig,
    pub logging: LoggingConfig,
}

/// Folder mirroring settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MirrorConfig {
    /// Seconds a transfer must run before the stall notice starts printing.
    pub stall_notice_secs: u64,
    /// Seconds between stall notice prints once active.
    pub stall_poll_secs: u64,
}

/// Sidecar sweep settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// File extensions to delete, lowercase, without the leading dot.
    pub extensions: Vec<String>,
    /// Path of the plain-text sweep log file.
    pub log_file: PathBuf,
}

/// Logging / tracing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: `trace`, `debug`, `info`, `warn`, or `error`.
    pub level: String,
}

impl Config {
    /// Load configuration from a YAML file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Try to load from `path`; fall back to [`Config::default`] on any error.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Platform-appropriate default path for the configuration file.
    ///
    /// Typically `$XDG_CONFIG_HOME/boxhaul/config.yaml` on Linux.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("boxhaul")
            .join("config.yaml")
    }
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            stall_notice_secs: 30,
            stall_poll_secs: 5,
        }
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["lrv".to_string(), "thm".to_string()],
            log_file: PathBuf::from("boxhaul-sweep.log"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
