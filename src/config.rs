//! Configuration Module
//!
//! Resolves server settings in order of precedence: command-line flag, then
//! environment variable, then a JSON defaults file, then built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::TimeDelta;
use clap::Parser;
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

use crate::cache::DEFAULT_SWEEP_INTERVAL;

const DEFAULT_CONFIG_FILE: &str = "configs/cache.json";
const DEFAULT_CACHE_SIZE: usize = 1000;
const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);
const DEFAULT_HOST_PORT: &str = "0.0.0.0:3000";
const DEFAULT_LOG_LEVEL: &str = "info";

// == Config Error ==
/// Errors raised while resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid duration for {field}: {source}")]
    Duration {
        field: &'static str,
        #[source]
        source: humantime::DurationError,
    },

    #[error("{0}")]
    Invalid(String),
}

// == Command Line ==
/// Command-line arguments; each flag falls back to its environment variable.
#[derive(Debug, Default, Parser)]
#[command(name = "lru_ttl_cache", version, about = "LRU cache server with TTL expiration")]
pub struct CliArgs {
    /// JSON file holding default values.
    #[arg(long = "config-file", env = "CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    /// Maximum number of entries held by the cache.
    #[arg(long = "cache-size", env = "CACHE_SIZE", value_name = "COUNT")]
    pub cache_size: Option<usize>,

    /// TTL applied when a write does not supply one (e.g. `10s`, `5m`).
    #[arg(
        long = "default-cache-ttl",
        env = "DEFAULT_CACHE_TTL",
        value_name = "DURATION",
        value_parser = humantime::parse_duration
    )]
    pub default_ttl: Option<Duration>,

    /// How often expired entries are swept (e.g. `500ms`).
    #[arg(
        long = "sweep-interval",
        env = "SWEEP_INTERVAL",
        value_name = "DURATION",
        value_parser = humantime::parse_duration
    )]
    pub sweep_interval: Option<Duration>,

    /// Listen address as `host:port`.
    #[arg(long = "server-host-port", env = "SERVER_HOST_PORT", value_name = "HOST:PORT")]
    pub host_port: Option<String>,

    /// Base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", env = "LOG_LEVEL", value_name = "LEVEL")]
    pub log_level: Option<String>,
}

// == Defaults File ==
/// Shape of the JSON defaults file. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileDefaults {
    pub cache_size: Option<usize>,
    pub default_cache_ttl: Option<String>,
    pub sweep_interval: Option<String>,
    pub server_host_port: Option<String>,
    pub log_level: Option<String>,
}

impl FileDefaults {
    /// Loads defaults from `path`.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

// == Config ==
/// Resolved server configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub cache_size: usize,
    /// TTL for entries written without one
    pub default_ttl: Duration,
    /// Interval between background sweeps
    pub sweep_interval: Duration,
    /// Listen address
    pub host_port: String,
    /// Log level used when `RUST_LOG` is not set
    pub log_level: String,
}

impl Config {
    /// Parses the process arguments and resolves the full configuration.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_args(CliArgs::parse())
    }

    /// Resolves configuration from already parsed arguments.
    ///
    /// An explicitly named defaults file must exist; the implicit
    /// `configs/cache.json` is only read when present.
    pub fn from_args(args: CliArgs) -> Result<Self, ConfigError> {
        let defaults = match &args.config_file {
            Some(path) => FileDefaults::from_path(path)?,
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    FileDefaults::from_path(path)?
                } else {
                    FileDefaults::default()
                }
            }
        };
        Self::resolve(args, defaults)
    }

    /// Merges flags/env over file defaults over built-ins, then validates.
    pub fn resolve(args: CliArgs, defaults: FileDefaults) -> Result<Self, ConfigError> {
        let default_ttl = match (args.default_ttl, defaults.default_cache_ttl) {
            (Some(ttl), _) => ttl,
            (None, Some(raw)) => parse_duration("default_cache_ttl", &raw)?,
            (None, None) => DEFAULT_CACHE_TTL,
        };
        let sweep_interval = match (args.sweep_interval, defaults.sweep_interval) {
            (Some(interval), _) => interval,
            (None, Some(raw)) => parse_duration("sweep_interval", &raw)?,
            (None, None) => DEFAULT_SWEEP_INTERVAL,
        };

        let config = Self {
            cache_size: args
                .cache_size
                .or(defaults.cache_size)
                .unwrap_or(DEFAULT_CACHE_SIZE),
            default_ttl,
            sweep_interval,
            host_port: args
                .host_port
                .or(defaults.server_host_port)
                .unwrap_or_else(|| DEFAULT_HOST_PORT.to_string()),
            log_level: args
                .log_level
                .or(defaults.log_level)
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.cache_size == 0 {
            return Err(ConfigError::Invalid(
                "cache size must be greater than zero".to_string(),
            ));
        }
        if self.default_ttl.is_zero() {
            return Err(ConfigError::Invalid(
                "default cache TTL must be greater than zero".to_string(),
            ));
        }
        if self.sweep_interval.is_zero() {
            return Err(ConfigError::Invalid(
                "sweep interval must be greater than zero".to_string(),
            ));
        }
        if self.host_port.is_empty() {
            return Err(ConfigError::Invalid(
                "server host:port must not be empty".to_string(),
            ));
        }
        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(ConfigError::Invalid(format!(
                "unknown log level: {}",
                self.log_level
            )));
        }
        Ok(())
    }

    /// Default TTL in the engine's signed duration type.
    pub fn default_ttl_delta(&self) -> Result<TimeDelta, ConfigError> {
        TimeDelta::from_std(self.default_ttl)
            .map_err(|_| ConfigError::Invalid("default cache TTL is too large".to_string()))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_size: DEFAULT_CACHE_SIZE,
            default_ttl: DEFAULT_CACHE_TTL,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
            host_port: DEFAULT_HOST_PORT.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

fn parse_duration(field: &'static str, raw: &str) -> Result<Duration, ConfigError> {
    humantime::parse_duration(raw).map_err(|source| ConfigError::Duration { field, source })
}
