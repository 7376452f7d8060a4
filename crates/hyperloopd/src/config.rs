//! Configuration management for hyperloopd.
//!
//! Loads settings from /etc/hyperloop/config.toml or uses defaults.

use anyhow::{Context, Result};
use hyperloop_common::DEFAULT_BIND_ADDR;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Config file path
pub const CONFIG_PATH: &str = "/etc/hyperloop/config.toml";

/// Default config file path for fallback
pub const DEFAULT_CONFIG_PATH: &str = "/var/lib/hyperloop/config.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_bind_addr() -> String {
    DEFAULT_BIND_ADDR.to_string()
}

fn default_request_timeout() -> u64 {
    10
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Session store limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,

    /// Sessions untouched for this long are dropped
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,

    #[serde(default = "default_reap_interval")]
    pub reap_interval_secs: u64,
}

fn default_max_sessions() -> usize {
    1024
}

fn default_idle_timeout() -> u64 {
    1800
}

fn default_reap_interval() -> u64 {
    60
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_sessions: default_max_sessions(),
            idle_timeout_secs: default_idle_timeout(),
            reap_interval_secs: default_reap_interval(),
        }
    }
}

impl SessionConfig {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    pub fn reap_interval(&self) -> Duration {
        Duration::from_secs(self.reap_interval_secs.max(1))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Base seed; session N gets `seed + N`. Unset means entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// tracing filter directive, e.g. "info" or "hyperloopd=debug"
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl LogConfig {
    /// `RUST_LOG` wins over the configured level
    pub fn env_filter(&self) -> EnvFilter {
        let from_env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
        Self::filter_from(from_env.as_deref(), &self.level)
    }

    fn filter_from(env: Option<&str>, level: &str) -> EnvFilter {
        env.filter(|directives| !directives.trim().is_empty())
            .and_then(|directives| EnvFilter::try_new(directives).ok())
            .or_else(|| EnvFilter::try_new(level).ok())
            .unwrap_or_else(|| EnvFilter::new(default_log_level()))
    }
}

/// Where the running configuration came from
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    File(PathBuf),
    /// No config file could be read; the reason is kept for the startup log
    Defaults(String),
}

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub sessions: SessionConfig,

    #[serde(default)]
    pub simulation: SimulationConfig,

    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    /// Load config from the explicit path, else the standard locations,
    /// else defaults. An explicit path that fails to load is an error.
    ///
    /// Runs before logging is set up, so the caller logs the returned source.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, ConfigSource)> {
        Self::load_from_candidates(
            explicit,
            &[Path::new(CONFIG_PATH), Path::new(DEFAULT_CONFIG_PATH)],
        )
    }

    fn load_from_candidates(
        explicit: Option<&Path>,
        candidates: &[&Path],
    ) -> Result<(Self, ConfigSource)> {
        if let Some(path) = explicit {
            let config = Self::load_from_path(path)?;
            return Ok((config, ConfigSource::File(path.to_path_buf())));
        }

        let mut last_err = None;
        for path in candidates {
            match Self::load_from_path(path) {
                Ok(config) => return Ok((config, ConfigSource::File(path.to_path_buf()))),
                Err(e) => last_err = Some(e),
            }
        }

        let reason = last_err
            .map(|e| format!("{:#}", e))
            .unwrap_or_else(|| "no config paths".to_string());
        Ok((Config::default(), ConfigSource::Defaults(reason)))
    }

    /// Load config from specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }
}
