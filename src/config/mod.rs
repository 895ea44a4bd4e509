//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `SIMSCREEN_*` environment
//! variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;

use crate::constants::DEFAULT_FETCH_TIMEOUT_SECS;

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `SIMSCREEN_*` overrides on top of
/// defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8000`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Directory holding the semantic model files (`config.json`,
    /// `tokenizer.json`, `model.safetensors`). Unset means lexical-only mode.
    pub model_path: Option<PathBuf>,

    /// Run the embedder in deterministic stub mode (testing/dev only).
    pub stub_embedder: bool,

    /// JSON file with a fallback corpus for requests without projects.
    pub sample_data_path: Option<PathBuf>,

    /// Per-fetch timeout for candidate content extraction, in seconds.
    /// Default: `30`.
    pub fetch_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            model_path: None,
            stub_embedder: false,
            sample_data_path: None,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "SIMSCREEN_PORT";
    const ENV_BIND_ADDR: &'static str = "SIMSCREEN_BIND_ADDR";
    const ENV_MODEL_PATH: &'static str = "SIMSCREEN_MODEL_PATH";
    const ENV_STUB_EMBEDDER: &'static str = "SIMSCREEN_STUB_EMBEDDER";
    const ENV_SAMPLE_DATA: &'static str = "SIMSCREEN_SAMPLE_DATA";
    const ENV_FETCH_TIMEOUT: &'static str = "SIMSCREEN_FETCH_TIMEOUT_SECS";

    /// Loads configuration from environment variables (falling back to
    /// defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let model_path = Self::parse_optional_path_from_env(Self::ENV_MODEL_PATH);
        let stub_embedder = env::var_os(Self::ENV_STUB_EMBEDDER).is_some_and(|v| !v.is_empty());
        let sample_data_path = Self::parse_optional_path_from_env(Self::ENV_SAMPLE_DATA);
        let fetch_timeout_secs =
            Self::parse_u64_from_env(Self::ENV_FETCH_TIMEOUT, defaults.fetch_timeout_secs);

        Ok(Self {
            port,
            bind_addr,
            model_path,
            stub_embedder,
            sample_data_path,
            fetch_timeout_secs,
        })
    }

    /// Validates paths and basic invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref path) = self.model_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        if let Some(ref path) = self.sample_data_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_file() {
                return Err(ConfigError::NotAFile { path: path.clone() });
            }
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_u64_from_env(var_name: &str, default: u64) -> u64 {
        env::var(var_name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }
}
