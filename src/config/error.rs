use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid port value `{value}`: {source}")]
    PortParseError {
        value: String,
        source: std::num::ParseIntError,
    },

    #[error("port must be non-zero, got `{value}`")]
    InvalidPort { value: String },

    #[error("invalid bind address `{value}`: {source}")]
    InvalidBindAddr {
        value: String,
        source: std::net::AddrParseError,
    },

    #[error("path not found: {path}")]
    PathNotFound { path: PathBuf },

    #[error("expected a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("expected a file: {path}")]
    NotAFile { path: PathBuf },
}
