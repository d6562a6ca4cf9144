//! Error types for configuration and endpoint input.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building or validating a [`crate::CheckConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid duration for `{field}`: {value:?}")]
    Duration { field: &'static str, value: String },

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Fatal input-stage errors. These stop the process before any
/// network activity.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read endpoint file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no endpoints found in {0}")]
    Empty(PathBuf),
}
