// src/errors.rs

//! Crate-wide error aliases and helpers.
//!
//! Each pipeline stage owns a narrow error type
//! ([`AuthenticationError`](crate::auth::AuthenticationError),
//! [`ResolutionError`](crate::resolve::ResolutionError),
//! [`CommandExecutionError`](crate::exec::CommandExecutionError)); this
//! module holds the startup/config level error used around them.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HookError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, HookError>;
