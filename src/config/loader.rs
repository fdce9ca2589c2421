// src/config/loader.rs

use std::fs;
use std::path::Path;

use secrecy::SecretString;

use crate::cli::CliArgs;
use crate::config::model::{ConfigFile, RawConfigFile};
use crate::config::settings::Settings;
use crate::errors::{HookError, Result};

/// Environment variable holding the shared HMAC secret.
pub const SECRET_ENV: &str = "SECRET_KEY";

/// Port variable honoured for compatibility with existing deployments.
pub const LEGACY_PORT_ENV: &str = "UVICORN_PORT";

/// Load a configuration file from a given path and return the raw
/// `RawConfigFile`.
///
/// This only performs TOML deserialization; use [`load_and_validate`] for
/// the semantic checks.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and run validation.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Read the shared secret. Missing or empty is fatal.
pub fn load_secret(lookup: impl Fn(&str) -> Option<String>) -> Result<SecretString> {
    match lookup(SECRET_ENV) {
        Some(secret) if !secret.is_empty() => Ok(SecretString::from(secret)),
        _ => Err(HookError::ConfigError(format!(
            "{SECRET_ENV} must be set in the environment"
        ))),
    }
}

/// Assemble runtime settings from the process environment.
pub fn load_settings(args: &CliArgs) -> Result<Settings> {
    settings_from(args, |key| std::env::var(key).ok())
}

/// Assemble runtime settings with an explicit environment lookup.
///
/// Precedence, highest first: CLI flags (clap also maps
/// `COMPOSE_HOOK_PORT` onto `--port`), `UVICORN_PORT`, config file,
/// built-in defaults.
pub fn settings_from(
    args: &CliArgs,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Settings> {
    let mut config = match &args.config {
        Some(path) => load_and_validate(path)?,
        None => ConfigFile::default(),
    };

    if let Some(host) = &args.host {
        config.server.host = host.clone();
    }

    let legacy_port = lookup(LEGACY_PORT_ENV)
        .map(|raw| {
            raw.trim().parse::<u16>().map_err(|e| {
                HookError::ConfigError(format!("{LEGACY_PORT_ENV}={raw:?} is not a port: {e}"))
            })
        })
        .transpose()?;
    if let Some(port) = args.port.or(legacy_port) {
        if port == 0 {
            return Err(HookError::ConfigError("port must not be 0".to_string()));
        }
        config.server.port = port;
    }

    let secret = load_secret(&lookup)?;

    Ok(Settings::new(config, secret))
}
