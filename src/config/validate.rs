// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{HookError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::HookError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.server, raw.auth, raw.docker))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_server(cfg)?;
    validate_auth(cfg)?;
    validate_docker(cfg)?;
    Ok(())
}

fn validate_server(cfg: &RawConfigFile) -> Result<()> {
    if cfg.server.port == 0 {
        return Err(HookError::ConfigError(
            "[server].port must be between 1 and 65535 (got 0)".to_string(),
        ));
    }
    if cfg.server.host.trim().is_empty() {
        return Err(HookError::ConfigError(
            "[server].host must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_auth(cfg: &RawConfigFile) -> Result<()> {
    if cfg.auth.max_request_age == Some(0) {
        return Err(HookError::ConfigError(
            "[auth].max_request_age must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

fn validate_docker(cfg: &RawConfigFile) -> Result<()> {
    if cfg.docker.binary.trim().is_empty() {
        return Err(HookError::ConfigError(
            "[docker].binary must not be empty".to_string(),
        ));
    }
    Ok(())
}
