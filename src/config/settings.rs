// src/config/settings.rs

use std::fmt;

use secrecy::SecretString;

use crate::config::model::ConfigFile;

/// Fully assembled runtime settings: validated file config with CLI/env
/// overrides applied, plus the shared secret.
pub struct Settings {
    pub config: ConfigFile,
    secret: SecretString,
}

impl Settings {
    pub fn new(config: ConfigFile, secret: SecretString) -> Self {
        Self { config, secret }
    }

    pub fn secret(&self) -> &SecretString {
        &self.secret
    }

    /// `host:port` to bind the HTTP listener to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.config.server.host, self.config.server.port)
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("config", &self.config)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
