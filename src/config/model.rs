// src/config/model.rs

use serde::Deserialize;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [server]
/// host = "0.0.0.0"
/// port = 8000
///
/// [auth]
/// max_request_age = 600
///
/// [docker]
/// binary = "docker"
/// serialize_per_container = false
/// ```
///
/// All sections are optional and have reasonable defaults. The shared
/// secret is deliberately not part of this file; it only comes from the
/// `SECRET_KEY` environment variable.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub auth: AuthSection,

    #[serde(default)]
    pub docker: DockerSection,
}

/// Validated configuration.
///
/// Obtain one via `ConfigFile::try_from(raw)` (see [`validate`]) or
/// [`load_and_validate`](super::load_and_validate).
///
/// [`validate`]: super::validate
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub server: ServerSection,
    pub auth: AuthSection,
    pub docker: DockerSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        server: ServerSection,
        auth: AuthSection,
        docker: DockerSection,
    ) -> Self {
        Self {
            server,
            auth,
            docker,
        }
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        let raw = RawConfigFile::default();
        Self::new_unchecked(raw.server, raw.auth, raw.docker)
    }
}

/// `[server]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// `[auth]` section.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct AuthSection {
    /// Reject timestamps more than this many seconds in the past.
    ///
    /// If `None`, only the future bound (`TIME_WINDOW`) is enforced.
    #[serde(default)]
    pub max_request_age: Option<u64>,
}

/// `[docker]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DockerSection {
    /// Docker CLI to invoke; a bare name is looked up on `PATH`.
    #[serde(default = "default_docker_binary")]
    pub binary: String,

    /// Run background sequences for the same container one at a time.
    #[serde(default)]
    pub serialize_per_container: bool,
}

fn default_docker_binary() -> String {
    "docker".to_string()
}

impl Default for DockerSection {
    fn default() -> Self {
        Self {
            binary: default_docker_binary(),
            serialize_per_container: false,
        }
    }
}
