// src/resolve/docker.rs

//! Docker CLI command vectors and output parsing.

use std::collections::HashMap;

use serde::Deserialize;

use crate::exec::CommandSpec;
use crate::types::{ContainerIdentity, Operation};

/// Label docker compose puts on every container it creates, holding the
/// comma-separated list of compose files of the project.
pub const COMPOSE_CONFIG_FILES_LABEL: &str = "com.docker.compose.project.config_files";

/// Builds command vectors for one docker binary.
#[derive(Debug, Clone)]
pub struct DockerCli {
    binary: String,
}

impl Default for DockerCli {
    fn default() -> Self {
        Self::new("docker")
    }
}

impl DockerCli {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// `docker ps -a --format=json`: one JSON record per line.
    pub fn list_all(&self) -> CommandSpec {
        CommandSpec::new(&self.binary).args(["ps", "-a", "--format=json"])
    }

    /// `docker inspect <name>`: a JSON array with one element per match.
    pub fn inspect(&self, name: &str) -> CommandSpec {
        CommandSpec::new(&self.binary).arg("inspect").arg(name)
    }

    /// `docker compose -f <file>... <args>`
    fn compose(&self, identity: &ContainerIdentity) -> CommandSpec {
        let mut cmd = CommandSpec::new(&self.binary).arg("compose");
        for file in identity.compose_files() {
            cmd = cmd.arg("-f").arg(file);
        }
        cmd
    }

    /// Ordered management commands for `operation`.
    ///
    /// - pull: `compose pull <name>`, then `compose up -d <name>`
    /// - rebuild: `compose up -d --build <name>`
    pub fn operation_commands(
        &self,
        operation: Operation,
        identity: &ContainerIdentity,
    ) -> Vec<CommandSpec> {
        let name = identity.name.as_str();
        match operation {
            Operation::Pull => vec![
                self.compose(identity).args(["pull", name]),
                self.compose(identity).args(["up", "-d", name]),
            ],
            Operation::Rebuild => vec![self.compose(identity).args(["up", "-d", "--build", name])],
        }
    }
}

/// The one field of a `docker ps --format=json` record we care about.
#[derive(Debug, Deserialize)]
pub struct ContainerRecord {
    #[serde(rename = "Names")]
    pub names: String,
}

#[derive(Debug, Deserialize)]
struct InspectRecord {
    #[serde(rename = "Config")]
    config: InspectConfig,
}

#[derive(Debug, Deserialize)]
struct InspectConfig {
    #[serde(rename = "Labels", default)]
    labels: Option<HashMap<String, String>>,
}

/// Parse `docker ps` output, skipping blank lines.
///
/// On failure returns the 1-based line number and the JSON error.
pub fn parse_container_listing(
    stdout: &str,
) -> Result<Vec<ContainerRecord>, (usize, serde_json::Error)> {
    stdout
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| serde_json::from_str(line).map_err(|e| (idx + 1, e)))
        .collect()
}

/// Pull the compose config-files label out of `docker inspect` output.
pub fn compose_file_from_inspect(stdout: &str) -> Result<String, String> {
    let records: Vec<InspectRecord> =
        serde_json::from_str(stdout).map_err(|e| format!("unexpected inspect output: {e}"))?;

    let first = records
        .into_iter()
        .next()
        .ok_or_else(|| "inspect returned no objects".to_string())?;

    first
        .config
        .labels
        .and_then(|mut labels| labels.remove(COMPOSE_CONFIG_FILES_LABEL))
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| format!("missing label {COMPOSE_CONFIG_FILES_LABEL}"))
}
