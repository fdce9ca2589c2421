// src/resolve/mod.rs

//! Turning a caller-supplied container name into a [`ContainerIdentity`].
//!
//! The name is only trusted after the runtime itself lists a container with
//! exactly that name; the compose file path comes from the runtime's own
//! metadata, never from the request.

pub mod docker;

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::exec::{CommandExecutionError, CommandExecutor};
use crate::types::ContainerIdentity;

pub use docker::{COMPOSE_CONFIG_FILES_LABEL, DockerCli};

#[derive(Error, Debug)]
pub enum ResolutionError {
    #[error("no container name defined")]
    NoContainerName,

    #[error("container_name not found")]
    NotFound,

    #[error("couldn't find compose file for {name}")]
    ComposeFileLookup {
        name: String,
        #[source]
        source: CommandExecutionError,
    },

    /// Inspect output was reachable but did not have the expected shape.
    #[error("{0}")]
    ComposeFileShape(String),

    #[error("malformed container listing at line {line}: {reason}")]
    MalformedListing { line: usize, reason: String },

    /// Listing all containers failed outright.
    #[error(transparent)]
    Command(#[from] CommandExecutionError),
}

impl ResolutionError {
    /// Whether the caller caused this (unknown name, bad metadata) as
    /// opposed to the runtime being unavailable.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, ResolutionError::Command(_))
    }
}

/// Confirms containers exist and finds their compose files.
#[derive(Clone)]
pub struct ContainerResolver {
    executor: Arc<dyn CommandExecutor>,
    docker: DockerCli,
}

impl ContainerResolver {
    pub fn new(executor: Arc<dyn CommandExecutor>, docker: DockerCli) -> Self {
        Self { executor, docker }
    }

    pub fn docker(&self) -> &DockerCli {
        &self.docker
    }

    /// Name extraction, existence check and compose-file lookup, in order.
    pub async fn resolve(
        &self,
        declared_name: Option<&str>,
    ) -> Result<ContainerIdentity, ResolutionError> {
        let name = extract_name(declared_name)?;
        self.ensure_exists(name).await?;
        let compose_file = self.compose_file(name).await?;
        info!(container = %name, compose_file = %compose_file, "validation passed");

        Ok(ContainerIdentity {
            name: name.to_string(),
            compose_file,
        })
    }

    /// Fails with [`ResolutionError::NotFound`] unless some listed container
    /// is named exactly `name`.
    pub async fn ensure_exists(&self, name: &str) -> Result<(), ResolutionError> {
        let listing = self.executor.execute(&self.docker.list_all()).await?;

        let records = docker::parse_container_listing(&listing.stdout).map_err(|(line, err)| {
            ResolutionError::MalformedListing {
                line,
                reason: err.to_string(),
            }
        })?;

        if records.iter().any(|r| r.names == name) {
            debug!(container = %name, "container found in listing");
            Ok(())
        } else {
            warn!(container = %name, known = records.len(), "container not found");
            Err(ResolutionError::NotFound)
        }
    }

    /// Compose config-files label of the container named `name`.
    pub async fn compose_file(&self, name: &str) -> Result<String, ResolutionError> {
        let inspect = self
            .executor
            .execute(&self.docker.inspect(name))
            .await
            .map_err(|source| ResolutionError::ComposeFileLookup {
                name: name.to_string(),
                source,
            })?;

        let compose_file =
            docker::compose_file_from_inspect(&inspect.stdout).map_err(ResolutionError::ComposeFileShape)?;
        info!(container = %name, compose_file = %compose_file, "got compose file");
        Ok(compose_file)
    }
}

/// Non-empty declared name, or [`ResolutionError::NoContainerName`].
pub fn extract_name(declared_name: Option<&str>) -> Result<&str, ResolutionError> {
    let name = declared_name
        .filter(|n| !n.is_empty())
        .ok_or(ResolutionError::NoContainerName)?;
    info!(container = %name, "got container name");
    Ok(name)
}
