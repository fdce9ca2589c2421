// src/server/mod.rs

//! HTTP surface: two signed trigger endpoints and a health check.
//!
//! Handlers stay thin; all decisions are made by the authenticator, the
//! resolver, and the dispatcher held in [`AppState`].

pub mod error;
pub mod handlers;
pub mod types;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::{get, post};
use secrecy::{ExposeSecret, SecretString};
use tracing::info;

use crate::auth::RequestAuthenticator;
use crate::config::Settings;
use crate::exec::{CommandExecutor, Dispatcher};
use crate::resolve::{ContainerResolver, DockerCli};

/// Shared state for the trigger endpoints.
///
/// Read-only after construction; every field is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub authenticator: Arc<RequestAuthenticator>,
    pub resolver: ContainerResolver,
    pub dispatcher: Dispatcher,
}

impl AppState {
    pub fn new(
        authenticator: RequestAuthenticator,
        executor: Arc<dyn CommandExecutor>,
        docker: DockerCli,
        serialize_per_container: bool,
    ) -> Self {
        Self {
            authenticator: Arc::new(authenticator),
            resolver: ContainerResolver::new(Arc::clone(&executor), docker),
            dispatcher: Dispatcher::new(executor, serialize_per_container),
        }
    }

    /// Wire everything from loaded settings.
    pub fn from_settings(settings: &Settings, executor: Arc<dyn CommandExecutor>) -> Self {
        let cfg = &settings.config;
        let secret = SecretString::from(settings.secret().expose_secret().to_owned());
        let authenticator = RequestAuthenticator::new(secret)
            .with_max_request_age(cfg.auth.max_request_age);
        Self::new(
            authenticator,
            executor,
            DockerCli::new(cfg.docker.binary.clone()),
            cfg.docker.serialize_per_container,
        )
    }
}

/// Build the axum router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/pull", post(handlers::pull_container))
        .route("/build", post(handlers::rebuild_container))
        .route("/health", get(handlers::health_check))
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C.
///
/// Background sequences still running at shutdown are abandoned with the
/// runtime.
pub async fn serve(state: AppState, addr: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding HTTP listener on {addr}"))?;

    info!(addr = %addr, "listening for triggers");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
