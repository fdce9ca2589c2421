// src/lib.rs

pub mod auth;
pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod resolve;
pub mod server;
pub mod types;

use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info};

use crate::auth::TIME_WINDOW;
use crate::cli::CliArgs;
use crate::config::{Settings, load_settings};
use crate::exec::ProcessExecutor;
use crate::server::AppState;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - settings (CLI, environment, optional config file, secret)
/// - the process executor
/// - authenticator / resolver / dispatcher
/// - the HTTP server with Ctrl-C shutdown
pub async fn run(args: CliArgs) -> Result<()> {
    let settings = load_settings(&args)?;

    if args.check {
        print_check(&settings);
        return Ok(());
    }

    let executor = Arc::new(ProcessExecutor::new());
    let state = AppState::from_settings(&settings, executor);

    info!(
        docker = %settings.config.docker.binary,
        time_window = TIME_WINDOW,
        max_request_age = ?settings.config.auth.max_request_age,
        serialize_per_container = settings.config.docker.serialize_per_container,
        "compose-hook starting"
    );

    server::serve(state, &settings.bind_addr()).await
}

/// `--check` output: effective configuration, secret omitted.
fn print_check(settings: &Settings) {
    let cfg = &settings.config;
    println!("compose-hook configuration");
    println!("  server.bind = {}", settings.bind_addr());
    println!("  auth.time_window = {TIME_WINDOW}s");
    match cfg.auth.max_request_age {
        Some(age) => println!("  auth.max_request_age = {age}s"),
        None => println!("  auth.max_request_age = (unbounded)"),
    }
    println!("  auth.secret = (set)");
    println!("  docker.binary = {}", cfg.docker.binary);
    println!(
        "  docker.serialize_per_container = {}",
        cfg.docker.serialize_per_container
    );

    debug!("check complete (server not started)");
}
