// src/logging.rs

//! Logging setup for `compose-hook` using `tracing` + `tracing-subscriber`.
//!
//! The filter is chosen as follows:
//! 1. `--log-level` CLI flag (if provided), applied to every target
//! 2. `COMPOSE_HOOK_LOG` as a full `EnvFilter` directive string, e.g.
//!    `compose_hook=debug,hyper=warn`
//! 3. [`DEFAULT_DIRECTIVES`]
//!
//! Background command failures are only ever visible here, so logs go to
//! STDERR line by line.

use anyhow::Result;
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::LogLevel;

pub const LOG_ENV: &str = "COMPOSE_HOOK_LOG";

/// Our own events at info, the HTTP stack only when something is wrong.
pub const DEFAULT_DIRECTIVES: &str = "info,hyper=warn,h2=warn";

/// Initialise global logging subscriber.
///
/// Safe to call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env_directives = std::env::var(LOG_ENV).ok();
    let filter = build_filter(cli_level, env_directives.as_deref());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

    Ok(())
}

/// An unparsable `COMPOSE_HOOK_LOG` falls back to the defaults rather than
/// failing startup.
fn build_filter(cli_level: Option<LogLevel>, env_directives: Option<&str>) -> EnvFilter {
    if let Some(level) = cli_level {
        return EnvFilter::new(level_directive(level));
    }
    env_directives
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVES))
}

fn level_directive(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    }
}
