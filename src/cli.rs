// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `compose-hook`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "compose-hook",
    version,
    about = "Signed webhooks that pull or rebuild docker compose services.",
    long_about = None
)]
pub struct CliArgs {
    /// Optional config file (TOML).
    ///
    /// Without one, built-in defaults are used. The shared secret is always
    /// read from `SECRET_KEY`, never from this file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Address to bind the HTTP listener to.
    #[arg(long, value_name = "ADDR")]
    pub host: Option<String>,

    /// Port to listen on.
    #[arg(long, value_name = "PORT", env = "COMPOSE_HOOK_PORT")]
    pub port: Option<u16>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `COMPOSE_HOOK_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Load and validate configuration, print it, and exit.
    #[arg(long)]
    pub check: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
