// src/exec/backend.rs

//! Pluggable command executor abstraction.
//!
//! The resolver and the background dispatcher talk to a `CommandExecutor`
//! instead of spawning processes directly. Production code uses
//! [`ProcessExecutor`]; tests provide a scripted fake that records which
//! command vectors were run and never touches the container runtime.

use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{error, info};

use super::command::{CommandExecutionError, CommandResult, CommandSpec};

pub type ExecFuture<'a> =
    Pin<Box<dyn Future<Output = Result<CommandResult, CommandExecutionError>> + Send + 'a>>;

/// Trait abstracting how commands are executed.
pub trait CommandExecutor: Send + Sync {
    /// Run `command` to completion.
    ///
    /// Exit code 0 resolves to the captured [`CommandResult`]; any other exit
    /// code resolves to [`CommandExecutionError::Failed`] carrying stderr.
    /// Implementations must not retry.
    fn execute<'a>(&'a self, command: &'a CommandSpec) -> ExecFuture<'a>;
}

/// Real executor: one OS process per command, via `tokio::process`.
///
/// There is no internal timeout. A caller that needs bounded latency wraps
/// the future in `tokio::time::timeout` itself.
#[derive(Debug, Clone, Default)]
pub struct ProcessExecutor;

impl ProcessExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl CommandExecutor for ProcessExecutor {
    fn execute<'a>(&'a self, command: &'a CommandSpec) -> ExecFuture<'a> {
        Box::pin(run_process(command))
    }
}

async fn run_process(spec: &CommandSpec) -> Result<CommandResult, CommandExecutionError> {
    let rendered = spec.to_string();
    info!(command = %rendered, "running command");

    let output = Command::new(&spec.program)
        .args(&spec.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|source| {
            error!(command = %rendered, error = %source, "command could not be started");
            CommandExecutionError::Spawn {
                command: rendered.clone(),
                source,
            }
        })?;

    // Killed by a signal: no exit code, treat as failure.
    let exit_code = output.status.code().unwrap_or(-1);
    let result = CommandResult {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        exit_code,
    };

    if !result.success() {
        error!(
            command = %rendered,
            exit_code,
            stderr = %result.stderr.trim_end(),
            "command failed"
        );
        return Err(CommandExecutionError::Failed {
            command: rendered,
            exit_code,
            stderr: result.stderr,
        });
    }

    info!(command = %rendered, success = true, "command succeeded");
    Ok(result)
}
