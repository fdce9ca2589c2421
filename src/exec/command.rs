// src/exec/command.rs

//! Command vectors and their outcomes.

use std::fmt;

use thiserror::Error;

/// A program plus its argument vector.
///
/// Commands are never handed to a shell: every argument reaches the child
/// process exactly as given, so container names and compose paths cannot
/// inject extra commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Captured output of a finished process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl CommandResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

#[derive(Error, Debug)]
pub enum CommandExecutionError {
    /// The process ran and exited non-zero.
    #[error("Command failed: {stderr}")]
    Failed {
        command: String,
        exit_code: i32,
        stderr: String,
    },

    /// The process could not be started or waited on.
    #[error("Command could not be run: {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

impl CommandExecutionError {
    /// Captured stderr, if the process got far enough to produce any.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            CommandExecutionError::Failed { stderr, .. } => Some(stderr),
            CommandExecutionError::Spawn { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_joins_program_and_args() {
        let cmd = CommandSpec::new("docker")
            .arg("compose")
            .args(["-f", "/srv/compose.yml", "pull", "web"]);
        assert_eq!(cmd.to_string(), "docker compose -f /srv/compose.yml pull web");
    }

    #[test]
    fn failed_error_message_carries_stderr() {
        let err = CommandExecutionError::Failed {
            command: "docker inspect nope".into(),
            exit_code: 1,
            stderr: "Error: No such object: nope".into(),
        };
        assert_eq!(err.to_string(), "Command failed: Error: No such object: nope");
        assert_eq!(err.stderr(), Some("Error: No such object: nope"));
    }
}
