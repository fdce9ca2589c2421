// src/exec/mod.rs

//! Process execution layer.
//!
//! Every interaction with the container runtime goes through here, using
//! `tokio::process::Command` with an explicit argument vector.
//!
//! - [`command`] defines [`CommandSpec`], [`CommandResult`] and
//!   [`CommandExecutionError`].
//! - [`backend`] provides the `CommandExecutor` trait and the concrete
//!   `ProcessExecutor` used in production, which tests replace with a fake.
//! - [`dispatch`] runs fire-and-forget command sequences after a trigger has
//!   been acknowledged.

pub mod backend;
pub mod command;
pub mod dispatch;

pub use backend::{CommandExecutor, ExecFuture, ProcessExecutor};
pub use command::{CommandExecutionError, CommandResult, CommandSpec};
pub use dispatch::{Dispatcher, SequenceOutcome};
