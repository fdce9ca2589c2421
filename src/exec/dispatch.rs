// src/exec/dispatch.rs

//! Detached background execution of command sequences.
//!
//! Trigger handlers acknowledge their caller before any management command
//! has run. The actual work is handed to a [`Dispatcher`], which runs the
//! sequence in its own Tokio task and reports the outcome only through logs.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::exec::{CommandExecutionError, CommandExecutor, CommandSpec};
use crate::types::Operation;

/// How a detached sequence ended.
#[derive(Debug)]
pub enum SequenceOutcome {
    /// Every step exited 0.
    Completed,
    /// Step `step` (0-based) failed; later steps were not started.
    Failed {
        step: usize,
        error: CommandExecutionError,
    },
}

/// Per-container async locks, created on first use.
type KeyedLocks = Arc<Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>>;

/// Spawns command sequences detached from the request that asked for them.
///
/// With `serialize_per_container` enabled, sequences for the same container
/// name run one after another; sequences for different containers always
/// run in parallel. Without it, two triggers for one container may race at
/// the container-runtime level.
#[derive(Clone)]
pub struct Dispatcher {
    executor: Arc<dyn CommandExecutor>,
    locks: Option<KeyedLocks>,
}

impl Dispatcher {
    pub fn new(executor: Arc<dyn CommandExecutor>, serialize_per_container: bool) -> Self {
        Self {
            executor,
            locks: serialize_per_container.then(KeyedLocks::default),
        }
    }

    /// Launch `commands` for `container` in the background.
    ///
    /// The returned handle may be dropped; the sequence keeps running either
    /// way and there is no abort path.
    pub fn dispatch(
        &self,
        operation: Operation,
        container: &str,
        commands: Vec<CommandSpec>,
    ) -> JoinHandle<SequenceOutcome> {
        let executor = Arc::clone(&self.executor);
        let locks = self.locks.clone();
        let lock = self.lock_for(container);
        let container = container.to_string();

        tokio::spawn(async move {
            let guard = match lock {
                Some(lock) => {
                    debug!(container = %container, %operation, "waiting for container lock");
                    Some(lock.lock_owned().await)
                }
                None => None,
            };

            info!(container = %container, %operation, steps = commands.len(), "starting background sequence");
            let outcome = run_sequence(executor.as_ref(), &commands).await;

            match &outcome {
                SequenceOutcome::Completed => {
                    info!(container = %container, %operation, "background sequence finished");
                }
                SequenceOutcome::Failed { step, error } => {
                    error!(
                        container = %container,
                        %operation,
                        step,
                        command = %commands[*step],
                        error = %error,
                        "background sequence aborted"
                    );
                }
            }

            drop(guard);
            if let Some(locks) = &locks {
                release_lock(locks, &container);
            }

            outcome
        })
    }

    fn lock_for(&self, container: &str) -> Option<Arc<tokio::sync::Mutex<()>>> {
        let locks = self.locks.as_ref()?;
        let mut map = locks.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        Some(Arc::clone(map.entry(container.to_string()).or_default()))
    }
}

/// Forget `container`'s lock once no sequence holds or waits on it.
fn release_lock(locks: &KeyedLocks, container: &str) {
    let mut map = locks.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if map
        .get(container)
        .is_some_and(|lock| Arc::strong_count(lock) == 1)
    {
        map.remove(container);
    }
}

/// Run commands in order, stopping at the first failure.
async fn run_sequence(executor: &dyn CommandExecutor, commands: &[CommandSpec]) -> SequenceOutcome {
    for (step, command) in commands.iter().enumerate() {
        if let Err(error) = executor.execute(command).await {
            return SequenceOutcome::Failed { step, error };
        }
    }
    SequenceOutcome::Completed
}
