use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use compose_hook::exec::{
    CommandExecutionError, CommandExecutor, CommandResult, CommandSpec, ExecFuture,
};

/// What the fake observed, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecEvent {
    Started(String),
    Finished(String),
}

/// A fake executor that:
/// - records every command vector it was asked to run
/// - answers from a script keyed by the rendered command line
/// - succeeds with empty output for anything unscripted
pub struct FakeExecutor {
    script: HashMap<String, Result<String, (i32, String)>>,
    delay: Option<Duration>,
    executed: Arc<Mutex<Vec<CommandSpec>>>,
    events: Arc<Mutex<Vec<ExecEvent>>>,
}

impl FakeExecutor {
    pub fn new() -> Self {
        Self {
            script: HashMap::new(),
            delay: None,
            executed: Arc::new(Mutex::new(Vec::new())),
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Answer `command` (rendered, e.g. `"docker inspect web"`) with stdout.
    pub fn succeed(mut self, command: &str, stdout: impl Into<String>) -> Self {
        self.script.insert(command.to_string(), Ok(stdout.into()));
        self
    }

    /// Answer `command` with a non-zero exit and stderr.
    pub fn fail(mut self, command: &str, exit_code: i32, stderr: impl Into<String>) -> Self {
        self.script
            .insert(command.to_string(), Err((exit_code, stderr.into())));
        self
    }

    /// Sleep this long inside every execution.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Shared handle to the recorded commands.
    pub fn executed(&self) -> Arc<Mutex<Vec<CommandSpec>>> {
        Arc::clone(&self.executed)
    }

    /// Shared handle to the start/finish event log.
    pub fn events(&self) -> Arc<Mutex<Vec<ExecEvent>>> {
        Arc::clone(&self.events)
    }
}

impl Default for FakeExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandExecutor for FakeExecutor {
    fn execute<'a>(&'a self, command: &'a CommandSpec) -> ExecFuture<'a> {
        Box::pin(async move {
            let rendered = command.to_string();
            self.executed.lock().unwrap().push(command.clone());
            self.events
                .lock()
                .unwrap()
                .push(ExecEvent::Started(rendered.clone()));

            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }

            let answer = self.script.get(&rendered).cloned();
            self.events
                .lock()
                .unwrap()
                .push(ExecEvent::Finished(rendered.clone()));

            match answer {
                Some(Err((exit_code, stderr))) => Err(CommandExecutionError::Failed {
                    command: rendered,
                    exit_code,
                    stderr,
                }),
                Some(Ok(stdout)) => Ok(CommandResult {
                    stdout,
                    stderr: String::new(),
                    exit_code: 0,
                }),
                None => Ok(CommandResult {
                    stdout: String::new(),
                    stderr: String::new(),
                    exit_code: 0,
                }),
            }
        })
    }
}

/// Poll `executed` until it holds at least `count` commands.
///
/// Panics after 5 seconds.
pub async fn wait_for_commands(executed: &Arc<Mutex<Vec<CommandSpec>>>, count: usize) -> Vec<String> {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    loop {
        {
            let guard = executed.lock().unwrap();
            if guard.len() >= count {
                return guard.iter().map(ToString::to_string).collect();
            }
        }
        if tokio::time::Instant::now() >= deadline {
            panic!("timed out waiting for {count} commands");
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
