use std::sync::{Arc, Mutex};

use pipexec::errors::{RunError, RunErrorKind};
use pipexec::exec::{CommandRunner, PipelineResult, RunFuture};

/// How a scripted command should end.
#[derive(Debug, Clone)]
pub enum FakeOutcome {
    /// Exit non-zero without writing to stderr (`ok == false`).
    NotOk,
    /// Exit non-zero with this stderr text (a `StageStderr` error).
    Stderr(String),
}

/// A fake runner that:
/// - records every command line it is asked to run
/// - succeeds with empty output, unless the command contains one of the
///   configured substrings, in which case the scripted outcome is returned.
#[derive(Debug, Clone, Default)]
pub struct FakeRunner {
    executed: Arc<Mutex<Vec<String>>>,
    scripted: Vec<(String, FakeOutcome)>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make any command containing `needle` end with `outcome`.
    pub fn fail_on(mut self, needle: &str, outcome: FakeOutcome) -> Self {
        self.scripted.push((needle.to_string(), outcome));
        self
    }

    /// Command lines run so far, in order.
    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }

    fn outcome_for(&self, command: &str) -> Option<&FakeOutcome> {
        self.scripted
            .iter()
            .find(|(needle, _)| command.contains(needle.as_str()))
            .map(|(_, outcome)| outcome)
    }
}

impl CommandRunner for FakeRunner {
    fn run<'a>(&'a self, command: &'a str) -> RunFuture<'a> {
        Box::pin(async move {
            self.executed.lock().unwrap().push(command.to_string());

            match self.outcome_for(command) {
                None => Ok(PipelineResult {
                    stdout: Vec::new(),
                    ok: true,
                }),
                Some(FakeOutcome::NotOk) => Ok(PipelineResult {
                    stdout: Vec::new(),
                    ok: false,
                }),
                Some(FakeOutcome::Stderr(text)) => Err(RunError::new(
                    command,
                    RunErrorKind::StageStderr(text.clone()),
                )),
            }
        })
    }
}
