// src/exec/backend.rs

//! Pluggable command runner abstraction.
//!
//! Higher layers (the package manager) talk to a `CommandRunner` instead of
//! calling [`run`](super::run) directly. This makes it easy to swap in a fake
//! runner in tests that records the command lines it was given without
//! spawning anything.

use std::future::Future;
use std::pin::Pin;

use crate::errors::RunError;
use crate::exec::env::ExecConfig;
use crate::exec::pipeline::{run, PipelineResult};

pub type RunFuture<'a> = Pin<Box<dyn Future<Output = Result<PipelineResult, RunError>> + Send + 'a>>;

/// Trait abstracting how a command line is executed.
///
/// Production code uses [`PipelineRunner`]; tests can provide their own
/// implementation that doesn't spawn real processes.
pub trait CommandRunner: Send + Sync {
    fn run<'a>(&'a self, command: &'a str) -> RunFuture<'a>;
}

/// Runner that parses and executes pipelines for real, always with the same
/// [`ExecConfig`].
#[derive(Debug, Clone, Default)]
pub struct PipelineRunner {
    config: ExecConfig,
}

impl PipelineRunner {
    pub fn new(config: ExecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExecConfig {
        &self.config
    }
}

impl CommandRunner for PipelineRunner {
    fn run<'a>(&'a self, command: &'a str) -> RunFuture<'a> {
        Box::pin(run(command, &self.config))
    }
}

impl<T: CommandRunner + ?Sized> CommandRunner for &T {
    fn run<'a>(&'a self, command: &'a str) -> RunFuture<'a> {
        (**self).run(command)
    }
}
