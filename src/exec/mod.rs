// src/exec/mod.rs

//! Process execution layer.
//!
//! Runs pipelines such as `"ls *.rs | wc -l"` as real OS processes joined by
//! pipes, without ever going through `sh`. A command line is turned into a
//! [`Pipeline`] first (all fallible, side-effect free work), then executed.
//!
//! - [`tokenize`] splits the line into stages and fields.
//! - [`env`] holds [`ExecConfig`] and leading `VAR=value` handling.
//! - [`resolve`] finds executables on `PATH`, including behind `sudo`/`xargs`.
//! - [`glob`] and [`expand`] do `~`, wildcard and quote processing.
//! - [`stage`] assembles the above into a [`Pipeline`].
//! - [`pipeline`] starts and waits for the processes.
//! - [`backend`] provides the `CommandRunner` trait used by callers that
//!   want to be testable without spawning processes.

pub mod backend;
pub mod env;
pub mod expand;
pub mod glob;
pub mod pipeline;
pub mod resolve;
pub mod stage;
pub mod tokenize;

pub use backend::{CommandRunner, PipelineRunner, RunFuture};
pub use env::{ExecConfig, StdinSource, BOOT_PATH};
pub use pipeline::{run, PipelineResult};
pub use stage::{Pipeline, Stage};
