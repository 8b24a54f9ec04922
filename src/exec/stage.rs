// src/exec/stage.rs

//! Parsing a command line into a [`Pipeline`] of resolved [`Stage`]s.
//!
//! Parsing does everything that can fail before a process exists: pipe
//! structure, env assignments, executable lookup, expansion. Nothing is
//! spawned until [`Pipeline::execute`](crate::exec::Pipeline::execute).

use std::path::PathBuf;

use tracing::debug;

use crate::errors::{RunError, RunErrorKind, StageInfo};
use crate::exec::env::{split_assignments, ExecConfig};
use crate::exec::expand::{expand_arguments, join_quoted};
use crate::exec::resolve::{lookup, resolve_wrappers};
use crate::exec::tokenize::split_stages;

/// One command of a pipeline, ready to spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    /// Command name as written; becomes `argv[0]`.
    pub name: String,
    /// Resolved executable.
    pub program: PathBuf,
    /// Final arguments, after expansion and quote joining.
    pub args: Vec<String>,
    /// Leading `VAR=value` assignments, applied over the base environment.
    pub env: Vec<(String, String)>,
}

impl Stage {
    pub fn info(&self) -> StageInfo {
        StageInfo {
            path: self.program.clone(),
            args: self.args.clone(),
        }
    }
}

/// A parsed command line.
#[derive(Debug, Clone)]
pub struct Pipeline {
    command: String,
    stages: Vec<Stage>,
}

impl Pipeline {
    /// Parse and resolve `command`. One stage per `|`-separated segment.
    pub fn parse(command: &str, cfg: &ExecConfig) -> Result<Self, RunError> {
        let segments =
            split_stages(command).map_err(|kind| RunError::new(command, kind))?;

        let stages = segments
            .iter()
            .map(|fields| parse_stage(fields, cfg))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|kind| RunError::new(command, kind))?;

        debug!(command, stages = stages.len(), "parsed pipeline");

        Ok(Self {
            command: command.to_string(),
            stages,
        })
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub(crate) fn stage_error(&self, stage: &Stage, kind: RunErrorKind) -> RunError {
        RunError::new(&self.command, kind).with_stage(stage.info())
    }
}

fn parse_stage(fields: &[&str], cfg: &ExecConfig) -> Result<Stage, RunErrorKind> {
    let (env, first) = split_assignments(fields)?;

    let mut fields: Vec<String> = fields[first..].iter().map(|f| f.to_string()).collect();
    if fields.is_empty() {
        return Err(RunErrorKind::NoCommand);
    }

    let program = lookup(&fields[0], cfg)?;
    let args_start = resolve_wrappers(&mut fields, cfg)?;

    expand_arguments(&mut fields, args_start, cfg)?;
    let mut fields = join_quoted(fields, args_start).into_iter();

    let name = fields.next().unwrap_or_default();
    Ok(Stage {
        name,
        program,
        args: fields.collect(),
        env,
    })
}
