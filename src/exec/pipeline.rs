// src/exec/pipeline.rs

//! Running a parsed pipeline.
//!
//! Two phases: every stage is started in order, each reading from the
//! previous stage's stdout, then every stage is waited on in order. Stderr of
//! every stage, and stdout of the last, are drained by background tasks so a
//! full pipe buffer can never stall a child.

use std::io;
use std::process::Stdio;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, ChildStdout, Command};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::errors::{RunError, RunErrorKind};
use crate::exec::env::{ExecConfig, StdinSource};
use crate::exec::stage::{Pipeline, Stage};

/// Outcome of a pipeline that ran to completion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineResult {
    /// Standard output of the last stage.
    pub stdout: Vec<u8>,
    /// Whether the last stage exited with status zero.
    pub ok: bool,
}

impl PipelineResult {
    /// Stdout as text, without trailing newlines.
    pub fn output_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout)
            .trim_end_matches('\n')
            .to_string()
    }
}

type Drain = JoinHandle<io::Result<Vec<u8>>>;

/// A started stage, owned until it has been waited on.
struct RunningStage<'a> {
    stage: &'a Stage,
    child: Child,
    stderr: Option<Drain>,
    stdout: Option<Drain>,
}

/// Parse `command` and run it.
///
/// `ok` is false when the last stage exits non-zero without writing to
/// stderr (e.g. `grep` finding nothing); any other failure is an error.
pub async fn run(command: &str, cfg: &ExecConfig) -> Result<PipelineResult, RunError> {
    let pipeline = Pipeline::parse(command, cfg)?;
    pipeline.execute(cfg).await
}

impl Pipeline {
    /// Start every stage, then wait for all of them.
    pub async fn execute(&self, cfg: &ExecConfig) -> Result<PipelineResult, RunError> {
        let running = self.start_all(cfg)?;
        self.wait_all(running).await
    }

    fn start_all(&self, cfg: &ExecConfig) -> Result<Vec<RunningStage<'_>>, RunError> {
        let last = self.len().saturating_sub(1);
        let mut running = Vec::with_capacity(self.len());
        let mut upstream: Option<ChildStdout> = None;

        for (i, stage) in self.stages().iter().enumerate() {
            let start_err = |e: io::Error| self.stage_error(stage, RunErrorKind::StartFailure(e));

            let mut feed = None;
            let stdin: Stdio = match upstream.take() {
                Some(out) => TryInto::<Stdio>::try_into(out).map_err(start_err)?,
                None => match &cfg.stdin {
                    StdinSource::Inherit => Stdio::inherit(),
                    StdinSource::Null => Stdio::null(),
                    StdinSource::Bytes(bytes) => {
                        feed = Some(bytes.clone());
                        Stdio::piped()
                    }
                },
            };

            let mut cmd = command_for(stage, cfg);
            cmd.stdin(stdin).stdout(Stdio::piped()).stderr(Stdio::piped());

            debug!(
                stage = i,
                program = %stage.program.display(),
                args = ?stage.args,
                "starting pipeline stage"
            );
            let mut child = cmd.spawn().map_err(start_err)?;

            if let (Some(bytes), Some(mut writer)) = (feed, child.stdin.take()) {
                tokio::spawn(async move {
                    // A stage that exits without reading its input closes the pipe early.
                    if let Err(e) = writer.write_all(&bytes).await {
                        debug!(error = %e, "stopped feeding stdin to first stage");
                    }
                });
            }

            let stderr = child.stderr.take().map(|s| tokio::spawn(drain(s)));
            let stdout = if i == last {
                child.stdout.take().map(|s| tokio::spawn(drain(s)))
            } else {
                upstream = child.stdout.take();
                None
            };

            running.push(RunningStage {
                stage,
                child,
                stderr,
                stdout,
            });
        }

        Ok(running)
    }

    async fn wait_all(&self, running: Vec<RunningStage<'_>>) -> Result<PipelineResult, RunError> {
        let mut result = PipelineResult::default();

        for (i, mut handle) in running.into_iter().enumerate() {
            let stage = handle.stage;
            let wait_err = |e: io::Error| self.stage_error(stage, RunErrorKind::WaitFailure(e));

            let status = handle.child.wait().await.map_err(wait_err)?;
            let stderr = collect(handle.stderr).await.map_err(wait_err)?;
            if handle.stdout.is_some() {
                result.stdout = collect(handle.stdout).await.map_err(wait_err)?;
            }

            debug!(
                stage = i,
                program = %stage.program.display(),
                exit_code = ?status.code(),
                success = status.success(),
                "pipeline stage exited"
            );

            result.ok = status.success();
            if !result.ok && !stderr.is_empty() {
                let text = String::from_utf8_lossy(&stderr);
                return Err(self.stage_error(
                    stage,
                    RunErrorKind::StageStderr(text.trim_end_matches('\n').to_string()),
                ));
            }
        }

        Ok(result)
    }
}

fn command_for(stage: &Stage, cfg: &ExecConfig) -> Command {
    let mut cmd = Command::new(&stage.program);
    #[cfg(unix)]
    cmd.arg0(&stage.name);
    cmd.args(&stage.args)
        .env_clear()
        .envs(cfg.env.iter().map(|(k, v)| (k, v)))
        .envs(stage.env.iter().map(|(k, v)| (k, v)));
    if let Some(dir) = &cfg.working_dir {
        cmd.current_dir(dir);
    }
    cmd
}

async fn drain<R: AsyncRead + Unpin>(mut reader: R) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf).await?;
    Ok(buf)
}

async fn collect(drain: Option<Drain>) -> io::Result<Vec<u8>> {
    match drain {
        Some(handle) => handle.await.map_err(io::Error::other)?,
        None => Ok(Vec::new()),
    }
}
