// src/lib.rs

//! Run external commands safely, without a shell.
//!
//! [`exec::run`] takes a command line such as `"LANG=C grep -c foo *.txt | sort"`
//! and executes it as a pipeline of real processes, doing the few shell
//! expansions scripts usually rely on (`VAR=value` prefixes, `~`, wildcards,
//! quotes) itself. Since no `sh -c` is involved, untrusted text in the
//! command line can't smuggle in extra commands.
//!
//! [`packager`] builds on it to drive the distribution's package manager.

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod packager;
pub mod types;

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::cli::{CliArgs, Command, PkgAction};
use crate::config::{load_or_default, ConfigFile};
use crate::errors::PipexecError;
use crate::exec::{ExecConfig, Pipeline, PipelineRunner};
use crate::fs::RealFileSystem;
use crate::packager::{detect, Packager};
use crate::types::PackageSystem;

/// High-level entry point used by `main.rs`.
///
/// Returns whether the requested operation succeeded; hard failures are
/// errors.
pub async fn run(args: CliArgs) -> Result<bool> {
    let cfg = load_or_default(args.config.as_deref().map(Path::new))?.with_boot(args.boot);
    let exec_cfg = cfg.exec_config();
    debug!(boot = exec_cfg.boot, cwd = %exec_cfg.cwd().display(), "execution settings");

    match args.command {
        Command::Run { command, dry_run } => {
            if dry_run {
                let pipeline = Pipeline::parse(&command, &exec_cfg)?;
                print_dry_run(&pipeline);
                return Ok(true);
            }
            run_pipeline(&command, &exec_cfg).await
        }
        Command::Pkg {
            system,
            sudo,
            action,
        } => {
            let system = pick_package_system(system, &cfg)?;
            let mut options = cfg.packager_options();
            options.sudo |= sudo;

            let packager = Packager::new(system, PipelineRunner::new(exec_cfg), options);
            packager.prepare().await?;
            run_pkg_action(&packager, action).await?;
            Ok(true)
        }
    }
}

async fn run_pipeline(command: &str, exec_cfg: &ExecConfig) -> Result<bool> {
    let result = exec::run(command, exec_cfg).await?;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(&result.stdout)
        .and_then(|_| stdout.flush())
        .context("writing pipeline output")?;

    if !result.ok {
        info!(command, "last stage exited unsuccessfully");
    }
    Ok(result.ok)
}

/// CLI flag wins, then `[packager].system`, then detection.
fn pick_package_system(flag: Option<PackageSystem>, cfg: &ConfigFile) -> Result<PackageSystem> {
    let system = flag
        .or(cfg.packager_section().system)
        .or_else(|| detect(&RealFileSystem))
        .ok_or(PipexecError::NoPackageManager)?;
    info!(%system, "using package system");
    Ok(system)
}

async fn run_pkg_action(packager: &Packager<PipelineRunner>, action: PkgAction) -> Result<()> {
    match action {
        PkgAction::Update => packager.update().await?,
        PkgAction::Install { name } => packager.install(&name).await?,
        PkgAction::Remove { name, meta } => packager.remove(&name, meta).await?,
        PkgAction::Purge { name, meta } => packager.purge(&name, meta).await?,
        PkgAction::Clean => packager.clean().await?,
        PkgAction::Upgrade => packager.upgrade().await?,
    }
    Ok(())
}

/// Print each resolved stage without running anything.
fn print_dry_run(pipeline: &Pipeline) {
    println!("pipexec dry-run: {}", pipeline.command());
    println!();

    for (i, stage) in pipeline.stages().iter().enumerate() {
        println!("  [{i}] {}", stage.name);
        println!("      program: {}", stage.program.display());
        if !stage.args.is_empty() {
            println!("      args: {:?}", stage.args);
        }
        if !stage.env.is_empty() {
            let env: Vec<String> = stage.env.iter().map(|(k, v)| format!("{k}={v}")).collect();
            println!("      env: {:?}", env);
        }
    }

    debug!("dry-run complete (no execution)");
}
