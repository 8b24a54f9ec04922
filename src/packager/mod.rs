// src/packager/mod.rs

//! Basic operations on the system package manager.
//!
//! The command lines themselves live in [`templates`]; [`Packager`] runs
//! them through a [`CommandRunner`] and turns a failed or unsuccessful
//! command into an error. Only the `ok`/error outcome of each command is
//! looked at, never its output.

pub mod templates;

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info};

use crate::errors::{PipexecError, Result};
use crate::exec::CommandRunner;
use crate::fs::FileSystem;
use crate::types::PackageSystem;

/// Behaviour switches for a [`Packager`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackagerOptions {
    /// Pass `-s` to `apt-get` so nothing is changed.
    pub simulate: bool,
    /// Refresh package lists before the first install.
    pub refresh_on_first_install: bool,
    /// Run every command through `sudo`, asking for credentials once up front.
    pub sudo: bool,
}

impl Default for PackagerOptions {
    fn default() -> Self {
        Self {
            simulate: false,
            refresh_on_first_install: true,
            sudo: false,
        }
    }
}

pub struct Packager<R> {
    system: PackageSystem,
    runner: R,
    options: PackagerOptions,
    refresh_pending: AtomicBool,
}

impl<R: CommandRunner> Packager<R> {
    pub fn new(system: PackageSystem, runner: R, options: PackagerOptions) -> Self {
        Self {
            system,
            runner,
            options,
            refresh_pending: AtomicBool::new(options.refresh_on_first_install),
        }
    }

    pub fn system(&self) -> PackageSystem {
        self.system
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn options(&self) -> PackagerOptions {
        self.options
    }

    /// Ask for `sudo` credentials now when commands will need them, so a
    /// long operation doesn't stop halfway through to prompt.
    pub async fn prepare(&self) -> Result<()> {
        if self.options.sudo {
            prime_sudo(&self.runner).await?;
        }
        Ok(())
    }

    pub async fn update(&self) -> Result<()> {
        self.run_all(self.system.update_commands()).await
    }

    /// Install a package. Only the first call refreshes package lists.
    pub async fn install(&self, name: &str) -> Result<()> {
        let refresh = self.refresh_pending.swap(false, Ordering::SeqCst);
        self.run_all(
            self.system
                .install_commands(name, refresh, self.options.simulate),
        )
        .await
    }

    pub async fn remove(&self, name: &str, metapackage: bool) -> Result<()> {
        self.run_all(
            self.system
                .remove_commands(name, metapackage, self.options.simulate),
        )
        .await
    }

    pub async fn purge(&self, name: &str, metapackage: bool) -> Result<()> {
        self.run_all(
            self.system
                .purge_commands(name, metapackage, self.options.simulate),
        )
        .await
    }

    pub async fn clean(&self) -> Result<()> {
        self.run_all(self.system.clean_commands()).await
    }

    pub async fn upgrade(&self) -> Result<()> {
        self.run_all(self.system.upgrade_commands()).await
    }

    /// Run commands in order, stopping at the first one that fails.
    async fn run_all(&self, commands: Vec<String>) -> Result<()> {
        if commands.is_empty() {
            debug!(system = %self.system, "operation has no commands on this system");
        }

        for command in commands {
            let command = if self.options.sudo {
                format!("sudo {command}")
            } else {
                command
            };
            info!(system = %self.system, command = %command, "running package manager command");
            let result = self.runner.run(&command).await?;
            if !result.ok {
                return Err(PipexecError::CommandUnsuccessful(command));
            }
        }
        Ok(())
    }
}

/// Find the package system in use by probing `/usr/bin` for each tool.
pub fn detect(fs: &dyn FileSystem) -> Option<PackageSystem> {
    let found = PackageSystem::ALL
        .into_iter()
        .find(|system| fs.is_file(&system.binary_path()));
    debug!(?found, "package system detection");
    found
}

/// Ask for `sudo` credentials up front so later commands don't stop to
/// prompt halfway through.
pub async fn prime_sudo<R: CommandRunner + ?Sized>(runner: &R) -> Result<()> {
    let command = "sudo /bin/true";
    let result = runner.run(command).await?;
    if !result.ok {
        return Err(PipexecError::CommandUnsuccessful(command.to_string()));
    }
    Ok(())
}
