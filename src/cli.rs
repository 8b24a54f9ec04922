// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, Subcommand, ValueEnum};

use crate::types::PackageSystem;

/// Command-line arguments for `pipexec`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "pipexec",
    version,
    about = "Run command pipelines without a shell, and drive package managers.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Pipexec.toml` in the current working directory, if present.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<String>,

    /// Boot mode: ignore the inherited environment and use a fixed `PATH`.
    #[arg(long, global = true)]
    pub boot: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `PIPEXEC_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run a pipeline, e.g. `pipexec run "ls *.rs | wc -l"`.
    ///
    /// Exits 1 if the last stage did not succeed.
    Run {
        /// The command line. Quote it so your own shell passes it through whole.
        command: String,

        /// Parse and resolve, print the stages, but don't start anything.
        #[arg(long)]
        dry_run: bool,
    },

    /// Drive the system package manager.
    Pkg {
        /// Package system to use instead of the configured or detected one.
        #[arg(long, value_name = "SYSTEM")]
        system: Option<PackageSystem>,

        /// Run the package manager through `sudo`, asking for the password first.
        #[arg(long)]
        sudo: bool,

        #[command(subcommand)]
        action: PkgAction,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum PkgAction {
    /// Refresh package lists.
    Update,
    /// Install a package.
    Install { name: String },
    /// Remove a package.
    Remove {
        name: String,
        /// Also remove dependencies that are no longer needed.
        #[arg(long)]
        meta: bool,
    },
    /// Remove a package and its configuration files.
    Purge {
        name: String,
        #[arg(long)]
        meta: bool,
    },
    /// Erase downloaded archive files.
    Clean,
    /// Upgrade all installed packages.
    Upgrade,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
