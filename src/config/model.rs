// src/config/model.rs

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::exec::ExecConfig;
use crate::packager::PackagerOptions;
use crate::types::{PackageSystem, StdinMode};

/// Raw configuration as read from a TOML file, before validation.
///
/// ```toml
/// [exec]
/// boot = false
/// home = "/home/me"
/// working_dir = "/srv"
/// stdin = "null"
///
/// [exec.env]
/// LANG = "C"
///
/// [packager]
/// system = "deb"
/// simulate = true
/// sudo = true
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub exec: ExecSection,

    #[serde(default)]
    pub packager: PackagerSection,
}

/// Validated configuration. Build one with `ConfigFile::try_from(raw)`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    exec: ExecSection,
    packager: PackagerSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(exec: ExecSection, packager: PackagerSection) -> Self {
        Self { exec, packager }
    }

    pub fn exec_section(&self) -> &ExecSection {
        &self.exec
    }

    pub fn packager_section(&self) -> &PackagerSection {
        &self.packager
    }

    /// Force boot mode on, e.g. from a command-line flag.
    pub fn with_boot(mut self, boot: bool) -> Self {
        self.exec.boot |= boot;
        self
    }

    /// Build the runtime settings for pipelines.
    ///
    /// Starts from the process environment (or the boot `PATH`), then applies
    /// `[exec.env]`, `home`, `working_dir` and `stdin`.
    pub fn exec_config(&self) -> ExecConfig {
        let mut cfg = ExecConfig::new(self.exec.boot);
        for (name, value) in &self.exec.env {
            cfg = cfg.with_env(name, value);
        }
        if let Some(home) = &self.exec.home {
            cfg = cfg.with_home(home);
        }
        if let Some(dir) = &self.exec.working_dir {
            cfg = cfg.with_working_dir(dir);
        }
        cfg.with_stdin(self.exec.stdin.into())
    }

    pub fn packager_options(&self) -> PackagerOptions {
        PackagerOptions {
            simulate: self.packager.simulate,
            refresh_on_first_install: self.packager.refresh_on_first_install,
            sudo: self.packager.sudo,
        }
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        let raw = RawConfigFile::default();
        Self::new_unchecked(raw.exec, raw.packager)
    }
}

/// `[exec]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExecSection {
    /// Use only `PATH=/sbin:/bin:/usr/sbin:/usr/bin` as the base environment.
    #[serde(default)]
    pub boot: bool,

    /// Directory `~` expands to; defaults to `$HOME`.
    #[serde(default)]
    pub home: Option<PathBuf>,

    /// Working directory for globbing and child processes.
    #[serde(default)]
    pub working_dir: Option<PathBuf>,

    /// `"inherit"` (default) or `"null"`.
    #[serde(default)]
    pub stdin: StdinMode,

    /// Extra base environment entries (`[exec.env]`).
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

/// `[packager]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct PackagerSection {
    /// Package system to drive; detected from `/usr/bin` when absent.
    #[serde(default)]
    pub system: Option<PackageSystem>,

    #[serde(default)]
    pub simulate: bool,

    #[serde(default = "default_refresh_on_first_install")]
    pub refresh_on_first_install: bool,

    /// Prefix package manager commands with `sudo`.
    #[serde(default)]
    pub sudo: bool,
}

fn default_refresh_on_first_install() -> bool {
    true
}

impl Default for PackagerSection {
    fn default() -> Self {
        Self {
            system: None,
            simulate: false,
            refresh_on_first_install: default_refresh_on_first_install(),
            sudo: false,
        }
    }
}
