#![allow(dead_code)]

use std::path::PathBuf;

use pipexec::config::{ConfigFile, RawConfigFile};
use pipexec::types::{PackageSystem, StdinMode};

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn boot(mut self, val: bool) -> Self {
        self.config.exec.boot = val;
        self
    }

    pub fn home(mut self, home: impl Into<PathBuf>) -> Self {
        self.config.exec.home = Some(home.into());
        self
    }

    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.exec.working_dir = Some(dir.into());
        self
    }

    pub fn stdin(mut self, mode: StdinMode) -> Self {
        self.config.exec.stdin = mode;
        self
    }

    pub fn env(mut self, name: &str, value: &str) -> Self {
        self.config.exec.env.insert(name.to_string(), value.to_string());
        self
    }

    pub fn package_system(mut self, system: PackageSystem) -> Self {
        self.config.packager.system = Some(system);
        self
    }

    pub fn simulate(mut self, val: bool) -> Self {
        self.config.packager.simulate = val;
        self
    }

    pub fn refresh_on_first_install(mut self, val: bool) -> Self {
        self.config.packager.refresh_on_first_install = val;
        self
    }

    pub fn sudo(mut self, val: bool) -> Self {
        self.config.packager.sudo = val;
        self
    }

    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
