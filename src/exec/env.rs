// src/exec/env.rs

//! Execution settings shared by every stage of a pipeline, and extraction of
//! leading `VAR=value` assignments.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::errors::RunErrorKind;
use crate::fs::{FileSystem, RealFileSystem};
use crate::types::StdinMode;

/// `PATH` used when running in boot mode, where the inherited environment
/// can't be trusted to be complete.
pub const BOOT_PATH: &str = "/sbin:/bin:/usr/sbin:/usr/bin";

/// Input fed to the first stage of a pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StdinSource {
    Inherit,
    Null,
    Bytes(Vec<u8>),
}

impl From<StdinMode> for StdinSource {
    fn from(mode: StdinMode) -> Self {
        match mode {
            StdinMode::Inherit => StdinSource::Inherit,
            StdinMode::Null => StdinSource::Null,
        }
    }
}

/// Everything a pipeline needs to know about its surroundings.
///
/// Built once by the caller and passed by reference to each invocation, so
/// nothing here is read from global state while a pipeline is parsed or run.
#[derive(Debug, Clone)]
pub struct ExecConfig {
    /// Boot mode: the base environment is only `PATH=BOOT_PATH`.
    pub boot: bool,
    /// Base environment of every stage, in insertion order.
    pub env: Vec<(String, String)>,
    /// Replacement for `~`; `None` leaves `~` untouched.
    pub home: Option<PathBuf>,
    /// Directory for globbing and for the child processes. `None` means the
    /// current directory of this process.
    pub working_dir: Option<PathBuf>,
    pub stdin: StdinSource,
    pub fs: Arc<dyn FileSystem>,
}

impl ExecConfig {
    /// Snapshot of the current process: inherited environment (or the boot
    /// `PATH` when `boot` is set) and `$HOME`.
    pub fn new(boot: bool) -> Self {
        let env = if boot {
            vec![("PATH".to_string(), BOOT_PATH.to_string())]
        } else {
            std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
                .collect()
        };

        Self {
            boot,
            env,
            home: std::env::var_os("HOME")
                .filter(|h| !h.is_empty())
                .map(PathBuf::from),
            working_dir: None,
            stdin: StdinSource::Inherit,
            fs: Arc::new(RealFileSystem),
        }
    }

    pub fn from_process_env() -> Self {
        Self::new(false)
    }

    pub fn boot() -> Self {
        Self::new(true)
    }

    pub fn with_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = Some(home.into());
        self
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn with_stdin(mut self, stdin: StdinSource) -> Self {
        self.stdin = stdin;
        self
    }

    pub fn with_fs(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = fs;
        self
    }

    /// Set a base environment entry, replacing an existing one of the same name.
    pub fn with_env(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.env.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = value,
            None => self.env.push((name, value)),
        }
        self
    }

    pub fn var(&self, name: &str) -> Option<&str> {
        self.env
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// `PATH` used to resolve executables.
    pub fn search_path(&self) -> Option<&str> {
        self.var("PATH")
    }

    pub fn cwd(&self) -> PathBuf {
        match &self.working_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    pub fn fs(&self) -> &dyn FileSystem {
        self.fs.as_ref()
    }

    pub fn home(&self) -> Option<&Path> {
        self.home.as_deref()
    }
}

impl Default for ExecConfig {
    fn default() -> Self {
        Self::from_process_env()
    }
}

/// Split the leading `VAR=value` fields off a stage.
///
/// Returns the assignments in order and the index of the first field that is
/// not an assignment (the command name). `VAR= value` and `VAR =value` are
/// rejected since whitespace split the assignment in two.
pub(crate) fn split_assignments(
    fields: &[&str],
) -> Result<(Vec<(String, String)>, usize), RunErrorKind> {
    let mut assignments = Vec::new();

    for (i, field) in fields.iter().enumerate() {
        if field.ends_with('=') {
            return Err(RunErrorKind::InvalidEnvAssignment(field.to_string()));
        }
        if let Some(next) = fields.get(i + 1).filter(|next| next.starts_with('=')) {
            return Err(RunErrorKind::InvalidEnvAssignment(format!("{field} {next}")));
        }

        match field.split_once('=') {
            Some(("", _)) => {
                return Err(RunErrorKind::InvalidEnvAssignment(field.to_string()));
            }
            Some((name, value)) => assignments.push((name.to_string(), value.to_string())),
            None => return Ok((assignments, i)),
        }
    }

    Ok((assignments, fields.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_assignments_are_split_off() {
        let (env, start) = split_assignments(&["LANG=C", "TZ=UTC", "date", "-u"]).unwrap();
        assert_eq!(
            env,
            vec![
                ("LANG".to_string(), "C".to_string()),
                ("TZ".to_string(), "UTC".to_string())
            ]
        );
        assert_eq!(start, 2);
    }

    #[test]
    fn scan_stops_at_the_command() {
        let (env, start) = split_assignments(&["env", "A=1"]).unwrap();
        assert!(env.is_empty());
        assert_eq!(start, 0);
    }

    #[test]
    fn value_may_contain_equals() {
        let (env, _) = split_assignments(&["OPTS=a=b", "cmd"]).unwrap();
        assert_eq!(env, vec![("OPTS".to_string(), "a=b".to_string())]);
    }

    #[test]
    fn split_assignments_are_rejected() {
        for fields in [&["LANG=", "C", "find"][..], &["LANG", "=C", "find"][..], &["=C", "find"][..]] {
            assert!(matches!(
                split_assignments(fields),
                Err(RunErrorKind::InvalidEnvAssignment(_))
            ));
        }
    }

    #[test]
    fn only_assignments_leaves_no_command() {
        let (env, start) = split_assignments(&["A=1"]).unwrap();
        assert_eq!(env.len(), 1);
        assert_eq!(start, 1);
    }

    #[test]
    fn boot_mode_has_only_the_fixed_path() {
        let cfg = ExecConfig::boot();
        assert_eq!(cfg.env, vec![("PATH".to_string(), BOOT_PATH.to_string())]);
        assert_eq!(cfg.search_path(), Some(BOOT_PATH));
    }

    #[test]
    fn with_env_replaces_existing_entries() {
        let cfg = ExecConfig::boot().with_env("PATH", "/opt/bin").with_env("LANG", "C");
        assert_eq!(cfg.search_path(), Some("/opt/bin"));
        assert_eq!(cfg.var("LANG"), Some("C"));
        assert_eq!(cfg.env.len(), 2);
    }
}
