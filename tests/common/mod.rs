#![allow(dead_code)]

use std::fs;
use std::path::Path;

use pipexec::exec::{ExecConfig, StdinSource};

pub use pipexec_test_utils::{builders, fake_runner, init_tracing};

/// Settings for running real processes in tests: inherited environment,
/// no stdin, and `dir` as working directory.
pub fn exec_config_in(dir: &Path) -> ExecConfig {
    ExecConfig::from_process_env()
        .with_working_dir(dir)
        .with_stdin(StdinSource::Null)
}

/// Create an empty file at `dir/rel`, creating parents as needed.
pub fn touch(dir: &Path, rel: &str) {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, b"").unwrap();
}
