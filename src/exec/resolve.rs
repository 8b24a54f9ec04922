// src/exec/resolve.rs

//! Executable lookup and wrapper-command handling.
//!
//! Wrappers such as `sudo` and `xargs` take the real command as their next
//! argument. That command is resolved too, and arguments only start after
//! it, so the wrapped command's name is never glob-expanded.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::RunErrorKind;
use crate::exec::env::ExecConfig;

/// Commands whose next argument is another command.
pub const WRAPPERS: [&str; 2] = ["sudo", "xargs"];

/// Resolve a command name against the configured `PATH`.
///
/// Names containing a `/` are checked as paths relative to the working
/// directory instead.
pub fn lookup(name: &str, cfg: &ExecConfig) -> Result<PathBuf, RunErrorKind> {
    which::which_in(name, cfg.search_path(), cfg.cwd()).map_err(|source| {
        RunErrorKind::ExecutableNotFound {
            name: name.to_string(),
            source,
        }
    })
}

/// Whether the field at some index wraps another command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Wrapped {
    None,
    At { wrapper: usize, inner: usize },
}

fn wrapped_command(fields: &[String], at: usize) -> Result<Wrapped, RunErrorKind> {
    let base = Path::new(&fields[at])
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    if !WRAPPERS.contains(&base.as_str()) {
        return Ok(Wrapped::None);
    }
    if at + 1 >= fields.len() {
        return Err(RunErrorKind::MissingWrappedCommand(base));
    }
    Ok(Wrapped::At {
        wrapper: at,
        inner: at + 1,
    })
}

/// Follow a chain of wrappers starting at the command name (`fields[0]`).
///
/// Each wrapped command is replaced by its resolved path. Returns the index
/// where the real arguments begin.
pub(crate) fn resolve_wrappers(
    fields: &mut [String],
    cfg: &ExecConfig,
) -> Result<usize, RunErrorKind> {
    let mut args_start = 1;
    let mut current = 0;

    while let Wrapped::At { wrapper, inner } = wrapped_command(fields, current)? {
        let resolved = lookup(&fields[inner], cfg)?;
        let resolved = resolved.to_string_lossy().into_owned();

        if fields[inner] != resolved {
            debug!(
                wrapper = %fields[wrapper],
                command = %fields[inner],
                resolved = %resolved,
                "resolved wrapped command"
            );
            fields[inner] = resolved;
        }

        args_start = inner + 1;
        current = inner;
    }

    Ok(args_start)
}
