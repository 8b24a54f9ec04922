// src/exec/glob.rs

//! Filename wildcard expansion.
//!
//! Patterns are matched one path component at a time, like a shell does:
//! the directory part is expanded first (recursively, if it contains
//! wildcards) and the last component is matched against the entries of each
//! resulting directory. `*` never crosses a `/`.

use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};

use crate::fs::FileSystem;

/// True if `s` contains a wildcard character.
pub fn has_meta(s: &str) -> bool {
    s.contains(['*', '?', '['])
}

/// Expand `pattern` against the filesystem, relative to `cwd`.
///
/// Returns the matching paths spelled the way the pattern was (relative
/// patterns give relative paths), sorted within each directory. A pattern
/// without wildcards, or one that matches nothing, yields an empty list.
pub fn expand_glob(
    fs: &dyn FileSystem,
    cwd: &Path,
    pattern: &str,
) -> Result<Vec<String>, globset::Error> {
    if !has_meta(pattern) {
        return Ok(Vec::new());
    }

    let (dir, file) = split_pattern(pattern);
    let matcher = component_matcher(file)?;

    let dirs = if has_meta(dir) {
        expand_glob(fs, cwd, dir)?
    } else {
        vec![dir.to_string()]
    };

    let mut matches = Vec::new();
    for dir in dirs {
        let on_disk = on_disk_path(cwd, &dir);
        if !fs.is_dir(&on_disk) {
            continue;
        }
        // Unreadable directories just don't contribute matches.
        let Ok(entries) = fs.read_dir(&on_disk) else {
            continue;
        };

        let mut names: Vec<String> = entries
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect();
        names.sort();

        matches.extend(
            names
                .into_iter()
                .filter(|name| matcher.is_match(name))
                .map(|name| join(&dir, &name)),
        );
    }

    Ok(matches)
}

fn component_matcher(component: &str) -> Result<GlobMatcher, globset::Error> {
    Ok(GlobBuilder::new(&literal_braces(component))
        .literal_separator(true)
        .build()?
        .compile_matcher())
}

/// Rewrite `{` and `}` as one-character classes so globset matches them
/// literally instead of as alternation. Escapes and classes are copied as is.
fn literal_braces(component: &str) -> String {
    let mut out = String::with_capacity(component.len());
    let mut escaped = false;
    // Characters seen since the `[` of the class we are in, if any.
    let mut class: Option<usize> = None;

    for c in component.chars() {
        if let Some(seen) = class {
            out.push(c);
            let negation = seen == 0 && (c == '!' || c == '^');
            class = match c {
                ']' if seen > 0 => None,
                _ if negation => Some(0),
                _ => Some(seen + 1),
            };
            continue;
        }
        if escaped {
            out.push(c);
            escaped = false;
            continue;
        }

        match c {
            '{' => out.push_str("[{]"),
            '}' => out.push_str("[}]"),
            '[' => {
                out.push(c);
                class = Some(0);
            }
            '\\' => {
                out.push(c);
                escaped = true;
            }
            _ => out.push(c),
        }
    }
    out
}

/// Split into (directory, last component). The directory of a bare name is
/// `"."`, and trailing slashes on the directory are dropped.
fn split_pattern(pattern: &str) -> (&str, &str) {
    match pattern.rfind('/') {
        None => (".", pattern),
        Some(i) => {
            let dir = pattern[..i].trim_end_matches('/');
            let dir = if dir.is_empty() { "/" } else { dir };
            (dir, &pattern[i + 1..])
        }
    }
}

fn on_disk_path(cwd: &Path, dir: &str) -> PathBuf {
    if dir == "." {
        cwd.to_path_buf()
    } else {
        cwd.join(dir)
    }
}

fn join(dir: &str, name: &str) -> String {
    if dir == "." {
        name.to_string()
    } else if dir.ends_with('/') {
        format!("{dir}{name}")
    } else {
        format!("{dir}/{name}")
    }
}
