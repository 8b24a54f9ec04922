// src/fs/mock.rs

use super::FileSystem;
use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub enum MockEntry {
    File,
    Dir(Vec<String>), // child names, in insertion order
}

/// In-memory tree of files and directories.
///
/// Paths are stored exactly as given, so tests should use the same spelling
/// (absolute, or relative to `.`) when adding and when querying.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    entries: Arc<Mutex<HashMap<PathBuf, MockEntry>>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        let mut entries = HashMap::new();
        entries.insert(PathBuf::from("."), MockEntry::Dir(Vec::new()));
        entries.insert(PathBuf::from("/"), MockEntry::Dir(Vec::new()));

        Self {
            entries: Arc::new(Mutex::new(entries)),
        }
    }

    /// Add a file, creating its parent directories implicitly.
    pub fn add_file(&self, path: impl AsRef<Path>) {
        let path = path.as_ref().to_path_buf();
        let mut entries = self.entries.lock().unwrap();
        entries.insert(path.clone(), MockEntry::File);
        link_to_parent(&mut entries, &path);
    }

    /// Add an empty directory, creating its parents implicitly.
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = path.as_ref().to_path_buf();
        let mut entries = self.entries.lock().unwrap();
        ensure_dir(&mut entries, &path);
    }
}

fn parent_of(path: &Path) -> Option<&Path> {
    match path.parent() {
        Some(parent) if parent.as_os_str().is_empty() => Some(Path::new(".")),
        other => other,
    }
}

fn ensure_dir(entries: &mut HashMap<PathBuf, MockEntry>, path: &Path) {
    if entries.contains_key(path) {
        return;
    }
    entries.insert(path.to_path_buf(), MockEntry::Dir(Vec::new()));
    link_to_parent(entries, path);
}

fn link_to_parent(entries: &mut HashMap<PathBuf, MockEntry>, path: &Path) {
    let Some(parent) = parent_of(path) else {
        return;
    };
    if parent == path {
        return;
    }
    ensure_dir(entries, parent);

    if let (Some(MockEntry::Dir(children)), Some(name)) = (
        entries.get_mut(parent),
        path.file_name().and_then(|n| n.to_str()),
    ) {
        if !children.iter().any(|c| c == name) {
            children.push(name.to_string());
        }
    }
}

impl FileSystem for MockFileSystem {
    fn is_file(&self, path: &Path) -> bool {
        let entries = self.entries.lock().unwrap();
        matches!(entries.get(path), Some(MockEntry::File))
    }

    fn is_dir(&self, path: &Path) -> bool {
        let entries = self.entries.lock().unwrap();
        matches!(entries.get(path), Some(MockEntry::Dir(_)))
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let entries = self.entries.lock().unwrap();
        match entries.get(path) {
            Some(MockEntry::Dir(children)) => {
                Ok(children.iter().map(|name| path.join(name)).collect())
            }
            _ => Err(anyhow!("Not a directory or not found: {:?}", path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_file_creates_parent_dirs() {
        let fs = MockFileSystem::new();
        fs.add_file("src/exec/mod.rs");

        assert!(fs.is_dir(Path::new("src")));
        assert!(fs.is_dir(Path::new("src/exec")));
        assert!(fs.is_file(Path::new("src/exec/mod.rs")));
        assert_eq!(
            fs.read_dir(Path::new(".")).unwrap(),
            vec![PathBuf::from("./src")]
        );
    }

    #[test]
    fn absolute_paths_hang_off_root() {
        let fs = MockFileSystem::new();
        fs.add_file("/usr/bin/apt-get");

        assert!(fs.is_file(Path::new("/usr/bin/apt-get")));
        assert!(!fs.is_file(Path::new("/usr/bin")));
        assert_eq!(
            fs.read_dir(Path::new("/usr/bin")).unwrap(),
            vec![PathBuf::from("/usr/bin/apt-get")]
        );
    }
}
