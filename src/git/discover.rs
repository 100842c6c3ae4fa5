use crate::error::{CommitMapError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Direct children of `root` that carry a `.git` entry, sorted by name.
pub fn discover_repositories(root: &Path) -> Result<Vec<PathBuf>> {
    if root.as_os_str().is_empty() {
        return Err(CommitMapError::InvalidRoot("no repository root given".to_string()));
    }
    if !root.is_dir() {
        return Err(CommitMapError::InvalidRoot(format!(
            "{} is not a directory",
            root.display()
        )));
    }

    let mut repos = Vec::new();
    for entry in fs::read_dir(root)? {
        let path = entry?.path();
        if path.is_dir() && path.join(".git").exists() {
            repos.push(path);
        }
    }
    repos.sort_by_key(|p| repo_name(p));
    Ok(repos)
}

/// Identifier for a discovered repository: its directory name.
pub fn repo_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
