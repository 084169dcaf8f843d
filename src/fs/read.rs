//! Reading documents and discovering them in directories.

use crate::error::{Result, SyncError};
use globset::Glob;
use std::path::{Path, PathBuf};

/// Read a UTF-8 text file.
pub fn read_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    std::fs::read_to_string(path)
        .map_err(|e| SyncError::IoError(format!("failed to read '{}': {}", path.display(), e)))
}

/// List files directly inside `dir` whose file name matches `pattern`, sorted.
pub fn list_documents<P: AsRef<Path>>(dir: P, pattern: &str) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let matcher = Glob::new(pattern)
        .map_err(|e| SyncError::ConfigError(format!("invalid document glob '{}': {}", pattern, e)))?
        .compile_matcher();

    let entries = std::fs::read_dir(dir).map_err(|e| {
        SyncError::IoError(format!(
            "failed to list directory '{}': {}",
            dir.display(),
            e
        ))
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            SyncError::IoError(format!(
                "failed to list directory '{}': {}",
                dir.display(),
                e
            ))
        })?;
        let path = entry.path();
        if path.is_file() && matcher.is_match(entry.file_name()) {
            paths.push(path);
        }
    }

    paths.sort();
    Ok(paths)
}

/// Render a path with forward slashes for messages and reports.
pub fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
