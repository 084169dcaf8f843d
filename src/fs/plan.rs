//! Deferred writes.
//!
//! Commands compute every output first and only touch the filesystem once all
//! fatal checks have passed. A [`WritePlan`] collects the pending writes; nothing
//! is written until [`WritePlan::commit`] is called.

use super::atomic::atomic_write_file;
use crate::error::Result;
use std::path::{Path, PathBuf};

/// One pending file write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingWrite {
    pub path: PathBuf,
    pub content: String,
}

/// Ordered set of pending writes.
#[derive(Debug, Clone, Default)]
pub struct WritePlan {
    writes: Vec<PendingWrite>,
}

impl WritePlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a write. A later write to the same path replaces the earlier one.
    pub fn push(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) {
        let path = path.into();
        let content = content.into();
        match self.writes.iter_mut().find(|w| w.path == path) {
            Some(existing) => existing.content = content,
            None => self.writes.push(PendingWrite { path, content }),
        }
    }

    pub fn len(&self) -> usize {
        self.writes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.writes.iter().map(|w| w.path.as_path())
    }

    pub fn writes(&self) -> &[PendingWrite] {
        &self.writes
    }

    /// Write every pending file atomically, in order. Returns the number written.
    pub fn commit(self) -> Result<usize> {
        for write in &self.writes {
            atomic_write_file(&write.path, &write.content)?;
            tracing::debug!(path = %write.path.display(), "wrote file");
        }
        tracing::info!(files = self.writes.len(), "committed pending writes");
        Ok(self.writes.len())
    }
}
