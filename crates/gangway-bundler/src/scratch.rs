//! Scratch artifacts.
//!
//! Bridge sources and persisted configs are written as named text files
//! under a scratch root so they can be inspected after the run. Files are
//! never auto-deleted; retention is the caller's policy.

use std::fs;
use std::path::{Path, PathBuf};

use crate::Result;

#[derive(Debug, Clone)]
pub struct ScratchDir {
    root: PathBuf,
}

impl ScratchDir {
    /// Create (or reuse) the scratch directory at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist named text content, returning the path it was written to.
    pub fn persist(&self, name: &str, contents: &str) -> Result<PathBuf> {
        let path = self.root.join(name);
        fs::write(&path, contents)?;
        tracing::debug!(artifact = %path.display(), "persisted scratch artifact");
        Ok(path)
    }
}
