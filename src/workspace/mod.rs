//! Per-case workspace lifecycle: scoped acquisition of the case directory
//! with guaranteed release on both the success and the failure path.
//!
//! The directory name is deterministic from `(entity_count, step_count)`,
//! so a preserved workspace from an earlier run is reused rather than
//! duplicated. Release deletes the directory recursively unless
//! preservation was requested; deletion failures propagate rather than
//! being swallowed.

use crate::case::CaseSpec;
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Ephemeral directory holding all artifacts for one case.
#[derive(Debug)]
pub struct Workspace {
    path: PathBuf,
    keep: bool,
    released: bool,
}

impl Workspace {
    /// Create (or reuse) the case directory under `root`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn create(root: &Path, case: &CaseSpec, keep: bool) -> Result<Self> {
        let path = root.join(case.dir_name());
        fs::create_dir_all(&path)?;
        Ok(Self {
            path,
            keep,
            released: false,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Release the workspace: delete it recursively, unless preservation
    /// was requested. Callers invoke this identically on success and
    /// failure paths.
    ///
    /// # Errors
    ///
    /// Returns an error if the recursive delete fails.
    pub fn release(mut self) -> Result<()> {
        self.released = true;
        if self.keep {
            tracing::info!(dir = %self.path.display(), "preserving workspace");
            return Ok(());
        }
        fs::remove_dir_all(&self.path)?;
        Ok(())
    }
}

impl Drop for Workspace {
    /// Backstop for paths that never reach [`Workspace::release`] (for
    /// example a panic mid-case). Best effort only; explicit release is
    /// the path on which deletion errors propagate.
    fn drop(&mut self) {
        if !self.released && !self.keep {
            let _ = fs::remove_dir_all(&self.path);
        }
    }
}
