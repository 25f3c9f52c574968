//! Periodic snapshots of accumulated drafts
//!
//! Snapshots are written in place and are not transactional: an interrupted
//! write can leave a partial file behind.

use crate::error::BatchError;
use covenant_domain::PolicyDraft;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Writes `checkpoint_{n:05}.json` files into one directory
#[derive(Debug, Clone)]
pub struct CheckpointWriter {
    dir: PathBuf,
}

impl CheckpointWriter {
    /// Create a writer for `dir` (created on first write)
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Snapshot directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name of the snapshot taken at completion `index`
    pub fn file_name(index: usize) -> String {
        format!("checkpoint_{:05}.json", index)
    }

    /// Write the drafts completed so far
    pub async fn write(&self, index: usize, drafts: &[PolicyDraft]) -> Result<PathBuf, BatchError> {
        let body = serde_json::to_vec_pretty(drafts)?;
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(Self::file_name(index));
        tokio::fs::write(&path, body).await?;
        Ok(path)
    }

    /// Write a snapshot, logging instead of failing
    pub async fn write_logged(&self, index: usize, drafts: &[PolicyDraft]) {
        match self.write(index, drafts).await {
            Ok(path) => info!(path = %path.display(), records = drafts.len(), "Checkpoint written"),
            Err(e) => warn!(index, error = %e, "Checkpoint write failed"),
        }
    }
}
