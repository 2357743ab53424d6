//! File-download sink port.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ExportArtifact;

/// Errors delivering an artifact.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Refusing to overwrite existing file {0}")]
    AlreadyExists(PathBuf),

    #[error("Failed to write {path}: {reason}")]
    Write { path: PathBuf, reason: String },
}

/// Consumes a finished export artifact (one download event).
pub trait DownloadSink: Send + Sync {
    /// Deliver the artifact, returning where it ended up.
    fn deliver(&self, artifact: &ExportArtifact) -> Result<PathBuf, SinkError>;
}
