//! Writes exported reports into a directory.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use oncodash_core::{DownloadSink, ExportArtifact, SinkError, ensure_directory};
use tracing::debug;

/// Saves each artifact as `<dir>/<filename>`, never overwriting.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DownloadSink for DirectorySink {
    fn deliver(&self, artifact: &ExportArtifact) -> Result<PathBuf, SinkError> {
        ensure_directory(&self.dir).map_err(|e| SinkError::Write {
            path: self.dir.clone(),
            reason: e.to_string(),
        })?;

        let path = self.dir.join(&artifact.filename);
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => SinkError::AlreadyExists(path.clone()),
                _ => SinkError::Write {
                    path: path.clone(),
                    reason: e.to_string(),
                },
            })?;

        if let Err(e) = file.write_all(&artifact.bytes).and_then(|()| file.sync_all()) {
            drop(file);
            // Leave no truncated report behind.
            let _ = fs::remove_file(&path);
            return Err(SinkError::Write {
                path,
                reason: e.to_string(),
            });
        }

        debug!(path = %path.display(), bytes = artifact.bytes.len(), "Artifact written");
        Ok(path)
    }
}
