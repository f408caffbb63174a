use crate::ports::outbound::ArtifactReader;
use crate::sbom_generation::domain::OutputArtifact;
use crate::shared::security::validate_regular_file;
use crate::shared::Result;
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

/// FileSystemReader adapter for reading build descriptors and artifacts
///
/// Reads are guarded: symbolic links, non-regular files and files above
/// the size limit are refused.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }

    /// Reads a build descriptor with security checks
    ///
    /// # Errors
    /// Returns an error if the path is a symlink, not a regular file,
    /// too large, or unreadable
    pub fn read_manifest(&self, path: &Path) -> Result<String> {
        let description = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("build file");
        validate_regular_file(path, description)?;
        fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", description, e))
    }

    /// Best-effort variant of [`read_manifest`](Self::read_manifest)
    pub fn try_read_manifest(&self, path: &Path) -> Option<String> {
        match self.read_manifest(path) {
            Ok(content) => Some(content),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "Cannot read build file");
                None
            }
        }
    }
}

impl ArtifactReader for FileSystemReader {
    fn inspect(&self, path: &Path) -> OutputArtifact {
        match fs::metadata(path) {
            Ok(metadata) if metadata.is_file() => {
                OutputArtifact::new(path.to_path_buf(), true, metadata.len())
            }
            _ => OutputArtifact::absent(path.to_path_buf()),
        }
    }

    fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(dir)
            .with_context(|| format!("Failed to list directory: {}", dir.display()))?;
        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_ok_and(|t| t.is_file()))
            .map(|entry| entry.path())
            .collect();
        files.sort();
        Ok(files)
    }

    fn read_artifact(&self, path: &Path) -> Result<String> {
        self.read_manifest(path)
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}
