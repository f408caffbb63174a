use crate::ports::outbound::OutputWriter;
use crate::shared::error::SbomError;
use crate::shared::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// FileSystemWriter adapter for writing run files
///
/// This adapter implements the OutputWriter port. Writing through a
/// symbolic link is refused.
pub struct FileSystemWriter;

impl FileSystemWriter {
    pub fn new() -> Self {
        Self
    }

    /// Validates that the parent directory exists before writing
    fn validate_parent_directory(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if parent != Path::new("") && !parent.is_dir() {
                return Err(SbomError::FileWriteError {
                    path: path.to_path_buf(),
                    details: format!("Parent directory does not exist: {}", parent.display()),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Rejects an existing output path that is a symbolic link
    fn validate_output_security(&self, path: &Path) -> Result<()> {
        if let Ok(metadata) = fs::symlink_metadata(path) {
            if metadata.is_symlink() {
                return Err(SbomError::SecurityError {
                    path: path.to_path_buf(),
                    reason: "Output path is a symbolic link".to_string(),
                    hint: "Remove the link or choose another output directory".to_string(),
                }
                .into());
            }
        }
        Ok(())
    }
}

impl Default for FileSystemWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputWriter for FileSystemWriter {
    fn ensure_directory(&self, path: &Path) -> Result<()> {
        if path.is_dir() {
            return Ok(());
        }
        fs::create_dir_all(path).map_err(|e| SbomError::OutputDirectoryError {
            path: PathBuf::from(path),
            details: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), "Created output directory");
        Ok(())
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        self.validate_parent_directory(path)?;
        self.validate_output_security(path)?;

        fs::write(path, content).map_err(|e| SbomError::FileWriteError {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;

        tracing::debug!(path = %path.display(), bytes = content.len(), "Wrote file");
        Ok(())
    }
}
