use crate::shared::Result;
use std::path::Path;

/// OutputWriter port for persisting run files
///
/// This port abstracts where summaries, logs and merged SBOMs end up.
pub trait OutputWriter {
    /// Creates a directory and its parents if absent
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created or the path
    /// exists and is not a directory
    fn ensure_directory(&self, path: &Path) -> Result<()>;

    /// Writes `content` to `path`, replacing any existing file
    ///
    /// # Errors
    /// Returns an error if:
    /// - The parent directory does not exist
    /// - The path is a symbolic link
    /// - Writing fails
    fn write(&self, path: &Path, content: &str) -> Result<()>;
}
