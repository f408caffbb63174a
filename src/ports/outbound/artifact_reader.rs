use crate::sbom_generation::domain::OutputArtifact;
use crate::shared::Result;
use std::path::{Path, PathBuf};

/// ArtifactReader port for inspecting files produced by generation tools
pub trait ArtifactReader {
    /// Records whether `path` exists as a regular file and its size
    fn inspect(&self, path: &Path) -> OutputArtifact;

    /// Regular files directly inside `dir`, sorted by path
    ///
    /// # Errors
    /// Returns an error if the directory cannot be listed
    fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>>;

    /// Reads a generated artifact with the same guards as build descriptors
    fn read_artifact(&self, path: &Path) -> Result<String>;
}
