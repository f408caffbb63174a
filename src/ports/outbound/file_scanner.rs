use std::path::{Path, PathBuf};

/// FileScanner port for walking a project tree
///
/// The walk never follows symbolic links, so no physical directory is
/// visited twice. Unreadable subtrees are skipped, never fatal.
pub trait FileScanner {
    /// Returns every regular file beneath `root`
    ///
    /// # Arguments
    /// * `root` - Directory to walk
    /// * `pruned` - Directory names whose subtrees are not entered at all
    fn walk(&self, root: &Path, pruned: &[&str]) -> Vec<PathBuf>;
}
