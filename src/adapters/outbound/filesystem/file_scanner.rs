use crate::ports::outbound::FileScanner;
use crate::sbom_generation::domain::file_pattern::is_listed_directory;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// WalkDirScanner adapter walking a project tree with `walkdir`
///
/// Symbolic links are never followed. Entries that cannot be read are
/// logged at debug level and skipped.
pub struct WalkDirScanner;

impl WalkDirScanner {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WalkDirScanner {
    fn default() -> Self {
        Self::new()
    }
}

fn is_pruned(entry: &DirEntry, pruned: &[&str]) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| is_listed_directory(name, pruned))
}

impl FileScanner for WalkDirScanner {
    fn walk(&self, root: &Path, pruned: &[&str]) -> Vec<PathBuf> {
        let mut files = Vec::new();

        for entry in WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| !is_pruned(e, pruned))
        {
            match entry {
                Ok(entry) if entry.file_type().is_file() => files.push(entry.into_path()),
                Ok(_) => {}
                Err(e) => {
                    tracing::debug!(
                        path = ?e.path(),
                        error = %e,
                        "Skipping unreadable entry"
                    );
                }
            }
        }

        tracing::debug!(root = %root.display(), files = files.len(), "Directory walk complete");
        files
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_walk_finds_nested_files() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("a/b")).unwrap();
        fs::write(temp_dir.path().join("pom.xml"), "").unwrap();
        fs::write(temp_dir.path().join("a/b/pom.xml"), "").unwrap();

        let mut files = WalkDirScanner::new().walk(temp_dir.path(), &[]);
        files.sort();
        assert_eq!(
            files,
            vec![
                temp_dir.path().join("a/b/pom.xml"),
                temp_dir.path().join("pom.xml")
            ]
        );
    }

    #[test]
    fn test_walk_prunes_named_directories() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join(".git/objects")).unwrap();
        fs::write(temp_dir.path().join(".git/objects/pack.json"), "").unwrap();
        fs::write(temp_dir.path().join("package.json"), "").unwrap();

        let files = WalkDirScanner::new().walk(temp_dir.path(), &[".git"]);
        assert_eq!(files, vec![temp_dir.path().join("package.json")]);
    }

    #[test]
    fn test_walk_missing_root_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let files = WalkDirScanner::new().walk(&temp_dir.path().join("missing"), &[]);
        assert!(files.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_walk_does_not_follow_symlinked_directories() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("real")).unwrap();
        fs::write(temp_dir.path().join("real/go.mod"), "").unwrap();
        std::os::unix::fs::symlink(temp_dir.path().join("real"), temp_dir.path().join("link"))
            .unwrap();

        let files = WalkDirScanner::new().walk(temp_dir.path(), &[]);
        assert_eq!(files, vec![temp_dir.path().join("real/go.mod")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_walk_skips_unreadable_subtree() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let locked = temp_dir.path().join("locked");
        fs::create_dir_all(&locked).unwrap();
        fs::write(locked.join("pom.xml"), "").unwrap();
        fs::write(temp_dir.path().join("package.json"), "").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let files = WalkDirScanner::new().walk(temp_dir.path(), &[]);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert!(files.contains(&temp_dir.path().join("package.json")));
    }
}
