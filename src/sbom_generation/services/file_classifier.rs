use crate::sbom_generation::domain::file_pattern::is_listed_directory;
use crate::sbom_generation::domain::FilePattern;
use std::path::{Path, PathBuf};

/// FileClassifier - matches walked files against an ecosystem's patterns
///
/// The tree is walked once per run; every ecosystem then classifies the same
/// file list with its own patterns and its own excluded-directory set.
pub struct FileClassifier;

impl FileClassifier {
    /// Returns every file whose name matches one of `patterns` and whose
    /// directories below `root` are all outside `excluded`
    ///
    /// Output order follows `files`; a file matching several patterns is
    /// returned once.
    pub fn matching(
        root: &Path,
        files: &[PathBuf],
        patterns: &[FilePattern],
        excluded: &[&str],
    ) -> Vec<PathBuf> {
        files
            .iter()
            .filter(|file| Self::matches_any(file, patterns))
            .filter(|file| !Self::is_within_excluded(root, file, excluded))
            .cloned()
            .collect()
    }

    /// Checks a file name against a list of patterns
    pub fn matches_any(file: &Path, patterns: &[FilePattern]) -> bool {
        file.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| patterns.iter().any(|p| p.matches(name)))
    }

    /// True when any directory between `root` (exclusive) and the file is excluded
    pub fn is_within_excluded(root: &Path, file: &Path, excluded: &[&str]) -> bool {
        let relative = file.strip_prefix(root).unwrap_or(file);
        let Some(parent) = relative.parent() else {
            return false;
        };
        parent
            .components()
            .filter_map(|c| c.as_os_str().to_str())
            .any(|name| is_listed_directory(name, excluded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns(list: &[&str]) -> Vec<FilePattern> {
        list.iter().map(|p| FilePattern::new(p).unwrap()).collect()
    }

    #[test]
    fn test_matching_applies_patterns() {
        let root = Path::new("/proj");
        let files = vec![
            PathBuf::from("/proj/pom.xml"),
            PathBuf::from("/proj/README.md"),
            PathBuf::from("/proj/app/pom.xml"),
        ];
        let found = FileClassifier::matching(root, &files, &patterns(&["pom.xml"]), &[]);
        assert_eq!(
            found,
            vec![
                PathBuf::from("/proj/pom.xml"),
                PathBuf::from("/proj/app/pom.xml")
            ]
        );
    }

    #[test]
    fn test_excluded_directory_is_per_ecosystem() {
        let root = Path::new("/proj");
        let files = vec![
            PathBuf::from("/proj/setup.py"),
            PathBuf::from("/proj/.venv/lib/pkg/setup.py"),
        ];
        let python = FileClassifier::matching(
            root,
            &files,
            &patterns(&["setup.py"]),
            &[".venv", "site-packages"],
        );
        assert_eq!(python, vec![PathBuf::from("/proj/setup.py")]);

        // An ecosystem that does not exclude .venv still sees the nested file
        let other = FileClassifier::matching(root, &files, &patterns(&["setup.py"]), &["node_modules"]);
        assert_eq!(other.len(), 2);
    }

    #[test]
    fn test_root_named_like_excluded_directory_is_not_excluded() {
        let root = Path::new("/work/build");
        let file = Path::new("/work/build/pom.xml");
        assert!(!FileClassifier::is_within_excluded(root, file, &["build"]));
    }

    #[test]
    fn test_file_matching_two_patterns_returned_once() {
        let root = Path::new("/proj");
        let files = vec![PathBuf::from("/proj/release.tar.gz")];
        let found = FileClassifier::matching(root, &files, &patterns(&["*.tar.gz", "*.gz"]), &[]);
        assert_eq!(found.len(), 1);
    }
}
