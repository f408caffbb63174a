use crate::sbom_generation::domain::file_pattern::is_listed_directory;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// BranchGrouper - attributes loose binaries to project branches
///
/// A binary's branch is its nearest ancestor directory whose name is not a
/// noise directory (build output, dependency cache, library dump). When the
/// walk reaches the scan root, the root is the branch. Nested branches are
/// then folded into the shallowest enclosing one.
pub struct BranchGrouper;

impl BranchGrouper {
    /// Groups binary files into root branches
    ///
    /// # Arguments
    /// * `scan_root` - Directory the binaries were found under
    /// * `binaries` - Binary files in any order
    /// * `noise_directories` - Directory names that never form a branch
    ///
    /// # Returns
    /// Root branch → sorted binaries. Every binary appears in exactly one
    /// branch and no branch is an ancestor of another.
    pub fn group(
        scan_root: &Path,
        binaries: &[PathBuf],
        noise_directories: &[&str],
    ) -> BTreeMap<PathBuf, Vec<PathBuf>> {
        let mut by_branch: BTreeMap<PathBuf, BTreeSet<PathBuf>> = BTreeMap::new();
        for binary in binaries {
            let branch = Self::nearest_branch(scan_root, binary, noise_directories);
            by_branch.entry(branch).or_default().insert(binary.clone());
        }

        let mut candidates: Vec<&PathBuf> = by_branch.keys().collect();
        candidates.sort_by(|a, b| {
            a.components()
                .count()
                .cmp(&b.components().count())
                .then_with(|| a.cmp(b))
        });

        let mut roots: Vec<PathBuf> = Vec::new();
        for candidate in candidates {
            if !roots.iter().any(|root| candidate.starts_with(root)) {
                roots.push(candidate.clone());
            }
        }

        let mut grouped: BTreeMap<PathBuf, BTreeSet<PathBuf>> = BTreeMap::new();
        for (branch, files) in by_branch {
            let root = roots
                .iter()
                .find(|root| branch.starts_with(root))
                .cloned()
                .unwrap_or(branch);
            grouped.entry(root).or_default().extend(files);
        }

        grouped
            .into_iter()
            .map(|(branch, files)| (branch, files.into_iter().collect()))
            .collect()
    }

    /// Walks upward from the binary until a non-noise directory or the scan root
    pub fn nearest_branch(scan_root: &Path, binary: &Path, noise_directories: &[&str]) -> PathBuf {
        let mut current = binary.parent();
        while let Some(dir) = current {
            if dir == scan_root || !dir.starts_with(scan_root) {
                break;
            }
            let is_noise = dir
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|name| is_listed_directory(name, noise_directories));
            if !is_noise {
                return dir.to_path_buf();
            }
            current = dir.parent();
        }
        scan_root.to_path_buf()
    }
}
