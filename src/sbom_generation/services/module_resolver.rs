use crate::sbom_generation::domain::BuildFileMatch;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// ModuleTree - the matches of one ecosystem that collapse to a single root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleTree {
    /// Canonical descriptor in the root directory
    pub root_file: PathBuf,
    /// Root directory of the tree
    pub root_dir: PathBuf,
    /// Every descriptor in the tree, sorted
    pub member_files: Vec<PathBuf>,
    /// True when a descriptor exists in a strict descendant of `root_dir`
    pub multi_module: bool,
}

/// ModuleResolver - collapses nested descriptors of one ecosystem
///
/// A descriptor whose directory lies beneath another descriptor's directory
/// is a module of that project and never becomes an instance of its own.
/// Descriptors in sibling directories stay independent.
pub struct ModuleResolver;

impl ModuleResolver {
    /// Collapses the raw matches of a single ecosystem into module trees
    ///
    /// # Arguments
    /// * `matches` - Raw matches, all of the same ecosystem, in any order
    /// * `priority` - Rank of a descriptor file name (lower wins) used to
    ///   pick the canonical file when a root directory holds several
    ///
    /// # Returns
    /// Module trees sorted by root directory. No root directory is an
    /// ancestor of another.
    pub fn collapse<F>(matches: &[BuildFileMatch], priority: F) -> Vec<ModuleTree>
    where
        F: Fn(&Path) -> usize,
    {
        let mut by_directory: BTreeMap<PathBuf, Vec<PathBuf>> = BTreeMap::new();
        for m in matches {
            by_directory
                .entry(m.directory().to_path_buf())
                .or_default()
                .push(m.path().to_path_buf());
        }

        let mut directories: Vec<&PathBuf> = by_directory.keys().collect();
        directories.sort_by(|a, b| depth(a).cmp(&depth(b)).then_with(|| a.cmp(b)));

        let mut roots: Vec<PathBuf> = Vec::new();
        for dir in directories {
            if !roots.iter().any(|root| dir.starts_with(root)) {
                roots.push(dir.clone());
            }
        }

        let mut trees: Vec<ModuleTree> = roots
            .into_iter()
            .filter_map(|root_dir| {
                let mut root_files = by_directory.get(&root_dir)?.clone();
                root_files.sort_by(|a, b| {
                    priority(a)
                        .cmp(&priority(b))
                        .then_with(|| a.file_name().cmp(&b.file_name()))
                });
                let root_file = root_files.first()?.clone();

                let mut member_files = Vec::new();
                let mut multi_module = false;
                for (dir, files) in &by_directory {
                    if dir.starts_with(&root_dir) {
                        member_files.extend(files.iter().cloned());
                        multi_module |= dir != &root_dir;
                    }
                }
                member_files.sort();
                member_files.dedup();

                Some(ModuleTree {
                    root_file,
                    root_dir,
                    member_files,
                    multi_module,
                })
            })
            .collect();

        trees.sort_by(|a, b| a.root_dir.cmp(&b.root_dir));
        trees
    }
}

fn depth(path: &Path) -> usize {
    path.components().count()
}
