use std::path::{Path, PathBuf};

/// BuildFileMatch - a file recognized as a build descriptor of one ecosystem
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BuildFileMatch {
    path: PathBuf,
    ecosystem: String,
}

impl BuildFileMatch {
    pub fn new(path: PathBuf, ecosystem: impl Into<String>) -> Self {
        Self {
            path,
            ecosystem: ecosystem.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn ecosystem(&self) -> &str {
        &self.ecosystem
    }

    /// Directory containing the build file
    pub fn directory(&self) -> &Path {
        self.path.parent().unwrap_or(&self.path)
    }
}

/// BuildSystemInstance - one deduplicated unit of SBOM generation
///
/// Created from one or more matches of the same ecosystem that collapse to
/// a single root directory. `build_file` is the canonical descriptor of the
/// root; `build_files` lists every descriptor that collapsed into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSystemInstance {
    ecosystem: String,
    build_file: PathBuf,
    build_files: Vec<PathBuf>,
    multi_module: bool,
    project_name: String,
    working_directory: PathBuf,
}

impl BuildSystemInstance {
    pub fn new(
        ecosystem: impl Into<String>,
        build_file: PathBuf,
        project_name: impl Into<String>,
        working_directory: PathBuf,
    ) -> Self {
        Self {
            ecosystem: ecosystem.into(),
            build_files: vec![build_file.clone()],
            build_file,
            multi_module: false,
            project_name: project_name.into(),
            working_directory,
        }
    }

    /// Records every descriptor that collapsed into this instance
    pub fn with_build_files(mut self, build_files: Vec<PathBuf>, multi_module: bool) -> Self {
        if !build_files.is_empty() {
            self.build_files = build_files;
        }
        self.multi_module = multi_module;
        self
    }

    /// Replaces the directory the generation command runs in
    pub fn with_working_directory(mut self, working_directory: PathBuf) -> Self {
        self.working_directory = working_directory;
        self
    }

    pub fn ecosystem(&self) -> &str {
        &self.ecosystem
    }

    pub fn build_file(&self) -> &Path {
        &self.build_file
    }

    pub fn build_files(&self) -> &[PathBuf] {
        &self.build_files
    }

    pub fn is_multi_module(&self) -> bool {
        self.multi_module
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn working_directory(&self) -> &Path {
        &self.working_directory
    }
}
