use crate::sbom_generation::domain::{
    fallback_project_name, sanitize_project_name, AdditionalArgs, FilePattern, GenerationStrategy,
    ToolRequirement,
};
use std::path::Path;

/// EcosystemGenerator port - the capability contract of one build ecosystem
///
/// One implementation exists per ecosystem; they are registered in the
/// generator registry and looked up by exact name. The orchestration core
/// only relies on what a generator declares here, never on the shape of
/// the commands it builds.
pub trait EcosystemGenerator: Send + Sync {
    /// Unique ecosystem name (e.g., "Maven", "Standalone Binaries")
    fn name(&self) -> &'static str;

    /// File name patterns fingerprinting the ecosystem, primary first
    ///
    /// The position of a pattern is its priority when one directory holds
    /// several descriptors.
    fn file_patterns(&self) -> &'static [&'static str];

    /// Directory names this ecosystem never looks into, besides VCS metadata
    fn excluded_directories(&self) -> &'static [&'static str] {
        &[]
    }

    fn strategy(&self) -> GenerationStrategy {
        GenerationStrategy::PackageManager
    }

    /// Whether the ecosystem takes part in regular descriptor discovery
    fn is_discoverable(&self) -> bool {
        true
    }

    /// Command printing the version of the ecosystem's main tool
    fn version_check_command(&self) -> &'static str;

    /// External tools needed to generate an SBOM for `build_file`
    fn required_tools(&self, build_file: &Path) -> Vec<ToolRequirement>;

    /// Builds the shell command generating the SBOM
    ///
    /// # Arguments
    /// * `project_name` - Sanitized project name; the SBOM must be written
    ///   to `<output_dir>/<project_name>-bom.json`
    /// * `output_dir` - Absolute output directory
    /// * `build_file` - Canonical build file (a directory for binary branches)
    /// * `args` - Validated pass-through arguments
    fn generate_command(
        &self,
        project_name: &str,
        output_dir: &Path,
        build_file: &Path,
        args: &AdditionalArgs,
    ) -> String;

    /// Best-effort read of the name declared in the build file
    fn declared_project_name(&self, build_file: &Path) -> Option<String>;

    /// Project name for `build_file`; never fails
    fn project_name(&self, build_file: &Path) -> String {
        self.declared_project_name(build_file)
            .and_then(|raw| sanitize_project_name(&raw))
            .unwrap_or_else(|| fallback_project_name(self.name()))
    }

    /// Optional command run before generation (e.g., fetching modules)
    fn prepare_command(&self, _working_dir: &Path) -> Option<String> {
        None
    }

    /// Maps a failed run's stderr and exit code to a human-readable cause
    fn classify_error(&self, _stderr: &str, _exit_code: i32) -> Option<String> {
        None
    }

    /// Compiled file patterns; invalid patterns are skipped
    fn compiled_patterns(&self) -> Vec<FilePattern> {
        self.file_patterns()
            .iter()
            .filter_map(|p| FilePattern::new(p).ok())
            .collect()
    }

    /// Rank of a build file among this ecosystem's patterns (lower wins)
    fn pattern_priority(&self, build_file: &Path) -> usize {
        let name = build_file
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        self.compiled_patterns()
            .iter()
            .position(|p| p.matches(name))
            .unwrap_or(usize::MAX)
    }
}

/// Generic failure message used when a generator has no specific classification
pub fn default_error_message(exit_code: i32) -> String {
    format!("SBOM generation failed with exit code: {}", exit_code)
}

/// Directory name of a build file's parent, used as a fallback project name
pub fn directory_name(build_file: &Path) -> Option<String> {
    let dir = if build_file.is_dir() {
        build_file
    } else {
        build_file.parent()?
    };
    dir.file_name()
        .and_then(|n| n.to_str())
        .map(String::from)
}
