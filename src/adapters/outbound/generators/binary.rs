use super::support::{output_file, project_root, syft_scan_command, syft_tool};
use crate::ports::outbound::{directory_name, EcosystemGenerator};
use crate::sbom_generation::domain::{AdditionalArgs, GenerationStrategy, ToolRequirement};
use std::path::Path;

/// Name under which the binary generator is registered
pub const STANDALONE_BINARIES: &str = "Standalone Binaries";

/// Loose binary artifacts, scanned per branch directory with Syft
///
/// Never part of descriptor discovery: binaries are grouped into branches
/// first and `build_file` is then the branch directory itself.
pub struct BinaryGenerator;

impl EcosystemGenerator for BinaryGenerator {
    fn name(&self) -> &'static str {
        STANDALONE_BINARIES
    }

    fn file_patterns(&self) -> &'static [&'static str] {
        &[
            "*.jar", "*.war", "*.ear", "*.zip", "*.tar", "*.tar.gz", "*.tgz", "*.tar.bz2",
            "*.tbz2", "*.tar.xz", "*.txz", "*.rpm", "*.deb", "*.apk", "*.nupkg", "*.msi", "*.exe",
            "*.dll", "*.so", "*.dylib", "*.a", "*.lib",
        ]
    }

    /// Dependency caches only; build output folds into its branch
    fn excluded_directories(&self) -> &'static [&'static str] {
        &["node_modules", ".m2", ".gradle"]
    }

    fn strategy(&self) -> GenerationStrategy {
        GenerationStrategy::FilesystemScan
    }

    fn is_discoverable(&self) -> bool {
        false
    }

    fn version_check_command(&self) -> &'static str {
        "syft version"
    }

    fn required_tools(&self, _build_file: &Path) -> Vec<ToolRequirement> {
        vec![syft_tool()]
    }

    fn generate_command(
        &self,
        project_name: &str,
        output_dir: &Path,
        build_file: &Path,
        args: &AdditionalArgs,
    ) -> String {
        syft_scan_command(
            project_root(build_file),
            &output_file(output_dir, project_name),
            args,
        )
    }

    fn declared_project_name(&self, build_file: &Path) -> Option<String> {
        directory_name(build_file)
    }
}
