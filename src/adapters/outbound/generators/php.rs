use super::support::{non_empty, output_file, quote, read_manifest};
use crate::ports::outbound::{directory_name, EcosystemGenerator};
use crate::sbom_generation::domain::{AdditionalArgs, ToolRequirement};
use std::path::Path;

/// Composer projects, via the CycloneDX Composer plugin
pub struct PhpGenerator;

impl EcosystemGenerator for PhpGenerator {
    fn name(&self) -> &'static str {
        "PHP"
    }

    fn file_patterns(&self) -> &'static [&'static str] {
        &["composer.json"]
    }

    fn excluded_directories(&self) -> &'static [&'static str] {
        &["vendor"]
    }

    fn version_check_command(&self) -> &'static str {
        "composer --version"
    }

    fn required_tools(&self, _build_file: &Path) -> Vec<ToolRequirement> {
        vec![ToolRequirement::new("composer", "composer --version")]
    }

    fn generate_command(
        &self,
        project_name: &str,
        output_dir: &Path,
        build_file: &Path,
        args: &AdditionalArgs,
    ) -> String {
        let command = args.append_to(&format!(
            "composer CycloneDX:make-sbom --output-format=JSON --output-file={}",
            quote(&output_file(output_dir, project_name))
        ));
        format!("{} {}", command, quote(build_file))
    }

    /// `vendor/package` names keep only the package part
    fn declared_project_name(&self, build_file: &Path) -> Option<String> {
        read_manifest(build_file)
            .and_then(|content| serde_json::from_str::<serde_json::Value>(&content).ok())
            .and_then(|value| value.get("name")?.as_str().and_then(non_empty))
            .or_else(|| directory_name(build_file))
    }
}
