use super::support::{move_command, output_file, project_root, quote, toml_string};
use crate::ports::outbound::EcosystemGenerator;
use crate::sbom_generation::domain::{AdditionalArgs, ToolRequirement};
use std::path::Path;

/// Cargo packages and workspaces, via cargo-cyclonedx
///
/// cargo-cyclonedx writes next to the manifest, so the file is moved into
/// the output directory afterwards.
pub struct RustGenerator;

impl EcosystemGenerator for RustGenerator {
    fn name(&self) -> &'static str {
        "Rust"
    }

    fn file_patterns(&self) -> &'static [&'static str] {
        &["Cargo.toml"]
    }

    fn excluded_directories(&self) -> &'static [&'static str] {
        &["target"]
    }

    fn version_check_command(&self) -> &'static str {
        "cargo --version"
    }

    fn required_tools(&self, _build_file: &Path) -> Vec<ToolRequirement> {
        vec![
            ToolRequirement::new("cargo", "cargo --version"),
            ToolRequirement::new("cargo-cyclonedx", "cargo cyclonedx --version")
                .with_install_command("cargo install cargo-cyclonedx"),
        ]
    }

    fn generate_command(
        &self,
        project_name: &str,
        output_dir: &Path,
        build_file: &Path,
        args: &AdditionalArgs,
    ) -> String {
        let generate = args.append_to(&format!(
            "cargo cyclonedx -f json --manifest-path {} --override-filename {}-bom",
            quote(build_file),
            project_name
        ));
        let produced = project_root(build_file).join(format!("{}-bom.json", project_name));
        format!(
            "{} && {}",
            generate,
            move_command(&produced, &output_file(output_dir, project_name))
        )
    }

    fn declared_project_name(&self, build_file: &Path) -> Option<String> {
        toml_string(build_file, &["package", "name"])
    }
}
