use super::support::{output_file, project_root, quote};
use crate::ports::outbound::{directory_name, EcosystemGenerator};
use crate::sbom_generation::domain::{AdditionalArgs, ToolRequirement};
use std::path::Path;

/// Bundler projects, via cyclonedx-ruby
pub struct RubyGenerator;

impl EcosystemGenerator for RubyGenerator {
    fn name(&self) -> &'static str {
        "Ruby"
    }

    fn file_patterns(&self) -> &'static [&'static str] {
        &["Gemfile"]
    }

    fn excluded_directories(&self) -> &'static [&'static str] {
        &["vendor", ".bundle"]
    }

    fn version_check_command(&self) -> &'static str {
        "ruby --version"
    }

    fn required_tools(&self, _build_file: &Path) -> Vec<ToolRequirement> {
        vec![ToolRequirement::new("cyclonedx-ruby", "gem list -i cyclonedx-ruby")
            .with_install_command("gem install cyclonedx-ruby")]
    }

    fn generate_command(
        &self,
        project_name: &str,
        output_dir: &Path,
        build_file: &Path,
        args: &AdditionalArgs,
    ) -> String {
        args.append_to(&format!(
            "cyclonedx-ruby -p {} -o {} -f json",
            quote(project_root(build_file)),
            quote(&output_file(output_dir, project_name))
        ))
    }

    fn declared_project_name(&self, build_file: &Path) -> Option<String> {
        directory_name(build_file)
    }
}
