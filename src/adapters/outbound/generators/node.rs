use super::support::{
    output_file, package_json_has_workspaces, package_json_name, project_root, quote,
    syft_scan_command, syft_tool,
};
use crate::ports::outbound::{directory_name, EcosystemGenerator};
use crate::sbom_generation::domain::{AdditionalArgs, GenerationStrategy, ToolRequirement};
use std::path::Path;

/// npm, via the built-in `npm sbom` command
pub struct NpmGenerator;

impl EcosystemGenerator for NpmGenerator {
    fn name(&self) -> &'static str {
        "npm"
    }

    fn file_patterns(&self) -> &'static [&'static str] {
        &["package.json"]
    }

    fn excluded_directories(&self) -> &'static [&'static str] {
        &["node_modules", "bower_components"]
    }

    fn version_check_command(&self) -> &'static str {
        "npm --version"
    }

    fn required_tools(&self, _build_file: &Path) -> Vec<ToolRequirement> {
        vec![ToolRequirement::new("npm", "npm --version")]
    }

    fn generate_command(
        &self,
        project_name: &str,
        output_dir: &Path,
        build_file: &Path,
        args: &AdditionalArgs,
    ) -> String {
        let root = project_root(build_file);
        let mut command = String::from("npm sbom --sbom-format=cyclonedx");
        // Without node_modules npm can still work from the lock file alone
        if root.join("package-lock.json").is_file() && !root.join("node_modules").is_dir() {
            command.push_str(" --package-lock-only");
        }
        if package_json_has_workspaces(build_file) {
            command.push_str(" --workspaces");
        }
        command.push_str(&format!(" --prefix {}", quote(root)));
        format!(
            "{} > {}",
            args.append_to(&command),
            quote(&output_file(output_dir, project_name))
        )
    }

    fn declared_project_name(&self, build_file: &Path) -> Option<String> {
        package_json_name(build_file)
    }

    fn classify_error(&self, stderr: &str, _exit_code: i32) -> Option<String> {
        if stderr.contains("Did you forget to run `npm install`") {
            Some("Missing node_modules - run 'npm install' first".to_string())
        } else if stderr.contains("No evidence: no package lock file") {
            Some("Missing package-lock.json - run 'npm install' to generate it".to_string())
        } else {
            None
        }
    }
}

/// Yarn, via the CycloneDX Yarn plugin
pub struct YarnGenerator;

impl EcosystemGenerator for YarnGenerator {
    fn name(&self) -> &'static str {
        "Yarn"
    }

    fn file_patterns(&self) -> &'static [&'static str] {
        &["yarn.lock"]
    }

    fn excluded_directories(&self) -> &'static [&'static str] {
        &["node_modules", ".yarn"]
    }

    fn version_check_command(&self) -> &'static str {
        "yarn --version"
    }

    fn required_tools(&self, _build_file: &Path) -> Vec<ToolRequirement> {
        vec![ToolRequirement::new("yarn", "yarn --version")
            .with_install_command("npm install -g yarn")]
    }

    fn generate_command(
        &self,
        project_name: &str,
        output_dir: &Path,
        build_file: &Path,
        args: &AdditionalArgs,
    ) -> String {
        let root = project_root(build_file);
        args.append_to(&format!(
            "cd {} && yarn dlx -q @cyclonedx/yarn-plugin-cyclonedx --of JSON --output-file {}",
            quote(root),
            quote(&output_file(output_dir, project_name))
        ))
    }

    fn declared_project_name(&self, build_file: &Path) -> Option<String> {
        package_json_name(&project_root(build_file).join("package.json"))
            .or_else(|| directory_name(build_file))
    }
}

/// pnpm; its lock file is read by a Syft directory scan
pub struct PnpmGenerator;

impl EcosystemGenerator for PnpmGenerator {
    fn name(&self) -> &'static str {
        "pnpm"
    }

    fn file_patterns(&self) -> &'static [&'static str] {
        &["pnpm-lock.yaml"]
    }

    fn excluded_directories(&self) -> &'static [&'static str] {
        &["node_modules", ".pnpm-store"]
    }

    fn strategy(&self) -> GenerationStrategy {
        GenerationStrategy::FilesystemScan
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
        package_json_name(&project_root(build_file).join("package.json"))
            .or_else(|| directory_name(build_file))
    }
}
