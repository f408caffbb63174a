use super::support::{output_file, project_root, quote, read_manifest};
use crate::ports::outbound::{directory_name, EcosystemGenerator};
use crate::sbom_generation::domain::{AdditionalArgs, ToolRequirement};
use std::path::Path;

/// Go modules, via cyclonedx-gomod
pub struct GoGenerator;

/// Last segment of the `module` directive of a go.mod
fn module_name(go_mod: &Path) -> Option<String> {
    let content = read_manifest(go_mod)?;
    content
        .lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix("module "))
        .map(|path| path.trim().trim_matches('"'))
        .and_then(|path| path.rsplit('/').next())
        .filter(|name| !name.is_empty())
        .map(String::from)
}

impl EcosystemGenerator for GoGenerator {
    fn name(&self) -> &'static str {
        "Go"
    }

    fn file_patterns(&self) -> &'static [&'static str] {
        &["go.mod"]
    }

    fn excluded_directories(&self) -> &'static [&'static str] {
        &["vendor"]
    }

    fn version_check_command(&self) -> &'static str {
        "go version"
    }

    fn required_tools(&self, _build_file: &Path) -> Vec<ToolRequirement> {
        vec![
            ToolRequirement::new("go", "go version"),
            ToolRequirement::new("cyclonedx-gomod", "cyclonedx-gomod version")
                .with_install_command(
                    "go install github.com/CycloneDX/cyclonedx-gomod/cmd/cyclonedx-gomod@latest",
                ),
        ]
    }

    fn generate_command(
        &self,
        project_name: &str,
        output_dir: &Path,
        build_file: &Path,
        args: &AdditionalArgs,
    ) -> String {
        let command = args.append_to(&format!(
            "cyclonedx-gomod mod -json -output {}",
            quote(&output_file(output_dir, project_name))
        ));
        format!("{} {}", command, quote(project_root(build_file)))
    }

    fn declared_project_name(&self, build_file: &Path) -> Option<String> {
        module_name(build_file).or_else(|| directory_name(build_file))
    }

    fn prepare_command(&self, working_dir: &Path) -> Option<String> {
        if working_dir.join("vendor").is_dir() {
            Some("go mod download -mod=vendor".to_string())
        } else {
            Some("go mod download".to_string())
        }
    }

    fn classify_error(&self, stderr: &str, _exit_code: i32) -> Option<String> {
        if stderr.contains("missing go.sum entry") {
            return Some("Missing go.sum entries - run 'go mod tidy' first".to_string());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_module_name_last_segment() {
        let temp_dir = TempDir::new().unwrap();
        let go_mod = temp_dir.path().join("go.mod");
        fs::write(&go_mod, "// comment\nmodule github.com/acme/gateway\n\ngo 1.22\n").unwrap();

        assert_eq!(GoGenerator.project_name(&go_mod), "gateway");
    }

    #[test]
    fn test_prepare_command_respects_vendor() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(
            GoGenerator.prepare_command(temp_dir.path()),
            Some("go mod download".to_string())
        );

        fs::create_dir(temp_dir.path().join("vendor")).unwrap();
        assert_eq!(
            GoGenerator.prepare_command(temp_dir.path()),
            Some("go mod download -mod=vendor".to_string())
        );
    }

    #[test]
    fn test_command_and_classification() {
        let command = GoGenerator.generate_command(
            "gateway",
            Path::new("/out"),
            Path::new("/src/gateway/go.mod"),
            &AdditionalArgs::empty(),
        );
        assert!(command.starts_with("cyclonedx-gomod mod -json -output"));
        assert!(command.contains("gateway-bom.json"));

        assert!(GoGenerator
            .classify_error("go: missing go.sum entry for module", 1)
            .is_some());
        assert_eq!(GoGenerator.required_tools(Path::new("go.mod")).len(), 2);
    }
}
