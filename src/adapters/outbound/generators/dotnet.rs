use super::support::quote;
use crate::ports::outbound::EcosystemGenerator;
use crate::sbom_generation::domain::{AdditionalArgs, ToolRequirement};
use std::path::Path;

/// .NET solutions and projects, via the CycloneDX dotnet tool
///
/// A solution file wins over project files in the same directory.
pub struct DotnetGenerator;

impl EcosystemGenerator for DotnetGenerator {
    fn name(&self) -> &'static str {
        ".NET"
    }

    fn file_patterns(&self) -> &'static [&'static str] {
        &["*.sln", "*.csproj", "*.vbproj", "*.fsproj"]
    }

    fn excluded_directories(&self) -> &'static [&'static str] {
        &["bin", "obj", "packages"]
    }

    fn version_check_command(&self) -> &'static str {
        "dotnet --version"
    }

    fn required_tools(&self, _build_file: &Path) -> Vec<ToolRequirement> {
        vec![
            ToolRequirement::new("dotnet", "dotnet --version"),
            ToolRequirement::new("CycloneDX", "dotnet CycloneDX --version")
                .with_install_command("dotnet tool install --global CycloneDX"),
        ]
    }

    fn generate_command(
        &self,
        project_name: &str,
        output_dir: &Path,
        build_file: &Path,
        args: &AdditionalArgs,
    ) -> String {
        args.append_to(&format!(
            "dotnet CycloneDX {} --output {} --filename {}-bom.json --output-format Json",
            quote(build_file),
            quote(output_dir),
            project_name
        ))
    }

    fn declared_project_name(&self, build_file: &Path) -> Option<String> {
        build_file
            .file_stem()
            .and_then(|s| s.to_str())
            .map(String::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_file_stem() {
        assert_eq!(
            DotnetGenerator.project_name(Path::new("/src/Billing.Api/Billing.Api.csproj")),
            "Billing.Api"
        );
    }

    #[test]
    fn test_solution_has_priority() {
        assert!(
            DotnetGenerator.pattern_priority(Path::new("/src/App.sln"))
                < DotnetGenerator.pattern_priority(Path::new("/src/App.csproj"))
        );
    }

    #[test]
    fn test_command() {
        let command = DotnetGenerator.generate_command(
            "App",
            Path::new("/out"),
            Path::new("/src/App.sln"),
            &AdditionalArgs::parse("--exclude-dev").unwrap(),
        );
        assert!(command.starts_with("dotnet CycloneDX"));
        assert!(command.contains("--filename App-bom.json"));
        assert!(command.ends_with("--exclude-dev"));
    }
}
