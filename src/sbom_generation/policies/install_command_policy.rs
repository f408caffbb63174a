use crate::sbom_generation::domain::ToolRequirement;

/// One way of installing a missing tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallCandidate {
    /// Tool that must already be available for this command to work
    pub requires: Option<&'static str>,
    /// Shell command performing the install
    pub command: String,
}

impl InstallCandidate {
    fn new(requires: Option<&'static str>, command: impl Into<String>) -> Self {
        Self {
            requires,
            command: command.into(),
        }
    }
}

/// Install command resolution policy
///
/// Orders the ways a missing tool can be installed. Platform-native front
/// ends (uv, corepack, dotnet local manifests) come before language-wide
/// global installers; the tool's own declared command is the last resort.
/// The caller picks the first candidate whose `requires` tool is available.
pub struct InstallCommandPolicy;

impl InstallCommandPolicy {
    /// Returns install candidates for a missing tool, most preferred first
    ///
    /// # Arguments
    /// * `tool` - The missing tool
    /// * `has_dotnet_tool_manifest` - Whether `.config/dotnet-tools.json`
    ///   exists in the instance's working directory
    pub fn candidates(tool: &ToolRequirement, has_dotnet_tool_manifest: bool) -> Vec<InstallCandidate> {
        let mut candidates = match tool.name() {
            "cyclonedx-py" => vec![InstallCandidate::new(
                Some("uv"),
                "uv tool install cyclonedx-bom",
            )],
            "yarn" => vec![
                InstallCandidate::new(Some("corepack"), "corepack prepare yarn@stable --activate"),
                InstallCandidate::new(Some("npm"), "npm install -g yarn"),
            ],
            "pnpm" => vec![
                InstallCandidate::new(Some("corepack"), "corepack prepare pnpm@latest --activate"),
                InstallCandidate::new(Some("npm"), "npm install -g pnpm"),
            ],
            "CycloneDX" if has_dotnet_tool_manifest => {
                vec![InstallCandidate::new(Some("dotnet"), "dotnet tool restore")]
            }
            "CycloneDX" => vec![InstallCandidate::new(
                Some("dotnet"),
                "dotnet tool install --global CycloneDX",
            )],
            _ => Vec::new(),
        };

        if let Some(declared) = tool.install_command() {
            if !candidates.iter().any(|c| c.command == declared) {
                candidates.push(InstallCandidate::new(None, declared));
            }
        }

        candidates
    }

    /// Tools whose availability decides between candidates
    pub fn prerequisites(candidates: &[InstallCandidate]) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = candidates.iter().filter_map(|c| c.requires).collect();
        names.dedup();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cyclonedx_py_prefers_uv_then_declared() {
        let tool = ToolRequirement::new("cyclonedx-py", "cyclonedx-py --version")
            .with_install_command("pip install cyclonedx-bom");
        let candidates = InstallCommandPolicy::candidates(&tool, false);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].requires, Some("uv"));
        assert_eq!(candidates[0].command, "uv tool install cyclonedx-bom");
        assert_eq!(candidates[1].requires, None);
        assert_eq!(candidates[1].command, "pip install cyclonedx-bom");
    }

    #[test]
    fn test_yarn_prefers_corepack() {
        let tool = ToolRequirement::new("yarn", "yarn --version");
        let candidates = InstallCommandPolicy::candidates(&tool, false);
        assert_eq!(candidates[0].command, "corepack prepare yarn@stable --activate");
        assert_eq!(candidates[1].command, "npm install -g yarn");
        assert_eq!(
            InstallCommandPolicy::prerequisites(&candidates),
            vec!["corepack", "npm"]
        );
    }

    #[test]
    fn test_dotnet_tool_manifest_switches_to_restore() {
        let tool = ToolRequirement::new("CycloneDX", "dotnet CycloneDX --version");
        assert_eq!(
            InstallCommandPolicy::candidates(&tool, true)[0].command,
            "dotnet tool restore"
        );
        assert_eq!(
            InstallCommandPolicy::candidates(&tool, false)[0].command,
            "dotnet tool install --global CycloneDX"
        );
    }

    #[test]
    fn test_unknown_tool_uses_declared_command_only() {
        let tool = ToolRequirement::new("syft", "syft version")
            .with_install_command("brew install syft");
        let candidates = InstallCommandPolicy::candidates(&tool, false);
        assert_eq!(candidates, vec![InstallCandidate::new(None, "brew install syft")]);

        let bare = ToolRequirement::new("mvn", "mvn -v");
        assert!(InstallCommandPolicy::candidates(&bare, false).is_empty());
    }
}
