use crate::ports::outbound::{
    ArtifactReader, CommandRunner, EcosystemGenerator, OutputMode, ProgressReporter,
};
use crate::sbom_generation::domain::{BuildSystemInstance, ToolRequirement};
use crate::sbom_generation::policies::{InstallCandidate, InstallCommandPolicy};
use std::collections::HashMap;
use std::path::Path;

/// Local .NET tool manifest, relative to the working directory
const DOTNET_TOOL_MANIFEST: &str = ".config/dotnet-tools.json";

/// ToolResolver - precondition gate run before an instance is generated
///
/// Checks every tool the instance's generator declares. Missing tools are
/// installed only when the caller allows it, and each is re-checked once
/// after its install command ran. Never generates anything itself.
pub struct ToolResolver<'a, R, A, P> {
    runner: &'a R,
    reader: &'a A,
    reporter: &'a P,
    allow_install: bool,
}

impl<'a, R, A, P> ToolResolver<'a, R, A, P>
where
    R: CommandRunner,
    A: ArtifactReader,
    P: ProgressReporter,
{
    pub fn new(runner: &'a R, reader: &'a A, reporter: &'a P, allow_install: bool) -> Self {
        Self {
            runner,
            reader,
            reporter,
            allow_install,
        }
    }

    /// Returns `None` when every tool is available, otherwise one message
    /// naming every tool that is still missing
    pub async fn missing_tools(
        &self,
        generator: &dyn EcosystemGenerator,
        instance: &BuildSystemInstance,
    ) -> Option<String> {
        let working_dir = instance.working_directory();
        let mut missing = Vec::new();

        for tool in generator.required_tools(instance.build_file()) {
            if self.runner.check(tool.check_command(), working_dir).await {
                tracing::debug!(tool = tool.name(), "Tool available");
                continue;
            }
            if self.allow_install && self.install(&tool, working_dir).await {
                continue;
            }
            tracing::info!(tool = tool.name(), ecosystem = instance.ecosystem(), "Tool missing");
            missing.push(tool.name().to_string());
        }

        if missing.is_empty() {
            return None;
        }

        let mut message = format!(
            "Required tool(s) missing for {}: {}",
            instance.ecosystem(),
            missing.join(", ")
        );
        if !self.allow_install {
            message.push_str("\nRun with --allow-tool-install to install missing tools.");
        }
        Some(message)
    }

    /// Installs a tool and re-checks it; true when it is available afterwards
    async fn install(&self, tool: &ToolRequirement, working_dir: &Path) -> bool {
        let has_manifest = self
            .reader
            .inspect(&working_dir.join(DOTNET_TOOL_MANIFEST))
            .exists();
        let candidates = InstallCommandPolicy::candidates(tool, has_manifest);

        let Some(candidate) = self.select_candidate(&candidates, working_dir).await else {
            self.reporter.report_error(&format!(
                "⚠️  No install command available for {}",
                tool.name()
            ));
            return false;
        };

        self.reporter.report(&format!(
            "📦 Installing {}: {}",
            tool.name(),
            candidate.command
        ));
        match self
            .runner
            .run(&candidate.command, working_dir, OutputMode::Echo)
            .await
        {
            Ok(output) if output.success() => {}
            Ok(output) => {
                self.reporter.report_error(&format!(
                    "⚠️  Install command for {} exited with code {}",
                    tool.name(),
                    output.exit_code
                ));
                return false;
            }
            Err(e) => {
                self.reporter.report_error(&format!(
                    "⚠️  Install command for {} could not be started: {}",
                    tool.name(),
                    e
                ));
                return false;
            }
        }

        self.runner.check(tool.check_command(), working_dir).await
    }

    /// First candidate whose prerequisite tool is available
    async fn select_candidate<'c>(
        &self,
        candidates: &'c [InstallCandidate],
        working_dir: &Path,
    ) -> Option<&'c InstallCandidate> {
        let mut available: HashMap<&'static str, bool> = HashMap::new();
        for prerequisite in InstallCommandPolicy::prerequisites(candidates) {
            if available.contains_key(prerequisite) {
                continue;
            }
            let found = self
                .runner
                .check(&format!("{} --version", prerequisite), working_dir)
                .await;
            available.insert(prerequisite, found);
        }

        candidates.iter().find(|candidate| match candidate.requires {
            Some(tool) => available.get(tool).copied().unwrap_or(false),
            None => true,
        })
    }
}
