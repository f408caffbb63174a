use super::BuildSystemInstance;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// How an ecosystem produces its SBOM
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationStrategy {
    /// Ecosystem-specific tool driven through the package manager
    PackageManager,
    /// Generic filesystem scanner (Syft); identical directories are scanned once per run
    FilesystemScan,
}

impl GenerationStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationStrategy::PackageManager => "package-manager",
            GenerationStrategy::FilesystemScan => "filesystem-scan",
        }
    }
}

/// OutputArtifact - the SBOM file an instance is expected to produce
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputArtifact {
    path: PathBuf,
    exists: bool,
    size: u64,
}

impl OutputArtifact {
    pub fn new(path: PathBuf, exists: bool, size: u64) -> Self {
        Self { path, exists, size }
    }

    /// An artifact that has not been produced
    pub fn absent(path: PathBuf) -> Self {
        Self::new(path, false, 0)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.exists
    }

    pub fn size(&self) -> u64 {
        self.size
    }
}

/// GenerationOutcome - what happened when an instance was attempted
///
/// Success means the generation command exited with code zero. Outcomes of
/// instances that never reached the subprocess (missing tools, spawn
/// failures) carry no exit code and are always failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOutcome {
    success: bool,
    exit_code: Option<i32>,
    stdout: String,
    stderr: String,
    error_message: Option<String>,
    artifact: OutputArtifact,
    timestamp: DateTime<Utc>,
}

impl GenerationOutcome {
    /// Outcome of a generation command that ran to completion
    pub fn completed(
        exit_code: i32,
        stdout: String,
        stderr: String,
        error_message: Option<String>,
        artifact: OutputArtifact,
    ) -> Self {
        Self {
            success: exit_code == 0,
            exit_code: Some(exit_code),
            stdout,
            stderr,
            error_message,
            artifact,
            timestamp: Utc::now(),
        }
    }

    /// Outcome of an instance whose command could not be run
    pub fn not_run(error_message: impl Into<String>, artifact: OutputArtifact) -> Self {
        Self {
            success: false,
            exit_code: None,
            stdout: String::new(),
            stderr: String::new(),
            error_message: Some(error_message.into()),
            artifact,
            timestamp: Utc::now(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn artifact(&self) -> &OutputArtifact {
        &self.artifact
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// GenerationResult - terminal record of one attempted instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    instance: BuildSystemInstance,
    command: String,
    outcome: GenerationOutcome,
    reused_cached_output: bool,
}

impl GenerationResult {
    pub fn new(instance: BuildSystemInstance, command: String, outcome: GenerationOutcome) -> Self {
        Self {
            instance,
            command,
            outcome,
            reused_cached_output: false,
        }
    }

    /// A result whose outcome was produced by an earlier scan of the same directory
    pub fn from_cache(
        instance: BuildSystemInstance,
        command: String,
        outcome: GenerationOutcome,
    ) -> Self {
        Self {
            instance,
            command,
            outcome,
            reused_cached_output: true,
        }
    }

    pub fn instance(&self) -> &BuildSystemInstance {
        &self.instance
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn outcome(&self) -> &GenerationOutcome {
        &self.outcome
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }

    pub fn reused_cached_output(&self) -> bool {
        self.reused_cached_output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact() -> OutputArtifact {
        OutputArtifact::new(PathBuf::from("/out/demo-bom.json"), true, 42)
    }

    #[test]
    fn test_completed_success_is_exit_code_zero() {
        let ok = GenerationOutcome::completed(0, "out".into(), String::new(), None, artifact());
        assert!(ok.is_success());
        assert_eq!(ok.exit_code(), Some(0));

        let failed = GenerationOutcome::completed(
            1,
            String::new(),
            "boom".into(),
            Some("SBOM generation failed with exit code: 1".into()),
            artifact(),
        );
        assert!(!failed.is_success());
        // A stale artifact from an earlier run does not turn a failure into success
        assert!(failed.artifact().exists());
    }

    #[test]
    fn test_not_run_has_no_exit_code() {
        let outcome = GenerationOutcome::not_run(
            "Required tool(s) missing for Maven: mvn",
            OutputArtifact::absent(PathBuf::from("/out/demo-bom.json")),
        );
        assert!(!outcome.is_success());
        assert_eq!(outcome.exit_code(), None);
        assert_eq!(
            outcome.error_message(),
            Some("Required tool(s) missing for Maven: mvn")
        );
    }

    #[test]
    fn test_cached_result_keeps_outcome() {
        let instance = BuildSystemInstance::new(
            "Conda",
            PathBuf::from("/proj/environment.yml"),
            "proj",
            PathBuf::from("/proj"),
        );
        let outcome = GenerationOutcome::completed(0, String::new(), String::new(), None, artifact());
        let result = GenerationResult::from_cache(instance, "syft".into(), outcome.clone());
        assert!(result.reused_cached_output());
        assert_eq!(result.outcome(), &outcome);
    }

    #[test]
    fn test_strategy_labels() {
        assert_eq!(GenerationStrategy::PackageManager.as_str(), "package-manager");
        assert_eq!(GenerationStrategy::FilesystemScan.as_str(), "filesystem-scan");
    }
}
