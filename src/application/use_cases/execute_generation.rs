use crate::ports::outbound::{
    default_error_message, ArtifactReader, CommandRunner, EcosystemGenerator, OutputMode,
    ProgressReporter,
};
use crate::sbom_generation::domain::{
    BuildSystemInstance, GenerationOutcome, GenerationResult, OutputArtifact,
};
use crate::sbom_generation::policies::ArtifactNaming;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

/// ScanCache - run-scoped map from scanned directory to its successful outcome
///
/// Only filesystem-scan instances use it. Entries are written after a
/// successful scan and dropped when their output file has disappeared.
#[derive(Debug, Default)]
pub struct ScanCache {
    entries: HashMap<PathBuf, GenerationOutcome>,
}

impl ScanCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lexically normalized form of a directory: `.` removed, `..` folded
    pub fn key(directory: &Path) -> PathBuf {
        let mut normalized = PathBuf::new();
        for component in directory.components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    if !normalized.pop() {
                        normalized.push(component);
                    }
                }
                other => normalized.push(other),
            }
        }
        normalized
    }

    /// Cached outcome for a directory whose output file still exists
    pub fn lookup<A: ArtifactReader>(&mut self, directory: &Path, reader: &A) -> Option<GenerationOutcome> {
        let key = Self::key(directory);
        let outcome = self.entries.get(&key)?;
        if reader.inspect(outcome.artifact().path()).exists() {
            return Some(outcome.clone());
        }
        tracing::debug!(directory = %key.display(), "Dropping cache entry with missing output");
        self.entries.remove(&key);
        None
    }

    /// Remembers a successful outcome; failures are never cached
    pub fn record(&mut self, directory: &Path, outcome: &GenerationOutcome) {
        if outcome.is_success() {
            self.entries.insert(Self::key(directory), outcome.clone());
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// ExecutionEngine - runs one instance's generation command
///
/// Output is echoed while it is captured. Success means exit code zero; the
/// expected SBOM is inspected afterwards whatever the exit code was.
pub struct ExecutionEngine<'a, R, A, P> {
    runner: &'a R,
    reader: &'a A,
    reporter: &'a P,
}

impl<'a, R, A, P> ExecutionEngine<'a, R, A, P>
where
    R: CommandRunner,
    A: ArtifactReader,
    P: ProgressReporter,
{
    pub fn new(runner: &'a R, reader: &'a A, reporter: &'a P) -> Self {
        Self {
            runner,
            reader,
            reporter,
        }
    }

    /// Runs the generator's preparation command, if any; failures only warn
    pub async fn prepare(&self, generator: &dyn EcosystemGenerator, instance: &BuildSystemInstance) {
        let Some(command) = generator.prepare_command(instance.working_directory()) else {
            return;
        };

        self.reporter.report(&format!("🔧 Preparing {} project: {}", generator.name(), command));
        let prepared = self
            .runner
            .run(&command, instance.working_directory(), OutputMode::Quiet)
            .await
            .is_ok_and(|output| output.success());
        if !prepared {
            self.reporter.report_error(&format!(
                "⚠️  Failed to prepare {} project, continuing anyway...",
                generator.name()
            ));
        }
    }

    /// Runs the generation command and records its outcome
    pub async fn execute(
        &self,
        generator: &dyn EcosystemGenerator,
        instance: &BuildSystemInstance,
        command: &str,
        output_dir: &Path,
    ) -> GenerationResult {
        let expected = ArtifactNaming::sbom_path(output_dir, instance.project_name());
        tracing::info!(
            ecosystem = instance.ecosystem(),
            working_dir = %instance.working_directory().display(),
            "Running generation command"
        );
        // Plain line first so the step bar is gone before the command echoes
        self.reporter.report(&format!(
            "▶ {} ({}): {}",
            instance.ecosystem(),
            instance.project_name(),
            command
        ));

        let outcome = match self
            .runner
            .run(command, instance.working_directory(), OutputMode::Echo)
            .await
        {
            Ok(output) => {
                let artifact = self.reader.inspect(&expected);
                let error_message = (!output.success()).then(|| {
                    generator
                        .classify_error(&output.stderr, output.exit_code)
                        .unwrap_or_else(|| default_error_message(output.exit_code))
                });
                tracing::debug!(
                    exit_code = output.exit_code,
                    sbom_exists = artifact.exists(),
                    "Generation command finished"
                );
                GenerationOutcome::completed(
                    output.exit_code,
                    output.stdout,
                    output.stderr,
                    error_message,
                    artifact,
                )
            }
            Err(e) => {
                tracing::warn!(error = %e, "Generation command could not be started");
                GenerationOutcome::not_run(format!("{:#}", e), OutputArtifact::absent(expected))
            }
        };

        GenerationResult::new(instance.clone(), command.to_string(), outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::filesystem::FileSystemReader;
    use crate::adapters::outbound::generators::{BinaryGenerator, GoGenerator, MavenGenerator};
    use crate::application::use_cases::test_doubles::{RecordingReporter, Scripted, ScriptedRunner};
    use std::fs;
    use tempfile::TempDir;

    fn instance(ecosystem: &str, dir: &Path, name: &str) -> BuildSystemInstance {
        BuildSystemInstance::new(ecosystem, dir.join("pom.xml"), name, dir.to_path_buf())
    }

    #[test]
    fn test_cache_key_normalizes() {
        assert_eq!(
            ScanCache::key(Path::new("/a/./b/../c")),
            PathBuf::from("/a/c")
        );
        assert_eq!(ScanCache::key(Path::new("/a/b/")), ScanCache::key(Path::new("/a/b")));
    }

    #[test]
    fn test_cache_records_only_success_and_drops_missing_output() {
        let temp_dir = TempDir::new().unwrap();
        let sbom = temp_dir.path().join("x-bom.json");
        fs::write(&sbom, "{}").unwrap();
        let reader = FileSystemReader::new();
        let mut cache = ScanCache::new();

        let failed = GenerationOutcome::completed(1, String::new(), String::new(), None, OutputArtifact::absent(sbom.clone()));
        cache.record(temp_dir.path(), &failed);
        assert!(cache.is_empty());

        let ok = GenerationOutcome::completed(0, String::new(), String::new(), None, OutputArtifact::new(sbom.clone(), true, 2));
        cache.record(temp_dir.path(), &ok);
        assert_eq!(cache.lookup(&temp_dir.path().join("."), &reader), Some(ok));

        fs::remove_file(&sbom).unwrap();
        assert!(cache.lookup(temp_dir.path(), &reader).is_none());
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_execute_success_records_artifact() {
        let temp_dir = TempDir::new().unwrap();
        let output_dir = temp_dir.path().join("out");
        let runner = ScriptedRunner::new().on("generate", Scripted::exit(0).writing(output_dir.join("api-bom.json")));
        let reader = FileSystemReader::new();
        let reporter = RecordingReporter::new();
        let engine = ExecutionEngine::new(&runner, &reader, &reporter);

        let result = engine
            .execute(&MavenGenerator, &instance("Maven", temp_dir.path(), "api"), "generate", &output_dir)
            .await;

        assert!(result.is_success());
        assert!(result.outcome().artifact().exists());
        assert!(result.outcome().artifact().size() > 0);
        assert!(result.outcome().error_message().is_none());
        assert_eq!(runner.calls()[0].2, OutputMode::Echo);
        assert!(reporter.mentions("▶ Maven (api): generate"));
    }

    #[tokio::test]
    async fn test_stale_artifact_with_nonzero_exit_is_failure() {
        let temp_dir = TempDir::new().unwrap();
        let output_dir = temp_dir.path().join("out");
        let runner = ScriptedRunner::new().on(
            "generate",
            Scripted::exit(1)
                .with_stderr("[ERROR] Could not resolve dependencies for project")
                .writing(output_dir.join("api-bom.json")),
        );
        let reader = FileSystemReader::new();
        let reporter = RecordingReporter::new();
        let engine = ExecutionEngine::new(&runner, &reader, &reporter);

        let result = engine
            .execute(&MavenGenerator, &instance("Maven", temp_dir.path(), "api"), "generate", &output_dir)
            .await;

        assert!(!result.is_success());
        assert!(result.outcome().artifact().exists());
        assert_eq!(result.outcome().exit_code(), Some(1));
        assert!(result.outcome().error_message().unwrap().contains("resolve dependencies"));
    }

    #[tokio::test]
    async fn test_unclassified_failure_uses_default_message() {
        let temp_dir = TempDir::new().unwrap();
        let runner = ScriptedRunner::new().on("scan", Scripted::exit(4));
        let reader = FileSystemReader::new();
        let reporter = RecordingReporter::new();
        let engine = ExecutionEngine::new(&runner, &reader, &reporter);

        let result = engine
            .execute(&BinaryGenerator, &instance("Standalone Binaries", temp_dir.path(), "bin"), "scan", temp_dir.path())
            .await;

        assert_eq!(
            result.outcome().error_message(),
            Some("SBOM generation failed with exit code: 4")
        );
    }

    #[tokio::test]
    async fn test_spawn_failure_is_captured() {
        let temp_dir = TempDir::new().unwrap();
        let runner = ScriptedRunner::new().on("scan", Scripted::spawn_failure());
        let reader = FileSystemReader::new();
        let reporter = RecordingReporter::new();
        let engine = ExecutionEngine::new(&runner, &reader, &reporter);

        let result = engine
            .execute(&BinaryGenerator, &instance("Standalone Binaries", temp_dir.path(), "bin"), "scan", temp_dir.path())
            .await;

        assert!(!result.is_success());
        assert_eq!(result.outcome().exit_code(), None);
        assert!(result.outcome().error_message().unwrap().contains("Failed to start"));
    }

    #[tokio::test]
    async fn test_prepare_failure_only_warns() {
        let temp_dir = TempDir::new().unwrap();
        let runner = ScriptedRunner::new().on("go mod download", Scripted::exit(1));
        let reader = FileSystemReader::new();
        let reporter = RecordingReporter::new();
        let engine = ExecutionEngine::new(&runner, &reader, &reporter);
        let go = BuildSystemInstance::new("Go", temp_dir.path().join("go.mod"), "svc", temp_dir.path().to_path_buf());

        engine.prepare(&GoGenerator, &go).await;

        assert_eq!(runner.calls()[0].2, OutputMode::Quiet);
        assert!(reporter.mentions("Failed to prepare Go project, continuing anyway..."));
    }
}
