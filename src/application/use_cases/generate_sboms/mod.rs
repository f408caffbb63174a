use super::discover_build_systems::DiscoveryEngine;
use super::execute_generation::{ExecutionEngine, ScanCache};
use super::merge_sboms::MergeSbomsUseCase;
use super::resolve_instances::InstanceResolver;
use super::resolve_tools::ToolResolver;
use crate::application::dto::{
    OrchestrationRequest, OrchestrationResponse, PlannedInstance, RunOutcome,
};
use crate::application::factories::GeneratorRegistry;
use crate::application::read_models::RunReportBuilder;
use crate::ports::outbound::{
    ArtifactReader, CommandRunner, FileScanner, OutputWriter, ProgressReporter, SbomFormatter,
};
use crate::sbom_generation::domain::{
    BuildSystemInstance, GenerationOutcome, GenerationResult, GenerationStrategy, OutputArtifact,
    SbomMetadata,
};
use crate::sbom_generation::policies::{
    ArtifactNaming, EvidenceGroup, EvidenceVocabulary, AGGREGATE_FILE_NAME, SUMMARY_FILE_NAME,
};
use crate::shared::error::SbomError;
use crate::shared::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// GenerateSbomsUseCase - orchestrates one SBOM generation run
///
/// Discovers build systems under the root directory, resolves them into
/// deduplicated instances and generates one SBOM per instance. Instances
/// run strictly one after another; a failing instance never stops its
/// siblings. The only run-fatal conditions are an output directory that
/// cannot be created and a tree with neither build systems nor
/// infrastructure evidence.
///
/// # Type Parameters
/// * `S` - FileScanner implementation
/// * `R` - CommandRunner implementation
/// * `W` - OutputWriter implementation
/// * `A` - ArtifactReader implementation
/// * `P` - ProgressReporter implementation
pub struct GenerateSbomsUseCase<S, R, W, A, P> {
    registry: GeneratorRegistry,
    scanner: S,
    runner: R,
    writer: W,
    reader: A,
    reporter: P,
    formatter: Box<dyn SbomFormatter>,
}

impl<S, R, W, A, P> GenerateSbomsUseCase<S, R, W, A, P>
where
    S: FileScanner,
    R: CommandRunner,
    W: OutputWriter,
    A: ArtifactReader,
    P: ProgressReporter,
{
    /// Creates a new GenerateSbomsUseCase with injected dependencies
    pub fn new(
        registry: GeneratorRegistry,
        scanner: S,
        runner: R,
        writer: W,
        reader: A,
        reporter: P,
        formatter: Box<dyn SbomFormatter>,
    ) -> Self {
        Self {
            registry,
            scanner,
            runner,
            writer,
            reader,
            reporter,
            formatter,
        }
    }

    /// Executes the orchestration run
    ///
    /// # Errors
    /// - `OutputDirectoryError` when the output directory cannot be created
    /// - `NoBuildSystemDetected` when nothing supported and no evidence was found
    /// - `FileWriteError` when the evidence-only SBOM cannot be written
    pub async fn execute(&self, request: OrchestrationRequest) -> Result<OrchestrationResponse> {
        // Step 1: Output directory, created once before anything runs
        self.writer
            .ensure_directory(&request.output_dir)
            .map_err(|e| match e.downcast::<SbomError>() {
                Ok(e @ SbomError::OutputDirectoryError { .. }) => e,
                Ok(e) => SbomError::OutputDirectoryError {
                    path: request.output_dir.clone(),
                    details: e.to_string(),
                },
                Err(e) => SbomError::OutputDirectoryError {
                    path: request.output_dir.clone(),
                    details: format!("{:#}", e),
                },
            })?;

        // Step 2: Build instances
        let instances = if request.sbom_only {
            vec![self.sbom_only_instance(&request)?]
        } else {
            self.reporter.report(&format!(
                "🔍 Inspecting environment at: {}",
                request.root_dir.display()
            ));
            self.reporter.report(&format!(
                "📁 Output directory: {}",
                request.output_dir.display()
            ));

            let report = DiscoveryEngine::new(&self.scanner, &self.registry).discover(&request);
            tracing::info!(
                descriptors = report.raw_match_count(),
                ecosystems = report.ecosystems.len(),
                "Discovery finished"
            );
            let instances = InstanceResolver::resolve(&report, &self.registry, &request);
            if instances.is_empty() {
                return self.evidence_only(&request, &report.evidence);
            }
            instances
        };

        // Step 3: Plan a command per instance
        let planned = self.plan(instances, &request);
        self.report_plan(&planned);

        if request.dry_run {
            return Ok(self.dry_run(&request, planned));
        }

        // Step 4: Generate, one instance at a time
        let results = self.generate_all(&request, &planned).await;

        // Step 5: Merge when more than one instance was planned
        let merged_sbom = if request.merge && planned.len() > 1 {
            self.merge(&request.output_dir)
        } else {
            None
        };

        // Step 6: Run files
        self.write_run_files(&request, &planned, &results);

        let response =
            OrchestrationResponse::new(planned, results, RunOutcome::Generated, merged_sbom);
        self.report_outcome(&response);
        Ok(response)
    }

    fn sbom_only_instance(&self, request: &OrchestrationRequest) -> Result<BuildSystemInstance> {
        let generator = self.registry.binary().ok_or_else(|| SbomError::Validation {
            message: "no filesystem scan generator is registered".to_string(),
        })?;
        self.reporter.report(&format!(
            "🔍 SBOM-only mode: scanning {} with {}",
            request.root_dir.display(),
            generator.name()
        ));
        Ok(InstanceResolver::sbom_only_instance(
            generator.as_ref(),
            request,
        ))
    }

    /// Pairs every instance with its generation command
    fn plan(
        &self,
        instances: Vec<BuildSystemInstance>,
        request: &OrchestrationRequest,
    ) -> Vec<PlannedInstance> {
        instances
            .into_iter()
            .filter_map(|instance| {
                let Some(generator) = self.registry.get(instance.ecosystem()) else {
                    tracing::warn!(ecosystem = instance.ecosystem(), "No generator registered");
                    return None;
                };
                let command = generator.generate_command(
                    instance.project_name(),
                    &request.output_dir,
                    instance.build_file(),
                    &request.additional_args,
                );
                Some(PlannedInstance::new(instance, command))
            })
            .collect()
    }

    fn report_plan(&self, planned: &[PlannedInstance]) {
        self.reporter.report(&format!(
            "\n=== Build Systems Detected: {} ===",
            planned.len()
        ));
        for plan in planned {
            let instance = &plan.instance;
            let mut lines = vec![
                format!("\n--- {} ---", instance.ecosystem()),
                format!("Project Name: {}", instance.project_name()),
                format!("Multi-Module: {}", instance.is_multi_module()),
                format!("Build Files Found: {}", instance.build_files().len()),
            ];
            lines.extend(
                instance
                    .build_files()
                    .iter()
                    .map(|f| format!("  - {}", f.display())),
            );
            lines.push(format!(
                "Working Directory: {}",
                instance.working_directory().display()
            ));
            lines.push(format!("Command: {}", plan.command));
            self.reporter.report(&lines.join("\n"));
        }
    }

    fn dry_run(
        &self,
        request: &OrchestrationRequest,
        planned: Vec<PlannedInstance>,
    ) -> OrchestrationResponse {
        self.reporter
            .report("\n[DRY-RUN] Would execute the following commands:");
        for plan in &planned {
            let mut message = format!(
                "\n--- {} ({}) ---\nWorking Directory: {}",
                plan.instance.ecosystem(),
                plan.instance.project_name(),
                plan.instance.working_directory().display(),
            );
            if let Some(generator) = self.registry.get(plan.instance.ecosystem()) {
                message.push_str(&format!(
                    "\nToolchain Check: {}",
                    generator.version_check_command()
                ));
            }
            message.push_str(&format!("\n  {}", self.runner.describe(&plan.command)));
            self.reporter.report(&message);
        }

        if request.json {
            let summary = RunReportBuilder::summary(
                &request.root_dir,
                &request.output_dir,
                &planned,
                None,
                &[],
            );
            self.write_json(&request.output_dir.join(SUMMARY_FILE_NAME), &summary, "summary");
        }

        OrchestrationResponse::new(planned, Vec::new(), RunOutcome::DryRun, None)
    }

    async fn generate_all(
        &self,
        request: &OrchestrationRequest,
        planned: &[PlannedInstance],
    ) -> Vec<GenerationResult> {
        self.reporter.report("\n=== Generating SBOMs ===");
        let mut cache = ScanCache::new();
        let mut results = Vec::with_capacity(planned.len());

        for (index, plan) in planned.iter().enumerate() {
            self.reporter.report_progress(
                index + 1,
                planned.len(),
                Some(&format!(
                    "{} ({})",
                    plan.instance.ecosystem(),
                    plan.instance.project_name()
                )),
            );

            let result = self.generate_one(request, plan, &mut cache).await;
            self.report_result(&result);
            if request.json {
                let log = RunReportBuilder::instance_log(&result, &request.output_dir);
                let path = request.output_dir.join(ArtifactNaming::log_file_name(
                    result.instance().project_name(),
                    result.instance().ecosystem(),
                ));
                self.write_json(&path, &log, "instance log");
            }
            results.push(result);
        }

        results
    }

    /// Cache lookup, tool gate, preparation and generation of one instance
    async fn generate_one(
        &self,
        request: &OrchestrationRequest,
        plan: &PlannedInstance,
        cache: &mut ScanCache,
    ) -> GenerationResult {
        let instance = &plan.instance;
        let expected = ArtifactNaming::sbom_path(&request.output_dir, instance.project_name());
        let Some(generator) = self.registry.get(instance.ecosystem()) else {
            return GenerationResult::new(
                instance.clone(),
                plan.command.clone(),
                GenerationOutcome::not_run(
                    format!("No generator registered for {}", instance.ecosystem()),
                    OutputArtifact::absent(expected),
                ),
            );
        };

        let strategy = generator.strategy();
        tracing::debug!(
            ecosystem = instance.ecosystem(),
            strategy = strategy.as_str(),
            "Generating SBOM"
        );
        let scans = strategy == GenerationStrategy::FilesystemScan;
        if scans {
            if let Some(outcome) = cache.lookup(instance.working_directory(), &self.reader) {
                tracing::info!(
                    directory = %instance.working_directory().display(),
                    "Reusing filesystem scan"
                );
                self.reporter.report(&format!(
                    "♻️  Reused Syft output from {}",
                    outcome.artifact().path().display()
                ));
                return GenerationResult::from_cache(instance.clone(), plan.command.clone(), outcome);
            }
        }

        let tools = ToolResolver::new(
            &self.runner,
            &self.reader,
            &self.reporter,
            request.allow_tool_install,
        );
        if let Some(message) = tools.missing_tools(generator.as_ref(), instance).await {
            return GenerationResult::new(
                instance.clone(),
                plan.command.clone(),
                GenerationOutcome::not_run(message, OutputArtifact::absent(expected)),
            );
        }

        let engine = ExecutionEngine::new(&self.runner, &self.reader, &self.reporter);
        engine.prepare(generator.as_ref(), instance).await;
        let result = engine
            .execute(generator.as_ref(), instance, &plan.command, &request.output_dir)
            .await;

        if scans {
            cache.record(instance.working_directory(), result.outcome());
        }
        result
    }

    fn report_result(&self, result: &GenerationResult) {
        let instance = result.instance();
        let outcome = result.outcome();
        if outcome.is_success() {
            self.reporter.report_completion(&format!(
                "SBOM generated for {} ({}): {}",
                instance.ecosystem(),
                instance.project_name(),
                outcome.artifact().path().display()
            ));
        } else {
            self.reporter.report_error(&format!(
                "❌ SBOM generation failed for {} ({}): {}",
                instance.ecosystem(),
                instance.project_name(),
                outcome.error_message().unwrap_or("unknown error")
            ));
        }
    }

    /// Merge failures are warnings
    fn merge(&self, output_dir: &Path) -> Option<PathBuf> {
        self.reporter.report("\n=== Merging SBOMs ===");
        let merger = MergeSbomsUseCase::new(
            &self.reader,
            &self.writer,
            &self.reporter,
            self.formatter.as_ref(),
        );
        match merger.execute(output_dir) {
            Ok(merged) => merged,
            Err(e) => {
                tracing::warn!(error = %e, "Merge failed");
                self.reporter
                    .report_error(&format!("⚠️  Failed to merge SBOMs: {:#}", e));
                None
            }
        }
    }

    /// Summary with `--json`, aggregate always
    fn write_run_files(
        &self,
        request: &OrchestrationRequest,
        planned: &[PlannedInstance],
        results: &[GenerationResult],
    ) {
        if request.json {
            let mut generated: Vec<PathBuf> = results
                .iter()
                .filter(|r| r.is_success() && r.outcome().artifact().exists())
                .map(|r| r.outcome().artifact().path().to_path_buf())
                .collect();
            generated.sort();
            generated.dedup();

            let summary = RunReportBuilder::summary(
                &request.root_dir,
                &request.output_dir,
                planned,
                Some(results),
                &generated,
            );
            self.write_json(&request.output_dir.join(SUMMARY_FILE_NAME), &summary, "summary");
        }

        let aggregate =
            RunReportBuilder::aggregate(&request.root_dir, &request.output_dir, results);
        self.write_json(
            &request.output_dir.join(AGGREGATE_FILE_NAME),
            &aggregate,
            "aggregate",
        );
    }

    /// Writes a JSON run file; failures are warnings
    fn write_json<T: Serialize>(&self, path: &Path, value: &T, what: &str) {
        let written = serde_json::to_string_pretty(value)
            .map_err(anyhow::Error::from)
            .and_then(|content| self.writer.write(path, &content));

        match written {
            Ok(()) => tracing::debug!(path = %path.display(), "Wrote {}", what),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to write {}", what);
                self.reporter.report_error(&format!(
                    "⚠️  Failed to write {} {}: {:#}",
                    what,
                    path.display(),
                    e
                ));
            }
        }
    }

    /// Fallback when no instance could be resolved
    fn evidence_only(
        &self,
        request: &OrchestrationRequest,
        evidence: &[EvidenceGroup],
    ) -> Result<OrchestrationResponse> {
        if evidence.is_empty() {
            return Err(SbomError::NoBuildSystemDetected {
                path: request.root_dir.clone(),
                supported: format!(
                    "{}\n  - Infrastructure evidence only ({})",
                    self.registry.supported_summary(),
                    EvidenceVocabulary::category_names().join(", ")
                ),
            }
            .into());
        }

        let categories: Vec<&str> = evidence.iter().map(|g| g.category).collect();
        self.reporter.report(&format!(
            "No supported build system detected; infrastructure evidence found: {}",
            categories.join(", ")
        ));

        if request.dry_run {
            self.reporter
                .report("\n[DRY-RUN] Would generate evidence-only SBOM.");
            return Ok(OrchestrationResponse::new(
                Vec::new(),
                Vec::new(),
                RunOutcome::DryRun,
                None,
            ));
        }

        let root = &request.root_dir;
        let project_name = InstanceResolver::root_project_name(root);
        let locations: Vec<String> = evidence
            .iter()
            .flat_map(|g| g.files.iter())
            .map(|file| file.strip_prefix(root).unwrap_or(file).display().to_string())
            .collect();

        let content = self.formatter.format_evidence_only(
            &project_name,
            &locations,
            &SbomMetadata::for_this_tool(),
        )?;
        let sbom_path = ArtifactNaming::sbom_path(&request.output_dir, &project_name);
        self.writer
            .write(&sbom_path, &content)
            .map_err(|e| SbomError::FileWriteError {
                path: sbom_path.clone(),
                details: format!("{:#}", e),
            })?;

        self.reporter.report_completion(&format!(
            "Evidence-only SBOM generated: {}",
            sbom_path.display()
        ));
        Ok(OrchestrationResponse::new(
            Vec::new(),
            Vec::new(),
            RunOutcome::EvidenceOnly { sbom_path },
            None,
        ))
    }

    fn report_outcome(&self, response: &OrchestrationResponse) {
        let total = response.results.len();
        let succeeded = response.successful_count();
        self.reporter.report_completion(&format!(
            "{}/{} SBOM(s) generated successfully",
            succeeded, total
        ));
        if response.failed_count() > 0 {
            self.reporter.report_error(&format!(
                "❌ {} build system(s) failed",
                response.failed_count()
            ));
        }
    }
}
