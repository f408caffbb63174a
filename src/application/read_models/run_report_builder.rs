//! Builder turning generation results into the persisted run files

use super::instance_log_view::InstanceLogView;
use super::run_aggregate_view::{AggregateEntryView, RunAggregateView};
use super::run_summary_view::{BuildSystemSummaryView, RunSummaryView};
use crate::application::dto::PlannedInstance;
use crate::sbom_generation::domain::{BuildSystemInstance, GenerationResult};
use crate::sbom_generation::policies::ArtifactNaming;
use chrono::Utc;
use std::path::{Path, PathBuf};

fn display(path: &Path) -> String {
    path.display().to_string()
}

fn paths(files: &[PathBuf]) -> Vec<String> {
    files.iter().map(|f| display(f)).collect()
}

fn non_blank(text: &str) -> Option<String> {
    (!text.trim().is_empty()).then(|| text.to_string())
}

/// Builds the JSON views of a run
pub struct RunReportBuilder;

impl RunReportBuilder {
    /// Detailed log of one attempted instance
    pub fn instance_log(result: &GenerationResult, output_dir: &Path) -> InstanceLogView {
        let instance = result.instance();
        let outcome = result.outcome();
        let artifact = outcome.artifact();
        let exit_code = outcome
            .exit_code()
            .filter(|code| *code != 0 || !outcome.is_success());

        InstanceLogView {
            build_system: instance.ecosystem().to_string(),
            project_name: instance.project_name().to_string(),
            success: outcome.is_success(),
            timestamp: outcome.timestamp().to_rfc3339(),
            working_directory: display(instance.working_directory()),
            command: result.command().to_string(),
            output_directory: display(output_dir),
            exit_code,
            expected_sbom_path: display(artifact.path()),
            sbom_file_exists: artifact.exists(),
            sbom_file_size: artifact.exists().then(|| artifact.size()),
            build_files: paths(instance.build_files()),
            multi_module: instance.is_multi_module(),
            stdout: non_blank(outcome.stdout()),
            stderr: non_blank(outcome.stderr()),
            error_message: outcome.error_message().and_then(non_blank),
            reused_cached_output: result.reused_cached_output(),
        }
    }

    /// Run summary; `results` is `None` for dry runs
    ///
    /// # Arguments
    /// * `planned` - Planned instances in run order
    /// * `results` - Results in the same order as `planned`
    /// * `generated_files` - SBOM files present in the output directory
    pub fn summary(
        root_dir: &Path,
        output_dir: &Path,
        planned: &[PlannedInstance],
        results: Option<&[GenerationResult]>,
        generated_files: &[PathBuf],
    ) -> RunSummaryView {
        let build_systems = planned
            .iter()
            .enumerate()
            .map(|(i, plan)| {
                let generation_success =
                    results.and_then(|r| r.get(i)).map(|result| result.is_success());
                Self::summary_entry(&plan.instance, &plan.command, generation_success)
            })
            .collect();

        RunSummaryView {
            timestamp: Utc::now().to_rfc3339(),
            root_directory: display(root_dir),
            output_directory: display(output_dir),
            build_systems_detected: planned.len(),
            format: "json",
            dry_run: results.is_none(),
            build_systems,
            overall_success: results.map(|r| r.iter().all(|result| result.is_success())),
            generated_sbom_files: results.map(|_| paths(generated_files)),
        }
    }

    fn summary_entry(
        instance: &BuildSystemInstance,
        command: &str,
        generation_success: Option<bool>,
    ) -> BuildSystemSummaryView {
        BuildSystemSummaryView {
            build_system: instance.ecosystem().to_string(),
            project_name: instance.project_name().to_string(),
            multi_module: instance.is_multi_module(),
            build_files: paths(instance.build_files()),
            working_directory: display(instance.working_directory()),
            plugin_command: command.to_string(),
            generation_success,
        }
    }

    /// Aggregate of a completed run
    pub fn aggregate(
        root_dir: &Path,
        output_dir: &Path,
        results: &[GenerationResult],
    ) -> RunAggregateView {
        let successful = results.iter().filter(|r| r.is_success()).count();
        let total_sbom_size = results
            .iter()
            .filter(|r| r.is_success() && r.outcome().artifact().exists())
            .map(|r| r.outcome().artifact().size())
            .sum();

        RunAggregateView {
            timestamp: Utc::now().to_rfc3339(),
            root_directory: display(root_dir),
            output_directory: display(output_dir),
            total_build_systems: results.len(),
            successful_generations: successful,
            failed_generations: results.len() - successful,
            total_sbom_size,
            build_systems: results.iter().map(Self::aggregate_entry).collect(),
        }
    }

    fn aggregate_entry(result: &GenerationResult) -> AggregateEntryView {
        let instance = result.instance();
        let outcome = result.outcome();
        let artifact = outcome.artifact();

        AggregateEntryView {
            build_system: instance.ecosystem().to_string(),
            project_name: instance.project_name().to_string(),
            success: outcome.is_success(),
            multi_module: instance.is_multi_module(),
            sbom_path: display(artifact.path()),
            sbom_exists: artifact.exists(),
            sbom_size: artifact.exists().then(|| artifact.size()),
            error: if outcome.is_success() {
                None
            } else {
                outcome.error_message().map(String::from)
            },
            exit_code: outcome.exit_code().filter(|code| *code != 0),
            working_directory: display(instance.working_directory()),
            reused_cached_output: result.reused_cached_output(),
            detailed_log_file: ArtifactNaming::log_file_name(
                instance.project_name(),
                instance.ecosystem(),
            ),
        }
    }
}
