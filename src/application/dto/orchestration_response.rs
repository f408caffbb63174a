use crate::sbom_generation::domain::{BuildSystemInstance, GenerationResult};
use crate::shared::error::ExitCode;
use std::path::PathBuf;

/// A planned instance with the command that generates its SBOM
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedInstance {
    pub instance: BuildSystemInstance,
    pub command: String,
}

impl PlannedInstance {
    pub fn new(instance: BuildSystemInstance, command: String) -> Self {
        Self { instance, command }
    }
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Instances were planned and every one of them was attempted
    Generated,
    /// Instances were planned and printed; nothing ran
    DryRun,
    /// No ecosystem was found; an evidence-only SBOM was written instead
    EvidenceOnly { sbom_path: PathBuf },
}

/// OrchestrationResponse - result of an orchestration run
#[derive(Debug, Clone)]
pub struct OrchestrationResponse {
    /// Every planned instance, in run order
    pub instances: Vec<PlannedInstance>,
    /// One result per attempted instance; empty for dry and evidence-only runs
    pub results: Vec<GenerationResult>,
    pub outcome: RunOutcome,
    /// Merged SBOM, when merging was requested and happened
    pub merged_sbom: Option<PathBuf>,
}

impl OrchestrationResponse {
    pub fn new(
        instances: Vec<PlannedInstance>,
        results: Vec<GenerationResult>,
        outcome: RunOutcome,
        merged_sbom: Option<PathBuf>,
    ) -> Self {
        Self {
            instances,
            results,
            outcome,
            merged_sbom,
        }
    }

    pub fn successful_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.results.len() - self.successful_count()
    }

    /// Exit code for the CLI: any failed instance fails the run
    pub fn exit_code(&self) -> ExitCode {
        if self.failed_count() > 0 {
            ExitCode::GenerationFailed
        } else {
            ExitCode::Success
        }
    }
}
