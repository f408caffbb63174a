//! Run aggregate written as `sbom-generation-aggregate.json`

use serde::Serialize;

/// Counts and per-instance pointers for a completed run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunAggregateView {
    pub timestamp: String,
    pub root_directory: String,
    pub output_directory: String,
    pub total_build_systems: usize,
    pub successful_generations: usize,
    pub failed_generations: usize,
    /// Bytes of every SBOM produced by a successful instance
    pub total_sbom_size: u64,
    pub build_systems: Vec<AggregateEntryView>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateEntryView {
    pub build_system: String,
    pub project_name: String,
    pub success: bool,
    pub multi_module: bool,
    pub sbom_path: String,
    pub sbom_exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sbom_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    pub working_directory: String,
    pub reused_cached_output: bool,
    /// File name of the instance's detailed log
    pub detailed_log_file: String,
}
