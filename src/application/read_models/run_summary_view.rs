//! Run summary written as `sbom-summary.json`

use serde::Serialize;

/// Summary of a run, dry or not
///
/// Generation fields are omitted for dry runs.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummaryView {
    pub timestamp: String,
    pub root_directory: String,
    pub output_directory: String,
    pub build_systems_detected: usize,
    pub format: &'static str,
    pub dry_run: bool,
    pub build_systems: Vec<BuildSystemSummaryView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_sbom_files: Option<Vec<String>>,
}

/// One planned instance inside the run summary
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildSystemSummaryView {
    pub build_system: String,
    pub project_name: String,
    pub multi_module: bool,
    pub build_files: Vec<String>,
    pub working_directory: String,
    pub plugin_command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_success: Option<bool>,
}
