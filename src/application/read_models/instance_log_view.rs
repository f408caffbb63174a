//! Per-instance log written as `<project>-<ecosystem>-sbom-log.json`

use serde::Serialize;

/// Detailed record of one attempted build-system instance
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceLogView {
    pub build_system: String,
    pub project_name: String,
    pub success: bool,
    pub timestamp: String,
    pub working_directory: String,
    pub command: String,
    pub output_directory: String,
    /// Present when the command failed or exited nonzero
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    pub expected_sbom_path: String,
    pub sbom_file_exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sbom_file_size: Option<u64>,
    pub build_files: Vec<String>,
    pub multi_module: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stdout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub reused_cached_output: bool,
}
