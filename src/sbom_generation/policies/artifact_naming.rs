use crate::sbom_generation::domain::ecosystem_slug;
use std::path::{Path, PathBuf};

/// Name of the merged SBOM written to the output directory
pub const MERGED_SBOM_FILE_NAME: &str = "merged-bom.json";

/// Name of the run summary written when JSON output is requested
pub const SUMMARY_FILE_NAME: &str = "sbom-summary.json";

/// Name of the run aggregate written after every non-dry run
pub const AGGREGATE_FILE_NAME: &str = "sbom-generation-aggregate.json";

/// Artifact naming policy
///
/// File names in the output directory are derived only from the project
/// name and the ecosystem, so the same project always lands on the same path.
pub struct ArtifactNaming;

impl ArtifactNaming {
    /// `<project>-bom.json`
    pub fn sbom_file_name(project_name: &str) -> String {
        format!("{}-bom.json", project_name)
    }

    pub fn sbom_path(output_dir: &Path, project_name: &str) -> PathBuf {
        output_dir.join(Self::sbom_file_name(project_name))
    }

    /// `<project>-<ecosystem-slug>-sbom-log.json`
    pub fn log_file_name(project_name: &str, ecosystem: &str) -> String {
        format!("{}-{}-sbom-log.json", project_name, ecosystem_slug(ecosystem))
    }

    /// Whether a file in the output directory is an SBOM that takes part in merging
    pub fn is_mergeable_sbom(file_name: &str) -> bool {
        file_name != MERGED_SBOM_FILE_NAME
            && file_name.ends_with(".json")
            && file_name.contains("-bom")
    }
}
