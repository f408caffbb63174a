use crate::sbom_generation::domain::SbomMetadata;
use crate::shared::Result;

/// SbomFormatter port for documents written by the orchestrator itself
///
/// Ecosystem tools write their own SBOMs; this port only covers the
/// evidence-only document and the merged document.
pub trait SbomFormatter {
    /// Formats an SBOM with no components, recording where infrastructure
    /// evidence was found
    ///
    /// # Arguments
    /// * `project_name` - Name of the scanned root
    /// * `locations` - Evidence file locations relative to the root
    /// * `metadata` - Document metadata
    fn format_evidence_only(
        &self,
        project_name: &str,
        locations: &[String],
        metadata: &SbomMetadata,
    ) -> Result<String>;

    /// Formats an SBOM whose components are the given entries, verbatim
    fn format_merged(
        &self,
        components: Vec<serde_json::Value>,
        metadata: &SbomMetadata,
    ) -> Result<String>;
}
