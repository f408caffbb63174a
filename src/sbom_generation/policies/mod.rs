mod artifact_naming;
mod evidence_vocabulary;
mod install_command_policy;

pub use artifact_naming::{
    ArtifactNaming, AGGREGATE_FILE_NAME, MERGED_SBOM_FILE_NAME, SUMMARY_FILE_NAME,
};
pub use evidence_vocabulary::{EvidenceGroup, EvidenceVocabulary};
pub use install_command_policy::{InstallCandidate, InstallCommandPolicy};
