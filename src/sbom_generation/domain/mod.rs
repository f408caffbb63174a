pub mod additional_args;
pub mod build_system_instance;
pub mod file_pattern;
pub mod generation_result;
pub mod project_name;
pub mod sbom_metadata;
pub mod tool_requirement;

pub use additional_args::AdditionalArgs;
pub use build_system_instance::{BuildFileMatch, BuildSystemInstance};
pub use file_pattern::{FilePattern, EXCLUDED_DIRECTORIES, VCS_DIRECTORIES};
pub use generation_result::{
    GenerationOutcome, GenerationResult, GenerationStrategy, OutputArtifact,
};
pub use project_name::{ecosystem_slug, fallback_project_name, sanitize_project_name};
pub use sbom_metadata::SbomMetadata;
pub use tool_requirement::ToolRequirement;
