use crate::sbom_generation::domain::AdditionalArgs;
use crate::shared::error::SbomError;
use std::path::{Path, PathBuf};

/// Default output directory, relative to the current directory
pub const DEFAULT_OUTPUT_DIR: &str = "generated-sboms";

/// OrchestrationRequest - Internal request DTO for an orchestration run
///
/// Built through [`OrchestrationRequestBuilder`], which validates the
/// pass-through arguments before any subprocess can see them.
#[derive(Debug, Clone)]
pub struct OrchestrationRequest {
    /// Directory tree to inspect
    pub root_dir: PathBuf,
    /// Directory receiving SBOMs, logs and summaries
    pub output_dir: PathBuf,
    /// Working directory for every command instead of the instance's own
    pub working_dir_override: Option<PathBuf>,
    /// Print planned commands without running anything
    pub dry_run: bool,
    /// Merge generated SBOMs into one document
    pub merge: bool,
    /// Write the JSON summary and per-instance logs
    pub json: bool,
    /// Skip discovery and scan the root directory with Syft
    pub sbom_only: bool,
    /// Run install commands for missing tools
    pub allow_tool_install: bool,
    /// Validated pass-through arguments for every generation command
    pub additional_args: AdditionalArgs,
    /// Ecosystem names excluded from this run
    pub skip_ecosystems: Vec<String>,
}

impl OrchestrationRequest {
    pub fn builder() -> OrchestrationRequestBuilder {
        OrchestrationRequestBuilder::default()
    }

    /// Whether an ecosystem was excluded, ignoring ASCII case
    pub fn is_skipped(&self, ecosystem: &str) -> bool {
        self.skip_ecosystems
            .iter()
            .any(|s| s.eq_ignore_ascii_case(ecosystem))
    }

    /// Working directory for an instance rooted at `default_dir`
    pub fn working_directory_for(&self, default_dir: &Path) -> PathBuf {
        self.working_dir_override
            .clone()
            .unwrap_or_else(|| default_dir.to_path_buf())
    }
}

/// Builder for [`OrchestrationRequest`]
#[derive(Debug, Default)]
pub struct OrchestrationRequestBuilder {
    root_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    working_dir_override: Option<PathBuf>,
    dry_run: bool,
    merge: bool,
    json: bool,
    sbom_only: bool,
    allow_tool_install: bool,
    additional_args: Option<String>,
    skip_ecosystems: Vec<String>,
}

impl OrchestrationRequestBuilder {
    pub fn root_dir(mut self, root_dir: impl Into<PathBuf>) -> Self {
        self.root_dir = Some(root_dir.into());
        self
    }

    pub fn output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(output_dir.into());
        self
    }

    pub fn working_dir_override(mut self, dir: Option<PathBuf>) -> Self {
        self.working_dir_override = dir;
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn merge(mut self, merge: bool) -> Self {
        self.merge = merge;
        self
    }

    pub fn json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn sbom_only(mut self, sbom_only: bool) -> Self {
        self.sbom_only = sbom_only;
        self
    }

    pub fn allow_tool_install(mut self, allow: bool) -> Self {
        self.allow_tool_install = allow;
        self
    }

    /// Raw pass-through arguments; validated in [`build`](Self::build)
    pub fn additional_args(mut self, args: Option<String>) -> Self {
        self.additional_args = args;
        self
    }

    pub fn skip_ecosystems(mut self, ecosystems: Vec<String>) -> Self {
        self.skip_ecosystems = ecosystems;
        self
    }

    /// Validates and builds the request
    ///
    /// # Errors
    /// - `Validation` when the root directory is missing or empty
    /// - `InvalidAdditionalArgs` when the pass-through arguments contain a
    ///   character outside the allow-list
    pub fn build(self) -> std::result::Result<OrchestrationRequest, SbomError> {
        let root_dir = self
            .root_dir
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| SbomError::Validation {
                message: "root directory is required".to_string(),
            })?;

        let output_dir = self
            .output_dir
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

        let additional_args = match self.additional_args.as_deref() {
            Some(raw) => AdditionalArgs::parse(raw)?,
            None => AdditionalArgs::empty(),
        };

        let mut skip_ecosystems: Vec<String> = self
            .skip_ecosystems
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        skip_ecosystems.sort();
        skip_ecosystems.dedup();

        Ok(OrchestrationRequest {
            root_dir,
            output_dir,
            working_dir_override: self.working_dir_override,
            dry_run: self.dry_run,
            merge: self.merge,
            json: self.json,
            sbom_only: self.sbom_only,
            allow_tool_install: self.allow_tool_install,
            additional_args,
            skip_ecosystems,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let request = OrchestrationRequest::builder().root_dir(".").build().unwrap();
        assert_eq!(request.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
        assert!(!request.dry_run);
        assert!(!request.merge);
        assert!(request.additional_args.is_empty());
        assert!(request.working_dir_override.is_none());
    }

    #[test]
    fn test_builder_requires_root() {
        let err = OrchestrationRequest::builder().build().unwrap_err();
        assert!(matches!(err, SbomError::Validation { .. }));
    }

    #[test]
    fn test_builder_rejects_semicolon_args() {
        let err = OrchestrationRequest::builder()
            .root_dir("/proj")
            .additional_args(Some("-DskipTests;reboot".to_string()))
            .build()
            .unwrap_err();
        assert!(matches!(err, SbomError::InvalidAdditionalArgs { .. }));
    }

    #[test]
    fn test_skip_list_is_normalized_and_case_insensitive() {
        let request = OrchestrationRequest::builder()
            .root_dir("/proj")
            .skip_ecosystems(vec![" npm ".to_string(), "".to_string(), "npm".to_string()])
            .build()
            .unwrap();
        assert_eq!(request.skip_ecosystems, vec!["npm"]);
        assert!(request.is_skipped("NPM"));
        assert!(!request.is_skipped("Maven"));
    }

    #[test]
    fn test_working_directory_override() {
        let request = OrchestrationRequest::builder()
            .root_dir("/proj")
            .working_dir_override(Some(PathBuf::from("/build")))
            .build()
            .unwrap();
        assert_eq!(
            request.working_directory_for(Path::new("/proj/app")),
            PathBuf::from("/build")
        );
    }
}
