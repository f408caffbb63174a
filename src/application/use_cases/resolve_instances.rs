use super::discover_build_systems::DiscoveryReport;
use crate::application::dto::OrchestrationRequest;
use crate::application::factories::GeneratorRegistry;
use crate::ports::outbound::EcosystemGenerator;
use crate::sbom_generation::domain::{
    sanitize_project_name, BuildFileMatch, BuildSystemInstance, EXCLUDED_DIRECTORIES,
};
use crate::sbom_generation::services::{BranchGrouper, ModuleResolver};
use std::path::{Path, PathBuf};

/// Project name used when the root directory has no usable name
const FALLBACK_ROOT_NAME: &str = "project";

/// InstanceResolver - turns raw discovery output into build instances
///
/// Descriptor matches collapse per ecosystem into one instance per module
/// tree. Loose binaries are only considered when no descriptor exists
/// anywhere and are grouped into one instance per branch.
pub struct InstanceResolver;

impl InstanceResolver {
    /// Instances to plan for a discovery report, in registration order
    pub fn resolve(
        report: &DiscoveryReport,
        registry: &GeneratorRegistry,
        request: &OrchestrationRequest,
    ) -> Vec<BuildSystemInstance> {
        if report.has_build_systems() {
            return report
                .ecosystems
                .iter()
                .flat_map(|e| Self::manifest_instances(e.generator.as_ref(), &e.matches, request))
                .collect();
        }

        match registry.binary() {
            Some(generator) if !report.binaries.is_empty() => {
                Self::binary_instances(generator.as_ref(), &report.binaries, request)
            }
            _ => Vec::new(),
        }
    }

    /// One instance per module tree of a single ecosystem
    pub fn manifest_instances(
        generator: &dyn EcosystemGenerator,
        matches: &[BuildFileMatch],
        request: &OrchestrationRequest,
    ) -> Vec<BuildSystemInstance> {
        ModuleResolver::collapse(matches, |file| generator.pattern_priority(file))
            .into_iter()
            .map(|tree| {
                let project_name = generator.project_name(&tree.root_file);
                tracing::debug!(
                    ecosystem = generator.name(),
                    root = %tree.root_dir.display(),
                    modules = tree.member_files.len(),
                    "Resolved build instance"
                );
                BuildSystemInstance::new(
                    generator.name(),
                    tree.root_file.clone(),
                    project_name,
                    request.working_directory_for(&tree.root_dir),
                )
                .with_build_files(tree.member_files, tree.multi_module)
            })
            .collect()
    }

    /// One instance per binary branch; `build_file` is the branch directory
    pub fn binary_instances(
        generator: &dyn EcosystemGenerator,
        binaries: &[PathBuf],
        request: &OrchestrationRequest,
    ) -> Vec<BuildSystemInstance> {
        BranchGrouper::group(&request.root_dir, binaries, EXCLUDED_DIRECTORIES)
            .into_iter()
            .map(|(branch, files)| {
                let project_name = generator.project_name(&branch);
                BuildSystemInstance::new(
                    generator.name(),
                    branch.clone(),
                    project_name,
                    request.working_directory_for(&branch),
                )
                .with_build_files(files, false)
            })
            .collect()
    }

    /// Single scan of the whole root directory, named after it
    pub fn sbom_only_instance(
        generator: &dyn EcosystemGenerator,
        request: &OrchestrationRequest,
    ) -> BuildSystemInstance {
        let root = &request.root_dir;
        BuildSystemInstance::new(
            generator.name(),
            root.clone(),
            Self::root_project_name(root),
            request.working_directory_for(root),
        )
    }

    /// Project name derived from the root directory's own name
    pub fn root_project_name(root: &Path) -> String {
        root.file_name()
            .and_then(|n| n.to_str())
            .and_then(sanitize_project_name)
            .unwrap_or_else(|| FALLBACK_ROOT_NAME.to_string())
    }
}
