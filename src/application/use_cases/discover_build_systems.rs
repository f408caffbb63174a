use crate::application::dto::OrchestrationRequest;
use crate::application::factories::GeneratorRegistry;
use crate::ports::outbound::{EcosystemGenerator, FileScanner};
use crate::sbom_generation::domain::{BuildFileMatch, VCS_DIRECTORIES};
use crate::sbom_generation::policies::{EvidenceGroup, EvidenceVocabulary};
use crate::sbom_generation::services::FileClassifier;
use std::path::PathBuf;
use std::sync::Arc;

/// Raw matches of one ecosystem
#[derive(Clone)]
pub struct EcosystemMatches {
    pub generator: Arc<dyn EcosystemGenerator>,
    pub matches: Vec<BuildFileMatch>,
}

/// What a single walk of the root directory found
///
/// `binaries` and `evidence` are only filled when no ecosystem matched.
#[derive(Clone, Default)]
pub struct DiscoveryReport {
    /// Ecosystems with at least one match, in registration order
    pub ecosystems: Vec<EcosystemMatches>,
    /// Loose binary artifacts
    pub binaries: Vec<PathBuf>,
    /// Infrastructure evidence files by category
    pub evidence: Vec<EvidenceGroup>,
}

impl DiscoveryReport {
    pub fn has_build_systems(&self) -> bool {
        !self.ecosystems.is_empty()
    }

    pub fn raw_match_count(&self) -> usize {
        self.ecosystems.iter().map(|e| e.matches.len()).sum()
    }
}

/// DiscoveryEngine - walks the root once and classifies every file
///
/// Only version control directories are pruned during the walk; each
/// ecosystem then applies its own excluded-directory set, so a directory one
/// ecosystem ignores can still fingerprint another. Files under the output
/// directory never take part.
pub struct DiscoveryEngine<'a, S> {
    scanner: &'a S,
    registry: &'a GeneratorRegistry,
}

impl<'a, S: FileScanner> DiscoveryEngine<'a, S> {
    pub fn new(scanner: &'a S, registry: &'a GeneratorRegistry) -> Self {
        Self { scanner, registry }
    }

    pub fn discover(&self, request: &OrchestrationRequest) -> DiscoveryReport {
        let root = request.root_dir.as_path();
        let mut files = self.scanner.walk(root, VCS_DIRECTORIES);
        files.retain(|file| !file.starts_with(&request.output_dir));

        let ecosystems: Vec<EcosystemMatches> = self
            .registry
            .discoverable()
            .into_iter()
            .filter(|generator| !request.is_skipped(generator.name()))
            .filter_map(|generator| {
                let matches: Vec<BuildFileMatch> = FileClassifier::matching(
                    root,
                    &files,
                    &generator.compiled_patterns(),
                    generator.excluded_directories(),
                )
                .into_iter()
                .map(|path| BuildFileMatch::new(path, generator.name()))
                .collect();

                tracing::debug!(
                    ecosystem = generator.name(),
                    matches = matches.len(),
                    "Classified build files"
                );
                (!matches.is_empty()).then_some(EcosystemMatches {
                    generator,
                    matches,
                })
            })
            .collect();

        if !ecosystems.is_empty() {
            return DiscoveryReport {
                ecosystems,
                ..DiscoveryReport::default()
            };
        }

        let binaries = self
            .registry
            .binary()
            .filter(|generator| !request.is_skipped(generator.name()))
            .map(|generator| {
                FileClassifier::matching(
                    root,
                    &files,
                    &generator.compiled_patterns(),
                    generator.excluded_directories(),
                )
            })
            .unwrap_or_default();

        let evidence = EvidenceVocabulary::classify(root, &files);
        tracing::debug!(
            binaries = binaries.len(),
            evidence_categories = evidence.len(),
            "No build system descriptors found"
        );

        DiscoveryReport {
            ecosystems,
            binaries,
            evidence,
        }
    }
}
