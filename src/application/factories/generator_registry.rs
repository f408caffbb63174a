use crate::adapters::outbound::generators::{
    BinaryGenerator, CondaGenerator, DotnetGenerator, GoGenerator, GradleGenerator,
    MavenGenerator, NpmGenerator, PhpGenerator, PipenvGenerator, PnpmGenerator, PoetryGenerator,
    PythonGenerator, RubyGenerator, RustGenerator, UvGenerator, YarnGenerator,
};
use crate::ports::outbound::EcosystemGenerator;
use crate::shared::error::SbomError;
use std::sync::Arc;

/// Registry of ecosystem generators
///
/// Append-only and queried by exact ecosystem name. Registration order is
/// the order in which detected ecosystems are planned and run.
#[derive(Clone, Default)]
pub struct GeneratorRegistry {
    generators: Vec<Arc<dyn EcosystemGenerator>>,
}

impl GeneratorRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in generator
    ///
    /// # Examples
    /// ```
    /// use env_sbom::application::factories::GeneratorRegistry;
    ///
    /// let registry = GeneratorRegistry::with_defaults();
    /// assert!(registry.get("Maven").is_some());
    /// assert!(registry.get("maven").is_none());
    /// ```
    pub fn with_defaults() -> Self {
        let defaults: Vec<Arc<dyn EcosystemGenerator>> = vec![
            Arc::new(MavenGenerator),
            Arc::new(GradleGenerator),
            Arc::new(NpmGenerator),
            Arc::new(YarnGenerator),
            Arc::new(PnpmGenerator),
            Arc::new(PipenvGenerator),
            Arc::new(PoetryGenerator),
            Arc::new(UvGenerator),
            Arc::new(CondaGenerator),
            Arc::new(PythonGenerator),
            Arc::new(GoGenerator),
            Arc::new(DotnetGenerator),
            Arc::new(RustGenerator),
            Arc::new(PhpGenerator),
            Arc::new(RubyGenerator),
            Arc::new(BinaryGenerator),
        ];
        Self {
            generators: defaults,
        }
    }

    /// Appends a generator
    ///
    /// # Errors
    /// Returns a validation error if a generator with the same name is
    /// already registered; existing entries are never replaced.
    pub fn register(
        &mut self,
        generator: Arc<dyn EcosystemGenerator>,
    ) -> std::result::Result<(), SbomError> {
        if self.get(generator.name()).is_some() {
            return Err(SbomError::Validation {
                message: format!("Generator '{}' is already registered", generator.name()),
            });
        }
        self.generators.push(generator);
        Ok(())
    }

    /// Looks up a generator by exact ecosystem name
    pub fn get(&self, name: &str) -> Option<Arc<dyn EcosystemGenerator>> {
        self.generators
            .iter()
            .find(|g| g.name() == name)
            .cloned()
    }

    /// Generators taking part in descriptor discovery, in registration order
    pub fn discoverable(&self) -> Vec<Arc<dyn EcosystemGenerator>> {
        self.generators
            .iter()
            .filter(|g| g.is_discoverable())
            .cloned()
            .collect()
    }

    /// The generator used for loose binaries and sbom-only runs
    pub fn binary(&self) -> Option<Arc<dyn EcosystemGenerator>> {
        self.generators
            .iter()
            .find(|g| !g.is_discoverable())
            .cloned()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.generators.iter().map(|g| g.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    /// One `  - <name> (<patterns>)` line per registered ecosystem
    pub fn supported_summary(&self) -> String {
        self.generators
            .iter()
            .map(|g| {
                if g.is_discoverable() {
                    format!("  - {} ({})", g.name(), g.file_patterns().join(", "))
                } else {
                    format!("  - {} (scanned with Syft)", g.name())
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
