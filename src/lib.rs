//! env-sbom - polyglot SBOM orchestrator
//!
//! This library walks a project tree, detects every supported build
//! ecosystem (Maven, Gradle, npm, Yarn, pnpm, Python flavours, Go, .NET,
//! Rust, PHP, Ruby and loose binaries), collapses nested modules into one
//! build instance per module tree and drives each ecosystem's CycloneDX
//! generator. It follows hexagonal architecture and Domain-Driven Design
//! principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`sbom_generation`): Pattern matching, module and branch resolution, naming policies
//! - **Application Layer** (`application`): Use cases, DTOs, read models and the generator registry
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use env_sbom::prelude::*;
//!
//! # async fn run() -> Result<()> {
//! // Create use case with injected adapters
//! let use_case = GenerateSbomsUseCase::new(
//!     GeneratorRegistry::with_defaults(),
//!     WalkDirScanner::new(),
//!     ShellCommandRunner::new(),
//!     FileSystemWriter::new(),
//!     FileSystemReader::new(),
//!     StderrProgressReporter::new(),
//!     Box::new(CycloneDxFormatter::new()),
//! );
//!
//! // Execute
//! let request = OrchestrationRequest::builder()
//!     .root_dir(".")
//!     .output_dir("generated-sboms")
//!     .merge(true)
//!     .build()?;
//! let response = use_case.execute(request).await?;
//! println!("{} of {} succeeded", response.successful_count(), response.results.len());
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod logging;
pub mod ports;
pub mod sbom_generation;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, WalkDirScanner,
    };
    pub use crate::adapters::outbound::formatters::CycloneDxFormatter;
    pub use crate::adapters::outbound::process::ShellCommandRunner;
    pub use crate::application::dto::{
        OrchestrationRequest, OrchestrationResponse, PlannedInstance, RunOutcome,
    };
    pub use crate::application::factories::GeneratorRegistry;
    pub use crate::application::use_cases::{GenerateSbomsUseCase, MergeSbomsUseCase};
    pub use crate::ports::outbound::{
        ArtifactReader, CommandOutput, CommandRunner, EcosystemGenerator, FileScanner,
        OutputMode, OutputWriter, ProgressReporter, SbomFormatter,
    };
    pub use crate::sbom_generation::domain::{
        BuildSystemInstance, GenerationOutcome, GenerationResult, GenerationStrategy,
        OutputArtifact, SbomMetadata,
    };
    pub use crate::shared::error::{ExitCode, SbomError};
    pub use crate::shared::Result;
}
