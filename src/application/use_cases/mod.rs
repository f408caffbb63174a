/// Use cases module containing application business logic orchestration
mod discover_build_systems;
mod execute_generation;
mod generate_sboms;
mod merge_sboms;
mod resolve_instances;
mod resolve_tools;

#[cfg(test)]
pub(crate) mod test_doubles;

pub use discover_build_systems::{DiscoveryEngine, DiscoveryReport, EcosystemMatches};
pub use execute_generation::{ExecutionEngine, ScanCache};
pub use generate_sboms::GenerateSbomsUseCase;
pub use merge_sboms::MergeSbomsUseCase;
pub use resolve_instances::InstanceResolver;
pub use resolve_tools::ToolResolver;
