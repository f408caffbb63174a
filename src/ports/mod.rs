/// Ports module defining interfaces for hexagonal architecture
///
/// The orchestration core is driven directly by the CLI, so only outbound
/// ports (driven ports - infrastructure interfaces) exist.
pub mod outbound;
