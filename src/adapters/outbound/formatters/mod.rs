/// Formatter adapters for documents written by the orchestrator
mod cyclonedx_formatter;

pub use cyclonedx_formatter::CycloneDxFormatter;
