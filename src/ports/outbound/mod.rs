/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the orchestration core uses
/// to interact with external systems (file system, processes, console,
/// ecosystem tooling).
pub mod artifact_reader;
pub mod command_runner;
pub mod ecosystem_generator;
pub mod file_scanner;
pub mod output_writer;
pub mod progress_reporter;
pub mod sbom_formatter;

pub use artifact_reader::ArtifactReader;
pub use command_runner::{CommandOutput, CommandRunner, OutputMode};
pub use ecosystem_generator::{default_error_message, directory_name, EcosystemGenerator};
pub use file_scanner::FileScanner;
pub use output_writer::OutputWriter;
pub use progress_reporter::ProgressReporter;
pub use sbom_formatter::SbomFormatter;
