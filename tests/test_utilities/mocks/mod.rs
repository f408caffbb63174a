/// Mock implementations for testing
mod mock_command_runner;
mod mock_progress_reporter;

pub use mock_command_runner::{MockCommandRunner, MOCK_SBOM};
pub use mock_progress_reporter::MockProgressReporter;
