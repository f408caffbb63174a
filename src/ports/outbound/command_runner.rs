use crate::shared::Result;
use async_trait::async_trait;
use std::path::Path;

/// Whether a child process' output is echoed while it is captured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Stream stdout/stderr to this process' own stdout/stderr in real time
    Echo,
    /// Capture only
    Quiet,
}

/// Captured result of a finished child process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code; `-1` when the process was terminated by a signal
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// CommandRunner port for running shell commands
///
/// This port abstracts subprocess execution so orchestration can be tested
/// without spawning real package managers. Commands are complete shell
/// command lines run through the platform shell.
///
/// # Async Support
/// Implementations must be `Send + Sync`; callers await one command at a time.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs a command to completion in `working_dir`
    ///
    /// # Errors
    /// Returns an error if the process cannot be spawned or its output
    /// cannot be read. A nonzero exit code is not an error.
    async fn run(&self, command: &str, working_dir: &Path, mode: OutputMode)
        -> Result<CommandOutput>;

    /// Checks availability of a tool: true when the command exits with code zero
    ///
    /// Spawn failures count as "not available".
    async fn check(&self, command: &str, working_dir: &Path) -> bool {
        matches!(
            self.run(command, working_dir, OutputMode::Quiet).await,
            Ok(output) if output.success()
        )
    }

    /// Human-readable form of how a command is launched
    fn describe(&self, command: &str) -> String {
        if cfg!(windows) {
            format!("cmd.exe /c {}", command)
        } else {
            format!("sh -c {}", command)
        }
    }
}
