//! Test doubles shared by the use case tests

use crate::ports::outbound::{CommandOutput, CommandRunner, OutputMode, ProgressReporter};
use crate::shared::Result;
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Minimal CycloneDX document written by scripted generation commands
pub const FAKE_SBOM: &str = r#"{"bomFormat":"CycloneDX","specVersion":"1.6","components":[{"type":"library","name":"dep"}]}"#;

/// Scripted response of a command
#[derive(Debug, Clone, Default)]
pub struct Scripted {
    pub exit_code: i32,
    pub stderr: String,
    pub writes: Option<PathBuf>,
    pub spawn_error: bool,
}

impl Scripted {
    pub fn exit(exit_code: i32) -> Self {
        Self {
            exit_code,
            ..Self::default()
        }
    }

    pub fn spawn_failure() -> Self {
        Self {
            spawn_error: true,
            ..Self::default()
        }
    }

    pub fn with_stderr(mut self, stderr: &str) -> Self {
        self.stderr = stderr.to_string();
        self
    }

    pub fn writing(mut self, path: PathBuf) -> Self {
        self.writes = Some(path);
        self
    }
}

/// CommandRunner answering from a list of substring rules
///
/// The first rule whose pattern occurs in the command applies; commands
/// without a rule exit with 0. Every call is recorded.
#[derive(Default)]
pub struct ScriptedRunner {
    rules: Vec<(String, Scripted)>,
    calls: Mutex<Vec<(String, PathBuf, OutputMode)>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, pattern: &str, response: Scripted) -> Self {
        self.rules.push((pattern.to_string(), response));
        self
    }

    pub fn commands(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(command, _, _)| command.clone())
            .collect()
    }

    pub fn calls(&self) -> Vec<(String, PathBuf, OutputMode)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, pattern: &str) -> usize {
        self.commands()
            .iter()
            .filter(|command| command.contains(pattern))
            .count()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, command: &str, working_dir: &Path, mode: OutputMode) -> Result<CommandOutput> {
        self.calls
            .lock()
            .unwrap()
            .push((command.to_string(), working_dir.to_path_buf(), mode));

        let response = self
            .rules
            .iter()
            .find(|(pattern, _)| command.contains(pattern.as_str()))
            .map(|(_, response)| response.clone())
            .unwrap_or_default();

        if response.spawn_error {
            anyhow::bail!("Failed to start command: {}", command);
        }
        if let Some(path) = &response.writes {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, FAKE_SBOM)?;
        }

        Ok(CommandOutput {
            exit_code: response.exit_code,
            stdout: String::new(),
            stderr: response.stderr,
        })
    }
}

/// ProgressReporter keeping every message
#[derive(Default)]
pub struct RecordingReporter {
    messages: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub fn mentions(&self, fragment: &str) -> bool {
        self.messages().iter().any(|m| m.contains(fragment))
    }

    fn push(&self, message: String) {
        self.messages.lock().unwrap().push(message);
    }
}

impl ProgressReporter for RecordingReporter {
    fn report(&self, message: &str) {
        self.push(message.to_string());
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        self.push(format!("[{}/{}] {}", current, total, message.unwrap_or_default()));
    }

    fn report_error(&self, message: &str) {
        self.push(message.to_string());
    }

    fn report_completion(&self, message: &str) {
        self.push(message.to_string());
    }
}
