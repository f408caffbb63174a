use async_trait::async_trait;
use env_sbom::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Minimal CycloneDX document written by successful mock generations
pub const MOCK_SBOM: &str = r#"{"bomFormat":"CycloneDX","specVersion":"1.6","components":[{"type":"library","name":"mock-lib","version":"1.0.0"}]}"#;

#[derive(Clone)]
struct Rule {
    pattern: String,
    exit_code: i32,
    stderr: String,
    writes: Option<PathBuf>,
}

/// Mock CommandRunner for testing that records every command
///
/// Commands succeed with exit code 0 unless a rule whose pattern is a
/// substring of the command says otherwise. The first matching rule wins.
#[derive(Default, Clone)]
pub struct MockCommandRunner {
    rules: Vec<Rule>,
    pub commands: Arc<Mutex<Vec<(String, PathBuf)>>>,
}

impl MockCommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands containing `pattern` exit with `exit_code`
    pub fn failing(mut self, pattern: &str, exit_code: i32, stderr: &str) -> Self {
        self.rules.push(Rule {
            pattern: pattern.to_string(),
            exit_code,
            stderr: stderr.to_string(),
            writes: None,
        });
        self
    }

    /// Commands containing `pattern` succeed and write a mock SBOM to `sbom`
    pub fn producing(mut self, pattern: &str, sbom: impl Into<PathBuf>) -> Self {
        self.rules.push(Rule {
            pattern: pattern.to_string(),
            exit_code: 0,
            stderr: String::new(),
            writes: Some(sbom.into()),
        });
        self
    }

    pub fn get_commands(&self) -> Vec<String> {
        self.commands
            .lock()
            .unwrap()
            .iter()
            .map(|(command, _)| command.clone())
            .collect()
    }

    pub fn working_dirs(&self) -> Vec<PathBuf> {
        self.commands
            .lock()
            .unwrap()
            .iter()
            .map(|(_, dir)| dir.clone())
            .collect()
    }

    pub fn count_matching(&self, pattern: &str) -> usize {
        self.get_commands()
            .iter()
            .filter(|c| c.contains(pattern))
            .count()
    }
}

#[async_trait]
impl CommandRunner for MockCommandRunner {
    async fn run(&self, command: &str, working_dir: &Path, _mode: OutputMode) -> Result<CommandOutput> {
        self.commands
            .lock()
            .unwrap()
            .push((command.to_string(), working_dir.to_path_buf()));

        let Some(rule) = self.rules.iter().find(|r| command.contains(&r.pattern)) else {
            return Ok(CommandOutput::default());
        };

        if let Some(path) = &rule.writes {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, MOCK_SBOM)?;
        }

        Ok(CommandOutput {
            exit_code: rule.exit_code,
            stdout: String::new(),
            stderr: rule.stderr.clone(),
        })
    }
}
