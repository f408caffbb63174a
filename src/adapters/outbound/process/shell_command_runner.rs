use crate::ports::outbound::{CommandOutput, CommandRunner, OutputMode};
use crate::shared::Result;
use anyhow::Context;
use async_trait::async_trait;
use std::io::Write;
use std::path::Path;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

/// Where a drained stream is echoed
#[derive(Debug, Clone, Copy)]
enum EchoTarget {
    Stdout,
    Stderr,
}

/// ShellCommandRunner adapter running commands through the platform shell
///
/// Commands run as `sh -c <command>` (`cmd.exe /c <command>` on Windows).
/// stdout and stderr are drained by two separate tasks so a child filling
/// one pipe never blocks on the other; both tasks are joined before the
/// output is returned.
pub struct ShellCommandRunner;

impl ShellCommandRunner {
    pub fn new() -> Self {
        Self
    }

    fn shell_command(command: &str) -> Command {
        let mut cmd = if cfg!(windows) {
            let mut cmd = Command::new("cmd.exe");
            cmd.arg("/c");
            cmd
        } else {
            let mut cmd = Command::new("sh");
            cmd.arg("-c");
            cmd
        };
        cmd.arg(command);
        cmd
    }
}

impl Default for ShellCommandRunner {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads a stream to its end, line by line, optionally echoing each line
///
/// Lines are split on raw `\n` bytes so invalid UTF-8 never stops the drain;
/// the captured bytes are decoded lossily at the end.
async fn drain<R>(reader: R, echo: Option<EchoTarget>) -> std::io::Result<String>
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut captured = Vec::new();
    let mut line = Vec::new();

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line).await? == 0 {
            break;
        }
        match echo {
            Some(EchoTarget::Stdout) => {
                let mut out = std::io::stdout().lock();
                let _ = out.write_all(&line);
                let _ = out.flush();
            }
            Some(EchoTarget::Stderr) => {
                let mut err = std::io::stderr().lock();
                let _ = err.write_all(&line);
                let _ = err.flush();
            }
            None => {}
        }
        captured.extend_from_slice(&line);
    }

    Ok(String::from_utf8_lossy(&captured).into_owned())
}

#[async_trait]
impl CommandRunner for ShellCommandRunner {
    async fn run(
        &self,
        command: &str,
        working_dir: &Path,
        mode: OutputMode,
    ) -> Result<CommandOutput> {
        tracing::debug!(command, working_dir = %working_dir.display(), ?mode, "Spawning command");

        let mut child = Self::shell_command(command)
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| {
                format!(
                    "Failed to start command in {}: {}",
                    working_dir.display(),
                    command
                )
            })?;

        let stdout = child.stdout.take().context("Child stdout was not captured")?;
        let stderr = child.stderr.take().context("Child stderr was not captured")?;

        let (echo_out, echo_err) = match mode {
            OutputMode::Echo => (Some(EchoTarget::Stdout), Some(EchoTarget::Stderr)),
            OutputMode::Quiet => (None, None),
        };
        let stdout_task = tokio::spawn(drain(stdout, echo_out));
        let stderr_task = tokio::spawn(drain(stderr, echo_err));

        let status = child
            .wait()
            .await
            .with_context(|| format!("Failed to wait for command: {}", command))?;

        let stdout = stdout_task.await.context("stdout reader task failed")??;
        let stderr = stderr_task.await.context("stderr reader task failed")??;

        let exit_code = status.code().unwrap_or(-1);
        tracing::debug!(command, exit_code, "Command finished");

        Ok(CommandOutput {
            exit_code,
            stdout,
            stderr,
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_run_captures_both_streams_and_exit_code() {
        let temp_dir = TempDir::new().unwrap();
        let output = ShellCommandRunner::new()
            .run(
                "echo hello; echo oops 1>&2; exit 3",
                temp_dir.path(),
                OutputMode::Quiet,
            )
            .await
            .unwrap();

        assert_eq!(output.exit_code, 3);
        assert_eq!(output.stdout, "hello\n");
        assert_eq!(output.stderr, "oops\n");
        assert!(!output.success());
    }

    #[tokio::test]
    async fn test_run_uses_working_directory() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("marker.txt"), "").unwrap();

        let output = ShellCommandRunner::new()
            .run("ls", temp_dir.path(), OutputMode::Quiet)
            .await
            .unwrap();

        assert!(output.stdout.contains("marker.txt"));
    }

    #[tokio::test]
    async fn test_large_output_on_both_streams_does_not_deadlock() {
        let temp_dir = TempDir::new().unwrap();
        let script = "i=0; while [ $i -lt 20000 ]; do echo line-$i; echo err-$i 1>&2; i=$((i+1)); done";

        let output = ShellCommandRunner::new()
            .run(script, temp_dir.path(), OutputMode::Quiet)
            .await
            .unwrap();

        assert_eq!(output.exit_code, 0);
        assert_eq!(output.stdout.lines().count(), 20000);
        assert_eq!(output.stderr.lines().count(), 20000);
    }

    #[tokio::test]
    async fn test_output_without_trailing_newline_is_kept() {
        let temp_dir = TempDir::new().unwrap();
        let output = ShellCommandRunner::new()
            .run("printf partial", temp_dir.path(), OutputMode::Quiet)
            .await
            .unwrap();
        assert_eq!(output.stdout, "partial");
    }

    #[tokio::test]
    async fn test_check() {
        let temp_dir = TempDir::new().unwrap();
        let runner = ShellCommandRunner::new();
        assert!(runner.check("true", temp_dir.path()).await);
        assert!(!runner.check("exit 1", temp_dir.path()).await);
        assert!(
            !runner
                .check("definitely-not-a-real-tool-7f3a --version", temp_dir.path())
                .await
        );
    }

    #[tokio::test]
    async fn test_missing_working_directory_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = ShellCommandRunner::new()
            .run("true", &temp_dir.path().join("missing"), OutputMode::Quiet)
            .await;
        assert!(result.is_err());
    }

    #[test]
    fn test_describe() {
        assert_eq!(ShellCommandRunner::new().describe("mvn -v"), "sh -c mvn -v");
    }
}
