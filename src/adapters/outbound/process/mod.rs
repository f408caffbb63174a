/// Process adapters for running external tools
mod shell_command_runner;

pub use shell_command_runner::ShellCommandRunner;
