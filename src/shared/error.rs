use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between a run where every
/// build system produced an SBOM, a run with partial failures, and a run
/// that could not start at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - every planned generation succeeded (or dry run / evidence-only)
    Success = 0,
    /// At least one build system failed to produce an SBOM
    GenerationFailed = 1,
    /// Invalid command-line arguments (clap parsing errors, rejected additional args)
    InvalidArguments = 2,
    /// Run-fatal application error (output directory, no build system detected, ...)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::GenerationFailed => write!(f, "Generation Failed (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for SBOM orchestration.
///
/// Uses thiserror to derive Display and Error traits automatically,
/// reducing boilerplate while maintaining user-friendly error messages.
#[derive(Debug, Error)]
pub enum SbomError {
    #[error("Invalid project path: {path}\nReason: {reason}\n\n💡 Hint: Please specify a valid project directory")]
    InvalidProjectPath { path: PathBuf, reason: String },

    #[error("Failed to create output directory: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the parent directory exists and you have write permissions")]
    OutputDirectoryError { path: PathBuf, details: String },

    #[error("Additional args contain unsupported characters: {args}\n\n💡 Hint: Allowed: letters, digits, space, and - _ . / = : + , @ \\")]
    InvalidAdditionalArgs { args: String },

    #[error("No supported build system detected in: {path}\n\n💡 Hint: Supported build systems:\n{supported}")]
    NoBuildSystemDetected { path: PathBuf, supported: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },

    /// Validation error for builder patterns
    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl SbomError {
    /// Maps an error to the exit code the CLI should terminate with
    pub fn exit_code(&self) -> ExitCode {
        match self {
            SbomError::InvalidAdditionalArgs { .. } => ExitCode::InvalidArguments,
            _ => ExitCode::ApplicationError,
        }
    }
}
