use crate::shared::error::SbomError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum file size for security (100 MB)
/// This prevents DoS attacks via excessively large files
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Punctuation accepted in pass-through build tool arguments, besides
/// ASCII letters, digits and the space character.
const ADDITIONAL_ARGS_PUNCTUATION: &[char] = &['-', '_', '.', '/', '=', ':', '+', ',', '@', '\\'];

/// Validates that a path exists and is a regular file (not a directory or symlink)
///
/// # Arguments
/// * `path` - The path to validate
/// * `file_description` - Description of the file (e.g., "pom.xml", "package.json")
///
/// # Errors
/// Returns an error if:
/// - The path doesn't exist
/// - The path is a symbolic link
/// - The path is not a regular file
pub fn validate_regular_file(path: &Path, file_description: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {} metadata: {}", file_description, e))?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, symbolic links are not allowed.",
            path.display()
        );
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    validate_file_size(metadata.len(), path, MAX_FILE_SIZE)
}

/// Validates file size is within acceptable limits
///
/// # Arguments
/// * `file_size` - The size of the file in bytes
/// * `path` - The path to the file (for error messages)
/// * `max_size` - Maximum allowed size in bytes
///
/// # Errors
/// Returns an error if the file size exceeds the maximum
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            file_size,
            max_size
        );
    }
    Ok(())
}

/// Validates the free-form arguments forwarded to every ecosystem command
///
/// The arguments end up inside a `sh -c` / `cmd.exe /c` command line, so
/// anything that could start a new shell word with special meaning
/// (`;`, `|`, `&`, `$`, quotes, redirections, globs, ...) is rejected.
///
/// # Returns
/// The trimmed argument string (empty when the input is blank)
///
/// # Errors
/// Returns `SbomError::InvalidAdditionalArgs` if any character is outside the allow-list
pub fn validate_additional_args(args: &str) -> std::result::Result<String, SbomError> {
    let trimmed = args.trim();
    let valid = trimmed.chars().all(|c| {
        c.is_ascii_alphanumeric() || c == ' ' || ADDITIONAL_ARGS_PUNCTUATION.contains(&c)
    });

    if !valid {
        return Err(SbomError::InvalidAdditionalArgs {
            args: trimmed.to_string(),
        });
    }

    Ok(trimmed.to_string())
}
