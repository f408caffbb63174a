//! Helpers shared by the ecosystem generators: shell quoting and
//! best-effort manifest parsing.

use crate::adapters::outbound::filesystem::FileSystemReader;
use crate::sbom_generation::domain::{AdditionalArgs, ToolRequirement};
use std::path::{Path, PathBuf};

/// SBOM output path inside the output directory
pub(super) fn output_file(output_dir: &Path, project_name: &str) -> PathBuf {
    output_dir.join(format!("{}-bom.json", project_name))
}

/// Syft directory scan writing CycloneDX JSON
pub(super) fn syft_scan_command(scan_dir: &Path, output: &Path, args: &AdditionalArgs) -> String {
    args.append_to(&format!(
        "syft scan dir:{} -o cyclonedx-json={} -q",
        quote(scan_dir),
        quote(output)
    ))
}

pub(super) fn syft_tool() -> ToolRequirement {
    ToolRequirement::new("syft", "syft version")
}

/// `cyclonedx-py` from the cyclonedx-bom distribution
pub(super) fn cyclonedx_py_tool() -> ToolRequirement {
    ToolRequirement::new("cyclonedx-py", "cyclonedx-py --version")
        .with_install_command("python -m pip install cyclonedx-bom")
}

/// Quotes a path as a single shell word
///
/// POSIX shells get single quotes (no expansion inside); `cmd.exe` gets
/// double quotes.
pub(super) fn quote(path: &Path) -> String {
    let raw = path.to_string_lossy();
    if cfg!(windows) {
        format!("\"{}\"", raw)
    } else {
        format!("'{}'", raw.replace('\'', r"'\''"))
    }
}

/// Moves a file, overwriting the destination
pub(super) fn move_command(source: &Path, destination: &Path) -> String {
    if cfg!(windows) {
        format!("move /Y {} {}", quote(source), quote(destination))
    } else {
        format!("mv -f {} {}", quote(source), quote(destination))
    }
}

/// Directory holding a build file (the path itself for directories)
pub(super) fn project_root(build_file: &Path) -> &Path {
    if build_file.is_dir() {
        build_file
    } else {
        build_file.parent().unwrap_or(build_file)
    }
}

/// Reads a manifest through the guarded reader
pub(super) fn read_manifest(path: &Path) -> Option<String> {
    FileSystemReader::new().try_read_manifest(path)
}

/// `name` field of a package.json
pub(super) fn package_json_name(package_json: &Path) -> Option<String> {
    let content = read_manifest(package_json)?;
    let value: serde_json::Value = serde_json::from_str(&content).ok()?;
    non_empty(value.get("name")?.as_str()?)
}

/// Whether a package.json declares workspaces
pub(super) fn package_json_has_workspaces(package_json: &Path) -> bool {
    read_manifest(package_json)
        .and_then(|content| serde_json::from_str::<serde_json::Value>(&content).ok())
        .is_some_and(|value| value.get("workspaces").is_some())
}

/// String value at a dotted table path of a TOML file (e.g. `["package", "name"]`)
pub(super) fn toml_string(toml_file: &Path, keys: &[&str]) -> Option<String> {
    let content = read_manifest(toml_file)?;
    let table: toml::Table = toml::from_str(&content).ok()?;
    let (first, rest) = keys.split_first()?;
    let mut current = table.get(*first)?;
    for key in rest {
        current = current.get(*key)?;
    }
    non_empty(current.as_str()?)
}

pub(super) fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
