/// Maximum length of a project name used in artifact file names
const MAX_PROJECT_NAME_LENGTH: usize = 128;

/// Turns a declared project name into a file-name-safe token
///
/// Scoped or path-like names (`@scope/pkg`, `github.com/org/mod`) keep their
/// last segment; characters outside `[A-Za-z0-9._-]` become `-`.
/// Returns `None` when nothing usable is left.
pub fn sanitize_project_name(raw: &str) -> Option<String> {
    let last_segment = raw
        .trim()
        .rsplit(|c: char| c == '/' || c == '\\')
        .find(|s| !s.trim().is_empty())?
        .trim();

    let sanitized: String = last_segment
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '-'
            }
        })
        .collect();

    let sanitized = sanitized.trim_matches(|c| c == '-' || c == '.');
    if sanitized.is_empty() {
        return None;
    }

    Some(sanitized.chars().take(MAX_PROJECT_NAME_LENGTH).collect())
}

/// Placeholder name used when a build file declares no usable name
pub fn fallback_project_name(ecosystem: &str) -> String {
    format!("{}-project", ecosystem_slug(ecosystem))
}

/// Lowercase, space-free form of an ecosystem name (`Standalone Binaries` → `standalone-binaries`)
pub fn ecosystem_slug(ecosystem: &str) -> String {
    ecosystem
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}
