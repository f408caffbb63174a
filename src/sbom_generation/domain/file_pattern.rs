use crate::shared::Result;

/// Maximum length of a single file pattern
const MAX_PATTERN_LENGTH: usize = 255;

/// Directory names skipped by every ecosystem (version control metadata)
pub const VCS_DIRECTORIES: &[&str] = &[".git", ".svn", ".hg", ".bzr"];

/// Directory names that never identify a project of their own: dependency
/// caches, virtual environments, build outputs and library dumps.
///
/// Binary branch grouping walks upward past these names so that a binary in
/// `app/dist/lib/x.jar` is attributed to `app`.
pub const EXCLUDED_DIRECTORIES: &[&str] = &[
    ".git",
    ".svn",
    ".hg",
    ".bzr",
    ".idea",
    ".vscode",
    ".m2",
    ".gradle",
    ".mvn",
    ".venv",
    "venv",
    "env",
    "site-packages",
    "__pycache__",
    ".tox",
    "node_modules",
    "bower_components",
    "vendor",
    "target",
    "build",
    "dist",
    "out",
    "bin",
    "obj",
    "lib",
    "libs",
    "deps",
];

/// Returns true when `name` appears in `directories`, ignoring ASCII case
pub fn is_listed_directory(name: &str, directories: &[&str]) -> bool {
    directories.iter().any(|d| d.eq_ignore_ascii_case(name))
}

/// FilePattern - a glob-style file name pattern such as `pom.xml`,
/// `*.csproj` or `*.tar.gz`
///
/// Supports `*` matching zero or more characters. Literal patterns match
/// the file name exactly; wildcard patterns ignore ASCII case so that
/// `*.jar` also finds `LIB.JAR` produced on case-insensitive filesystems.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePattern {
    original: String,
    matcher: PatternMatcher,
}

/// Pattern matcher types for efficient matching
#[derive(Debug, Clone, PartialEq, Eq)]
enum PatternMatcher {
    /// Exact match: "pom.xml"
    Exact(String),
    /// Leading wildcard: "*.tar.gz"
    Extension(String),
    /// Trailing wildcard: "Dockerfile*"
    Prefix(String),
    /// Surrounding wildcards: "*compose*"
    Contains(String),
    /// Multiple wildcards: "docker-*.y*ml"
    Multiple {
        parts: Vec<String>,
        anchored_start: bool,
        anchored_end: bool,
    },
}

impl FilePattern {
    /// Compiles a pattern string
    ///
    /// # Errors
    /// - Empty pattern or pattern made only of wildcards
    /// - Pattern longer than 255 characters
    /// - Pattern containing a path separator
    pub fn new(pattern: &str) -> Result<Self> {
        validate_pattern(pattern)?;
        Ok(Self {
            original: pattern.to_string(),
            matcher: compile_pattern(pattern),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.original
    }

    /// Checks whether a bare file name matches this pattern
    pub fn matches(&self, file_name: &str) -> bool {
        match &self.matcher {
            PatternMatcher::Exact(s) => file_name == s,
            PatternMatcher::Extension(suffix) => {
                let lower = file_name.to_ascii_lowercase();
                lower.len() > suffix.len() && lower.ends_with(suffix.as_str())
            }
            PatternMatcher::Prefix(prefix) => {
                file_name.to_ascii_lowercase().starts_with(prefix.as_str())
            }
            PatternMatcher::Contains(middle) => {
                file_name.to_ascii_lowercase().contains(middle.as_str())
            }
            PatternMatcher::Multiple {
                parts,
                anchored_start,
                anchored_end,
            } => match_parts(
                &file_name.to_ascii_lowercase(),
                parts,
                *anchored_start,
                *anchored_end,
            ),
        }
    }
}

impl std::fmt::Display for FilePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.original)
    }
}

fn match_parts(name: &str, parts: &[String], anchored_start: bool, anchored_end: bool) -> bool {
    let mut current_pos = 0;
    let last = parts.len().saturating_sub(1);

    for (i, part) in parts.iter().enumerate() {
        if i == 0 && anchored_start {
            if !name.starts_with(part.as_str()) {
                return false;
            }
            current_pos = part.len();
            continue;
        }
        if i == last && anchored_end {
            return name.len() >= current_pos + part.len() && name.ends_with(part.as_str());
        }
        match name[current_pos..].find(part.as_str()) {
            Some(pos) => current_pos += pos + part.len(),
            None => return false,
        }
    }
    true
}

fn validate_pattern(pattern: &str) -> Result<()> {
    if pattern.is_empty() {
        anyhow::bail!("File pattern cannot be empty");
    }

    if pattern.len() > MAX_PATTERN_LENGTH {
        anyhow::bail!(
            "File pattern '{}' is too long ({} characters, maximum: {})",
            pattern,
            pattern.len(),
            MAX_PATTERN_LENGTH
        );
    }

    if pattern.contains('/') || pattern.contains('\\') {
        anyhow::bail!(
            "File pattern '{}' must be a file name, not a path",
            pattern
        );
    }

    if pattern.chars().all(|c| c == '*') {
        anyhow::bail!(
            "File pattern '{}' must contain at least one non-wildcard character",
            pattern
        );
    }

    Ok(())
}

fn compile_pattern(pattern: &str) -> PatternMatcher {
    let wildcard_count = pattern.matches('*').count();

    if wildcard_count == 0 {
        return PatternMatcher::Exact(pattern.to_string());
    }

    let lower = pattern.to_ascii_lowercase();
    let starts = lower.starts_with('*');
    let ends = lower.ends_with('*');

    if wildcard_count == 1 && starts {
        return PatternMatcher::Extension(lower[1..].to_string());
    }
    if wildcard_count == 1 && ends {
        return PatternMatcher::Prefix(lower[..lower.len() - 1].to_string());
    }
    if wildcard_count == 2 && starts && ends {
        return PatternMatcher::Contains(lower[1..lower.len() - 1].to_string());
    }

    PatternMatcher::Multiple {
        parts: lower
            .split('*')
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .collect(),
        anchored_start: !starts,
        anchored_end: !ends,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_pattern_is_case_sensitive() {
        let pattern = FilePattern::new("pom.xml").unwrap();
        assert!(pattern.matches("pom.xml"));
        assert!(!pattern.matches("POM.xml"));
        assert!(!pattern.matches("parent-pom.xml"));
    }

    #[test]
    fn test_extension_pattern() {
        let pattern = FilePattern::new("*.csproj").unwrap();
        assert!(pattern.matches("App.csproj"));
        assert!(pattern.matches("APP.CSPROJ"));
        assert!(!pattern.matches("App.csproj.user"));
        assert!(!pattern.matches(".csproj"));
    }

    #[test]
    fn test_multi_level_extension() {
        let pattern = FilePattern::new("*.tar.gz").unwrap();
        assert!(pattern.matches("release-1.0.tar.gz"));
        assert!(!pattern.matches("release.gz"));
        assert!(!pattern.matches("release.tar"));
    }

    #[test]
    fn test_prefix_and_contains_patterns() {
        let prefix = FilePattern::new("Dockerfile*").unwrap();
        assert!(prefix.matches("Dockerfile"));
        assert!(prefix.matches("Dockerfile.prod"));
        assert!(!prefix.matches("app.Dockerfile"));

        let contains = FilePattern::new("*compose*").unwrap();
        assert!(contains.matches("docker-compose.yml"));
        assert!(!contains.matches("Dockerfile"));
    }

    #[test]
    fn test_multiple_wildcards_are_anchored() {
        let pattern = FilePattern::new("docker-*.y*ml").unwrap();
        assert!(pattern.matches("docker-compose.yml"));
        assert!(pattern.matches("docker-compose.yaml"));
        assert!(!pattern.matches("my-docker-compose.yml"));
        assert!(!pattern.matches("docker-compose.yml.bak"));
    }

    #[test]
    fn test_invalid_patterns() {
        assert!(FilePattern::new("").is_err());
        assert!(FilePattern::new("**").is_err());
        assert!(FilePattern::new("dir/pom.xml").is_err());
        assert!(FilePattern::new(&"a".repeat(MAX_PATTERN_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_is_listed_directory_ignores_case() {
        assert!(is_listed_directory("node_modules", EXCLUDED_DIRECTORIES));
        assert!(is_listed_directory("Target", EXCLUDED_DIRECTORIES));
        assert!(!is_listed_directory("src", EXCLUDED_DIRECTORIES));
        assert!(is_listed_directory(".git", VCS_DIRECTORIES));
    }
}
