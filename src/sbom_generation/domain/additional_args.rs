use crate::shared::error::SbomError;
use crate::shared::security::validate_additional_args;

/// NewType wrapper for pass-through build tool arguments
///
/// The raw string is validated against the character allow-list once, at
/// construction, and kept as a vector of tokens. Generators only ever see
/// the validated tokens, so a rejected string never reaches a subprocess.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdditionalArgs(Vec<String>);

impl AdditionalArgs {
    pub fn parse(raw: &str) -> std::result::Result<Self, SbomError> {
        let validated = validate_additional_args(raw)?;
        Ok(Self(
            validated.split(' ').filter(|t| !t.is_empty()).map(String::from).collect(),
        ))
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn tokens(&self) -> &[String] {
        &self.0
    }

    /// Appends the arguments to a command line, separated by single spaces
    pub fn append_to(&self, command: &str) -> String {
        if self.0.is_empty() {
            command.to_string()
        } else {
            format!("{} {}", command, self.0.join(" "))
        }
    }
}

impl std::fmt::Display for AdditionalArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tokenizes_on_spaces() {
        let args = AdditionalArgs::parse("  -DskipTests   --offline ").unwrap();
        assert_eq!(args.tokens(), &["-DskipTests", "--offline"]);
        assert_eq!(args.to_string(), "-DskipTests --offline");
    }

    #[test]
    fn test_append_to() {
        let args = AdditionalArgs::parse("--quiet").unwrap();
        assert_eq!(args.append_to("mvn package"), "mvn package --quiet");
        assert_eq!(AdditionalArgs::empty().append_to("mvn package"), "mvn package");
    }

    #[test]
    fn test_parse_rejects_semicolon() {
        let err = AdditionalArgs::parse("--x; rm -rf /").unwrap_err();
        assert!(matches!(err, SbomError::InvalidAdditionalArgs { .. }));
    }

    #[test]
    fn test_blank_is_empty() {
        assert!(AdditionalArgs::parse("   ").unwrap().is_empty());
    }
}
