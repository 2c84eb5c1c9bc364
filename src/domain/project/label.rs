//! Project label value object

use std::fmt;
use std::str::FromStr;

use crate::domain::error::InvalidInputError;

/// Longest accepted project label
pub const MAX_LABEL_LEN: usize = 64;

/// Caller-supplied grouping key that names the output subdirectory.
///
/// Labels are identifier-safe so they can be joined onto the library root
/// without escaping it: ASCII letters, digits, `-` and `_`, starting with a
/// letter or digit.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProjectLabel(String);

impl ProjectLabel {
    /// Parse and validate a raw label. Surrounding whitespace is ignored.
    pub fn parse(input: &str) -> Result<Self, InvalidInputError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(InvalidInputError::MissingField("project"));
        }

        let invalid = || InvalidInputError::InvalidProjectLabel {
            input: input.to_string(),
        };

        if trimmed.len() > MAX_LABEL_LEN {
            return Err(invalid());
        }

        let mut chars = trimmed.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphanumeric() => {}
            _ => return Err(invalid()),
        }

        if !chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
            return Err(invalid());
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ProjectLabel {
    type Err = InvalidInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ProjectLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProjectLabel {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_simple_label() {
        let label = ProjectLabel::parse("kitabo").unwrap();
        assert_eq!(label.as_str(), "kitabo");
    }

    #[test]
    fn accepts_dashes_and_underscores() {
        assert!(ProjectLabel::parse("new-album_2").is_ok());
    }

    #[test]
    fn trims_whitespace() {
        let label = ProjectLabel::parse("  kitabo \n").unwrap();
        assert_eq!(label.to_string(), "kitabo");
    }

    #[test]
    fn empty_is_missing_field() {
        assert_eq!(
            ProjectLabel::parse("   "),
            Err(InvalidInputError::MissingField("project"))
        );
    }

    #[test]
    fn rejects_path_traversal() {
        assert!(ProjectLabel::parse("..").is_err());
        assert!(ProjectLabel::parse("../etc").is_err());
        assert!(ProjectLabel::parse("a/b").is_err());
        assert!(ProjectLabel::parse("a\\b").is_err());
    }

    #[test]
    fn rejects_leading_punctuation() {
        assert!(ProjectLabel::parse("-kitabo").is_err());
        assert!(ProjectLabel::parse("_kitabo").is_err());
        assert!(ProjectLabel::parse(".hidden").is_err());
    }

    #[test]
    fn rejects_inner_whitespace() {
        assert!(ProjectLabel::parse("my project").is_err());
    }

    #[test]
    fn rejects_overlong_label() {
        let long = "a".repeat(MAX_LABEL_LEN + 1);
        assert!(ProjectLabel::parse(&long).is_err());
        let max = "a".repeat(MAX_LABEL_LEN);
        assert!(ProjectLabel::parse(&max).is_ok());
    }

    #[test]
    fn from_str_parses() {
        let label: ProjectLabel = "demo".parse().unwrap();
        assert_eq!(label.as_ref(), "demo");
    }
}
