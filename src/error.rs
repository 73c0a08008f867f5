//! Error types for card classification and rule tables.
//!
//! Classification never panics on malformed input: every failure is a
//! [`ClassifyError`] value that callers can report or re-prompt on.

use std::fmt;

/// Reasons a card number could not be classified as valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    /// No usable input: absent, empty, or only whitespace and hyphens.
    MissingInput,

    /// The normalized candidate still contains non-digit content.
    InvalidCharacters {
        /// Character index in the raw input (0-indexed).
        position: usize,
        /// The offending character.
        character: char,
    },

    /// The card number has too few digits.
    TooShort {
        /// The actual number of digits provided.
        length: usize,
        /// The minimum accepted digit count.
        minimum: usize,
    },

    /// The card number has too many digits.
    TooLong {
        /// The actual number of digits provided.
        length: usize,
        /// The maximum accepted digit count.
        maximum: usize,
    },

    /// No brand rule matched the digits.
    UnknownBrand,

    /// The Luhn checksum failed.
    ///
    /// `brand` carries the matched brand when matching ran before the
    /// checksum, and is `None` when the checksum gated brand lookup.
    ChecksumFailed {
        /// Brand matched before the checksum was verified, if any.
        brand: Option<String>,
    },
}

impl ClassifyError {
    /// Stable snake_case code for this failure category.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MissingInput => "missing_input",
            Self::InvalidCharacters { .. } => "invalid_characters",
            Self::TooShort { .. } => "too_short",
            Self::TooLong { .. } => "too_long",
            Self::UnknownBrand => "unknown_brand",
            Self::ChecksumFailed { .. } => "checksum_failed",
        }
    }

    /// Brand attached to the failure, only set for a match-first checksum failure.
    pub fn brand(&self) -> Option<&str> {
        match self {
            Self::ChecksumFailed { brand } => brand.as_deref(),
            _ => None,
        }
    }
}

impl fmt::Display for ClassifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingInput => write!(f, "no card number provided"),
            Self::InvalidCharacters { .. } => write!(f, "contains invalid characters"),
            Self::TooShort { length, minimum } => {
                write!(
                    f,
                    "card number too short: got {} digits, minimum is {}",
                    length, minimum
                )
            }
            Self::TooLong { length, maximum } => {
                write!(
                    f,
                    "card number too long: got {} digits, maximum is {}",
                    length, maximum
                )
            }
            Self::UnknownBrand => write!(f, "brand not identified"),
            Self::ChecksumFailed { brand: Some(_) } => {
                write!(f, "matched brand but failed checksum")
            }
            Self::ChecksumFailed { brand: None } => write!(f, "invalid card number"),
        }
    }
}

impl std::error::Error for ClassifyError {}

/// Errors raised while building or loading a brand rule table.
#[derive(Debug)]
pub enum RuleError {
    /// A rule's pattern failed to compile.
    InvalidPattern {
        /// Brand name of the offending rule.
        name: String,
        /// Compiler message from the regex engine.
        message: String,
    },
    /// Two rules share the same brand name.
    DuplicateBrand(String),
    /// A rule was given an empty brand name.
    EmptyName,
    /// Failed to read a rule table file.
    Io(std::io::Error),
    /// Failed to parse a rule table document.
    Parse(String),
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPattern { name, message } => {
                write!(f, "invalid pattern for brand '{}': {}", name, message)
            }
            Self::DuplicateBrand(name) => write!(f, "duplicate brand rule: {}", name),
            Self::EmptyName => write!(f, "brand rule name must not be empty"),
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::Parse(s) => write!(f, "Parse error: {}", s),
        }
    }
}

impl std::error::Error for RuleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RuleError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(ClassifyError::MissingInput.to_string(), "no card number provided");

        assert_eq!(
            ClassifyError::InvalidCharacters {
                position: 0,
                character: 'a'
            }
            .to_string(),
            "contains invalid characters"
        );

        assert_eq!(
            ClassifyError::TooShort {
                length: 12,
                minimum: 13
            }
            .to_string(),
            "card number too short: got 12 digits, minimum is 13"
        );

        assert_eq!(ClassifyError::UnknownBrand.to_string(), "brand not identified");

        assert_eq!(
            ClassifyError::ChecksumFailed {
                brand: Some("Visa".to_string())
            }
            .to_string(),
            "matched brand but failed checksum"
        );
        assert_eq!(
            ClassifyError::ChecksumFailed { brand: None }.to_string(),
            "invalid card number"
        );
    }

    #[test]
    fn test_error_kind_and_brand() {
        assert_eq!(ClassifyError::MissingInput.kind(), "missing_input");
        assert_eq!(
            ClassifyError::TooLong {
                length: 20,
                maximum: 19
            }
            .kind(),
            "too_long"
        );

        let err = ClassifyError::ChecksumFailed {
            brand: Some("JCB".to_string()),
        };
        assert_eq!(err.kind(), "checksum_failed");
        assert_eq!(err.brand(), Some("JCB"));
        assert_eq!(ClassifyError::UnknownBrand.brand(), None);
    }

    #[test]
    fn test_rule_error_display_and_source() {
        use std::error::Error;

        let err = RuleError::InvalidPattern {
            name: "Visa".to_string(),
            message: "unclosed group".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid pattern for brand 'Visa': unclosed group"
        );
        assert!(err.source().is_none());

        let io = RuleError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(io.source().is_some());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ClassifyError>();
        assert_send_sync::<RuleError>();
    }
}
