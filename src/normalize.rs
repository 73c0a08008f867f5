//! Input normalization.
//!
//! Raw card numbers arrive with spaces, hyphens and whatever else a user
//! typed. Normalization reduces them to a [`NormalizedNumber`], a string
//! that is guaranteed to hold only ASCII digits. Brand rules are only ever
//! matched against a `NormalizedNumber`.

use crate::error::ClassifyError;
use std::fmt;

/// How raw input is reduced to digits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Normalization {
    /// Strip whitespace and hyphens only. Any other non-digit is rejected.
    #[default]
    Separators,
    /// Strip every character that is not an ASCII digit.
    DigitsOnly,
}

/// A card number reduced to ASCII digits.
///
/// Always non-empty. Length bounds are not enforced here; see
/// [`crate::classifier::LengthBounds`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedNumber(String);

impl NormalizedNumber {
    /// Returns the digits as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of digits.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a number produced by [`normalize`].
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Digit values (0-9) in order, as consumed by [`crate::luhn`].
    pub fn digits(&self) -> Vec<u8> {
        self.0.bytes().map(|b| b - b'0').collect()
    }

    /// Consumes the number and returns the inner string.
    #[inline]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for NormalizedNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for NormalizedNumber {
    type Error = ClassifyError;

    /// Normalizes with [`Normalization::Separators`].
    fn try_from(raw: &str) -> Result<Self, Self::Error> {
        normalize(raw, Normalization::Separators)
    }
}

#[inline]
fn is_separator(c: char) -> bool {
    c == '-' || c.is_whitespace()
}

/// Normalizes raw input into a digit-only string.
///
/// Fails with [`ClassifyError::MissingInput`] when no digits remain after
/// stripping, and with [`ClassifyError::InvalidCharacters`] when
/// [`Normalization::Separators`] meets anything other than a digit or
/// separator. [`Normalization::DigitsOnly`] never reports invalid
/// characters: `"abc"` is missing input, `"abc1"` is one digit.
///
/// # Example
///
/// ```
/// use card_classifier::normalize::{normalize, Normalization};
///
/// let n = normalize("4111 1111-1111 1111", Normalization::Separators).unwrap();
/// assert_eq!(n.as_str(), "4111111111111111");
///
/// assert!(normalize("4111x1111", Normalization::Separators).is_err());
/// assert_eq!(
///     normalize("(4111) 1111.1111/1111", Normalization::DigitsOnly).unwrap().as_str(),
///     "4111111111111111"
/// );
/// ```
pub fn normalize(raw: &str, mode: Normalization) -> Result<NormalizedNumber, ClassifyError> {
    let mut candidate = String::with_capacity(raw.len());
    let mut first_invalid: Option<(usize, char)> = None;

    for (position, c) in raw.chars().enumerate() {
        if c.is_ascii_digit() {
            candidate.push(c);
        } else if is_separator(c) {
            // stripped in both modes
        } else if first_invalid.is_none() {
            first_invalid = Some((position, c));
        }
    }

    match (mode, first_invalid) {
        (Normalization::Separators, Some((position, character))) => {
            Err(ClassifyError::InvalidCharacters {
                position,
                character,
            })
        }
        _ if candidate.is_empty() => Err(ClassifyError::MissingInput),
        _ => Ok(NormalizedNumber(candidate)),
    }
}
