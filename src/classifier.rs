//! Card classification.
//!
//! [`CardClassifier::classify`] runs the full pipeline:
//!
//! 1. Normalization (strip separators, see [`Normalization`])
//! 2. Missing-input and digit-only guards
//! 3. Optional length guard ([`LengthBounds`], 13..=19 by default)
//! 4. Brand matching and Luhn verification, ordered by [`ResultPolicy`]
//! 5. Composition of a [`ClassificationResult`]
//!
//! Classification is a pure function of the input, the injected
//! [`RuleSet`] and the [`ClassifierConfig`]. It never panics.

use crate::error::ClassifyError;
use crate::luhn;
use crate::mask::mask_digits;
use crate::normalize::{normalize, Normalization, NormalizedNumber};
use crate::rules::RuleSet;
use std::fmt;

/// Minimum accepted digit count under the default length guard.
pub const MIN_CARD_DIGITS: usize = 13;

/// Maximum accepted digit count under the default length guard.
pub const MAX_CARD_DIGITS: usize = 19;

/// Order in which brand matching and the checksum are applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ResultPolicy {
    /// Match the brand first. A matched brand is reported even when the
    /// checksum fails (with `valid == false`).
    #[default]
    MatchFirst,
    /// Verify the checksum first. A failing number is reported as
    /// "invalid card number" and brand lookup is skipped.
    ChecksumGated,
}

/// Inclusive digit-count bounds enforced before brand matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "RawLengthBounds"))]
pub struct LengthBounds {
    /// Fewest digits accepted.
    pub min: usize,
    /// Most digits accepted.
    pub max: usize,
}

impl LengthBounds {
    /// Creates bounds, swapping the ends if given in reverse.
    pub const fn new(min: usize, max: usize) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    fn check(&self, length: usize) -> Result<(), ClassifyError> {
        if length < self.min {
            Err(ClassifyError::TooShort {
                length,
                minimum: self.min,
            })
        } else if length > self.max {
            Err(ClassifyError::TooLong {
                length,
                maximum: self.max,
            })
        } else {
            Ok(())
        }
    }
}

/// Deserialized form, ordered through [`LengthBounds::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawLengthBounds {
    min: usize,
    max: usize,
}

#[cfg(feature = "serde")]
impl From<RawLengthBounds> for LengthBounds {
    fn from(raw: RawLengthBounds) -> Self {
        Self::new(raw.min, raw.max)
    }
}

impl Default for LengthBounds {
    fn default() -> Self {
        Self::new(MIN_CARD_DIGITS, MAX_CARD_DIGITS)
    }
}

/// Classifier configuration.
///
/// Defaults: [`ResultPolicy::MatchFirst`], length guard 13..=19,
/// [`Normalization::Separators`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClassifierConfig {
    /// Match-first or checksum-gated composition.
    pub policy: ResultPolicy,
    /// Digit-count guard; `None` leaves length to the brand patterns.
    pub length_guard: Option<LengthBounds>,
    /// How raw input is reduced to digits.
    pub normalization: Normalization,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            policy: ResultPolicy::default(),
            length_guard: Some(LengthBounds::default()),
            normalization: Normalization::default(),
        }
    }
}

impl ClassifierConfig {
    /// Sets the result policy.
    pub fn with_policy(mut self, policy: ResultPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Enables the length guard with the given bounds.
    pub fn with_length_guard(mut self, bounds: LengthBounds) -> Self {
        self.length_guard = Some(bounds);
        self
    }

    /// Disables the length guard.
    pub fn without_length_guard(mut self) -> Self {
        self.length_guard = None;
        self
    }

    /// Sets the normalization mode.
    pub fn with_normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }
}

/// A successfully classified card number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    brand: String,
    number: NormalizedNumber,
}

impl Classification {
    /// Name of the matched brand.
    #[inline]
    pub fn brand(&self) -> &str {
        &self.brand
    }

    /// The normalized digits.
    #[inline]
    pub fn number(&self) -> &NormalizedNumber {
        &self.number
    }
}

/// Outcome of [`CardClassifier::classify`].
///
/// Produced once per call. `message` is `None` on success and holds the
/// failure's display text otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ClassificationResult {
    /// True only if a brand matched and the checksum passed.
    pub valid: bool,
    /// Matched brand, if reported under the active policy.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub brand: Option<String>,
    /// Digit-only form of the input, when normalization succeeded.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub normalized_number: Option<String>,
    /// Human-readable diagnostic for failures.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub message: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip))]
    error: Option<ClassifyError>,
}

impl ClassificationResult {
    fn success(classification: Classification) -> Self {
        Self {
            valid: true,
            brand: Some(classification.brand),
            normalized_number: Some(classification.number.into_string()),
            message: None,
            error: None,
        }
    }

    fn failure(error: ClassifyError, number: Option<NormalizedNumber>) -> Self {
        Self {
            valid: false,
            brand: error.brand().map(str::to_string),
            normalized_number: number.map(NormalizedNumber::into_string),
            message: Some(error.to_string()),
            error: Some(error),
        }
    }

    /// The failure behind an invalid result.
    #[inline]
    pub fn error(&self) -> Option<&ClassifyError> {
        self.error.as_ref()
    }
}

impl fmt::Display for ClassificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.brand, self.valid, &self.message) {
            (Some(brand), true, _) => write!(f, "{} (valid)", brand),
            (Some(brand), false, Some(message)) => write!(f, "{} (invalid: {})", brand, message),
            (None, _, Some(message)) => write!(f, "invalid: {}", message),
            _ => write!(f, "invalid"),
        }
    }
}

/// Classifies raw card numbers against an injected rule table.
///
/// # Example
///
/// ```
/// use card_classifier::{CardClassifier, ClassifierConfig, ResultPolicy};
///
/// let classifier = CardClassifier::default();
///
/// let result = classifier.classify("4111 1111 1111 1111");
/// assert!(result.valid);
/// assert_eq!(result.brand.as_deref(), Some("Visa"));
///
/// // Match-first keeps the brand on a checksum failure
/// let result = classifier.classify("4111111111111112");
/// assert!(!result.valid);
/// assert_eq!(result.brand.as_deref(), Some("Visa"));
///
/// // Checksum-gated never looks the brand up
/// let gated = CardClassifier::with_config(
///     ClassifierConfig::default().with_policy(ResultPolicy::ChecksumGated),
/// );
/// let result = gated.classify("4111111111111112");
/// assert_eq!(result.brand, None);
/// assert_eq!(result.message.as_deref(), Some("invalid card number"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CardClassifier {
    rules: RuleSet,
    config: ClassifierConfig,
}

impl CardClassifier {
    /// Creates a classifier from a rule table and configuration.
    pub fn new(rules: RuleSet, config: ClassifierConfig) -> Self {
        Self { rules, config }
    }

    /// Default rule table with a custom configuration.
    pub fn with_config(config: ClassifierConfig) -> Self {
        Self::new(RuleSet::default(), config)
    }

    /// Custom rule table with the default configuration.
    pub fn with_rules(rules: RuleSet) -> Self {
        Self::new(rules, ClassifierConfig::default())
    }

    /// The rule table in use.
    #[inline]
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// The configuration in use.
    #[inline]
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classifies a raw card number.
    pub fn classify(&self, raw: &str) -> ClassificationResult {
        self.classify_input(Some(raw))
    }

    /// Classifies possibly-absent input. `None` yields `MissingInput`.
    pub fn classify_input(&self, raw: Option<&str>) -> ClassificationResult {
        let number = match raw {
            Some(raw) => normalize(raw, self.config.normalization),
            None => Err(ClassifyError::MissingInput),
        };

        let number = match number {
            Ok(number) => number,
            Err(error) => {
                tracing::debug!(kind = error.kind(), "card number rejected before matching");
                return ClassificationResult::failure(error, None);
            }
        };

        match self.evaluate_normalized(&number) {
            Ok(brand) => {
                tracing::debug!(
                    brand = brand.as_str(),
                    number = %mask_digits(number.as_str()),
                    "card number classified"
                );
                ClassificationResult::success(Classification { brand, number })
            }
            Err(error) => {
                tracing::debug!(
                    kind = error.kind(),
                    brand = error.brand(),
                    number = %mask_digits(number.as_str()),
                    "card number invalid"
                );
                ClassificationResult::failure(error, Some(number))
            }
        }
    }

    /// Classifies a raw card number, returning failures as `Err`.
    ///
    /// # Example
    ///
    /// ```
    /// use card_classifier::{CardClassifier, ClassifyError};
    ///
    /// let classifier = CardClassifier::default();
    /// let card = classifier.evaluate("371449635398431").unwrap();
    /// assert_eq!(card.brand(), "American Express");
    ///
    /// assert_eq!(classifier.evaluate("").unwrap_err(), ClassifyError::MissingInput);
    /// ```
    pub fn evaluate(&self, raw: &str) -> Result<Classification, ClassifyError> {
        let number = normalize(raw, self.config.normalization)?;
        let brand = self.evaluate_normalized(&number)?;
        Ok(Classification { brand, number })
    }

    /// Length guard, brand match and checksum on already-normalized digits.
    fn evaluate_normalized(&self, number: &NormalizedNumber) -> Result<String, ClassifyError> {
        if let Some(bounds) = &self.config.length_guard {
            bounds.check(number.len())?;
        }

        match self.config.policy {
            ResultPolicy::MatchFirst => {
                let rule = self
                    .rules
                    .first_match(number)
                    .ok_or(ClassifyError::UnknownBrand)?;
                if !luhn::passes(number) {
                    return Err(ClassifyError::ChecksumFailed {
                        brand: Some(rule.name().to_string()),
                    });
                }
                Ok(rule.name().to_string())
            }
            ResultPolicy::ChecksumGated => {
                if !luhn::passes(number) {
                    return Err(ClassifyError::ChecksumFailed { brand: None });
                }
                self.rules
                    .first_match(number)
                    .map(|rule| rule.name().to_string())
                    .ok_or(ClassifyError::UnknownBrand)
            }
        }
    }
}

/// Classifies with the default rule table and configuration.
///
/// # Example
///
/// ```
/// use card_classifier::classify;
///
/// assert_eq!(classify("6011000000000004").brand.as_deref(), Some("Discover"));
/// assert!(!classify("").valid);
/// ```
pub fn classify(raw: &str) -> ClassificationResult {
    CardClassifier::default().classify(raw)
}

/// Quick yes/no check with the default classifier.
#[inline]
pub fn is_valid(raw: &str) -> bool {
    classify(raw).valid
}
