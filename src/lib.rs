//! # card_classifier
//!
//! Payment card brand identification and Luhn verification for Rust.
//!
//! ## Features
//!
//! - Input normalization (spaces and hyphens, or every non-digit)
//! - Brand detection from a data-driven, injectable rule table (11 brands)
//! - Luhn checksum verification
//! - Match-first or checksum-gated result policies
//! - Optional 13-19 digit length guard
//! - Batch classification, optionally parallel
//!
//! ## Quick Start
//!
//! ```rust
//! use card_classifier::{classify, CardClassifier, ClassifyError};
//!
//! let result = classify("4111-1111-1111-1111");
//! assert!(result.valid);
//! assert_eq!(result.brand.as_deref(), Some("Visa"));
//! assert_eq!(result.normalized_number.as_deref(), Some("4111111111111111"));
//!
//! let result = classify("abcd-1234-5678-9012");
//! assert!(!result.valid);
//! assert_eq!(result.message.as_deref(), Some("contains invalid characters"));
//!
//! // `evaluate` returns a Result for use with `?`
//! let classifier = CardClassifier::default();
//! assert_eq!(classifier.evaluate("").unwrap_err(), ClassifyError::MissingInput);
//! ```
//!
//! ## Policies
//!
//! ```rust
//! use card_classifier::{CardClassifier, ClassifierConfig, ResultPolicy};
//!
//! // Match-first (default): the brand is reported even on a bad checksum
//! let result = CardClassifier::default().classify("4111111111111112");
//! assert_eq!(result.brand.as_deref(), Some("Visa"));
//! assert!(!result.valid);
//!
//! // Checksum-gated: a bad checksum stops before brand lookup
//! let classifier = CardClassifier::with_config(
//!     ClassifierConfig::default()
//!         .with_policy(ResultPolicy::ChecksumGated)
//!         .without_length_guard(),
//! );
//! let result = classifier.classify("4111111111111112");
//! assert_eq!(result.brand, None);
//! assert_eq!(result.message.as_deref(), Some("invalid card number"));
//! ```
//!
//! ## Custom Rule Tables
//!
//! ```rust
//! use card_classifier::{CardClassifier, RuleSet};
//!
//! let rules = RuleSet::builder()
//!     .rule("Visa", r"^4[0-9]{15}$")
//!     .unwrap()
//!     .build()
//!     .unwrap();
//!
//! let classifier = CardClassifier::with_rules(rules);
//! assert!(classifier.classify("4111111111111111").valid);
//! assert!(!classifier.classify("371449635398431").valid);
//! ```
//!
//! ## Supported Card Brands
//!
//! Evaluated in this order; the first match wins.
//!
//! | Brand | Prefix | Length |
//! |-------|--------|--------|
//! | Elo | 636368, 438935, 504175, 451416, 636297, 5067, 4576, 4011 | up to 16 |
//! | HiperCard | 606282 / 3841 | 16, 19 / 19 |
//! | Visa | 4 | 13, 16 |
//! | MasterCard | 51-55, 2221-2720 | 16 |
//! | American Express | 34, 37 | 15 |
//! | Diners Club | 300-305, 36, 38 | 14 |
//! | Discover | 6011, 65 | 16 |
//! | enRoute | 2014, 2149 | 15 |
//! | JCB | 35 | 16 |
//! | Voyager | 8699 | 16 |
//! | Aura | 50 | 16 |
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | Serialize results and configuration |
//! | `rules-json` | Load rule tables from JSON |
//! | `parallel` | Rayon-based batch classification |
//! | `cli` | Command-line tool |

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod batch;
pub mod classifier;
pub mod error;
pub mod luhn;
pub mod mask;
pub mod normalize;
pub mod rules;

// Re-export main types at crate root
pub use batch::BatchClassifier;
pub use classifier::{
    classify, is_valid, CardClassifier, Classification, ClassificationResult, ClassifierConfig,
    LengthBounds, ResultPolicy, MAX_CARD_DIGITS, MIN_CARD_DIGITS,
};
pub use error::{ClassifyError, RuleError};
pub use normalize::{normalize, Normalization, NormalizedNumber};
pub use rules::{BrandRule, RuleSet, RuleSetBuilder, DEFAULT_CATALOG};
