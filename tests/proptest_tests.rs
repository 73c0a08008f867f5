//! Property-based tests using proptest.
//!
//! These verify invariants that should hold for all inputs.

use card_classifier::{
    classify, luhn, normalize, CardClassifier, ClassifierConfig, ClassifyError, Normalization,
    ResultPolicy, RuleSet,
};
use proptest::prelude::*;

// =============================================================================
// STRATEGIES
// =============================================================================

/// Generates a random digit string of a length within range.
fn digit_string(range: std::ops::RangeInclusive<usize>) -> impl Strategy<Value = String> {
    proptest::collection::vec(prop::char::range('0', '9'), range)
        .prop_map(|chars| chars.into_iter().collect())
}

fn to_digits(s: &str) -> Vec<u8> {
    s.bytes().map(|b| b - b'0').collect()
}

fn complete(prefix: &str) -> String {
    format!("{}{}", prefix, luhn::generate_check_digit(&to_digits(prefix)))
}

/// A Luhn-valid number for a brand in the default catalog.
fn branded_card() -> impl Strategy<Value = (String, &'static str)> {
    prop_oneof![
        digit_string(13..=13).prop_map(|d| (complete(&format!("41{}", d)), "Visa")),
        digit_string(13..=13).prop_map(|d| (complete(&format!("55{}", d)), "MasterCard")),
        digit_string(12..=12).prop_map(|d| (complete(&format!("37{}", d)), "American Express")),
        digit_string(10..=10).prop_map(|d| (complete(&format!("305{}", d)), "Diners Club")),
        digit_string(11..=11).prop_map(|d| (complete(&format!("6011{}", d)), "Discover")),
        digit_string(10..=10).prop_map(|d| (complete(&format!("2014{}", d)), "enRoute")),
        digit_string(13..=13).prop_map(|d| (complete(&format!("35{}", d)), "JCB")),
        digit_string(11..=11).prop_map(|d| (complete(&format!("8699{}", d)), "Voyager")),
        digit_string(9..=9).prop_map(|d| (complete(&format!("606282{}", d)), "HiperCard")),
        digit_string(9..=9).prop_map(|d| (complete(&format!("636368{}", d)), "Elo")),
    ]
}

/// Interleaves spaces and hyphens into a digit string.
fn with_separators(card: String) -> impl Strategy<Value = String> {
    let len = card.len();
    proptest::collection::vec(prop_oneof![Just(""), Just(" "), Just("-"), Just(" - ")], len + 1)
        .prop_map(move |seps| {
            let mut result = String::new();
            for (i, c) in card.chars().enumerate() {
                result.push_str(seps[i]);
                result.push(c);
            }
            result.push_str(seps[len]);
            result
        })
}

fn all_configs() -> Vec<CardClassifier> {
    let mut classifiers = Vec::new();
    for policy in [ResultPolicy::MatchFirst, ResultPolicy::ChecksumGated] {
        for guard in [true, false] {
            let mut config = ClassifierConfig::default().with_policy(policy);
            if !guard {
                config = config.without_length_guard();
            }
            classifiers.push(CardClassifier::with_config(config));
        }
    }
    classifiers
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    /// Luhn-valid numbers matching a rule classify as valid with that brand.
    #[test]
    fn luhn_valid_branded_numbers_are_valid((card, brand) in branded_card()) {
        for classifier in all_configs() {
            let result = classifier.classify(&card);
            prop_assert!(result.valid, "{} should be valid: {:?}", card, result);
            prop_assert_eq!(result.brand.as_deref(), Some(brand));
        }
    }

    /// Luhn-invalid numbers are never reported valid.
    #[test]
    fn luhn_invalid_never_valid(digits in digit_string(1..=24)) {
        prop_assume!(!luhn::validate(&to_digits(&digits)));
        for classifier in all_configs() {
            prop_assert!(!classifier.classify(&digits).valid);
        }
    }

    /// Re-classifying the normalized number reproduces the verdict.
    #[test]
    fn classification_is_idempotent(input in "[0-9 \\-]{0,30}") {
        for classifier in all_configs() {
            let first = classifier.classify(&input);
            if let Some(normalized) = &first.normalized_number {
                let second = classifier.classify(normalized);
                prop_assert_eq!(&second.brand, &first.brand);
                prop_assert_eq!(second.valid, first.valid);
                prop_assert_eq!(second.error(), first.error());
            }
        }
    }

    /// Spaces and hyphens never change the outcome.
    #[test]
    fn separators_are_ignored(
        card in digit_string(10..=20).prop_flat_map(|d| (Just(d.clone()), with_separators(d)))
    ) {
        let (plain, formatted) = card;
        prop_assert_eq!(classify(&formatted), classify(&plain));
    }

    /// Any letter yields InvalidCharacters under strict normalization.
    #[test]
    fn letters_are_invalid_characters(
        prefix in digit_string(0..=10),
        letter in prop::char::range('a', 'z'),
        suffix in digit_string(0..=10),
    ) {
        let input = format!("{}{}{}", prefix, letter, suffix);
        for classifier in all_configs() {
            let result = classifier.classify(&input);
            prop_assert!(!result.valid);
            prop_assert!(result.brand.is_none());
            let is_invalid_chars =
                matches!(result.error(), Some(ClassifyError::InvalidCharacters { .. }));
            prop_assert!(is_invalid_chars);
        }
    }

    /// Classification never panics and always explains failures.
    #[test]
    fn arbitrary_input_never_panics(input in "\\PC{0,40}") {
        let result = classify(&input);
        prop_assert_eq!(result.valid, result.message.is_none());
        prop_assert_eq!(result.valid, result.error().is_none());
    }

    /// The length guard bounds every accepted number.
    #[test]
    fn guarded_lengths_stay_in_range(digits in digit_string(1..=30)) {
        let result = classify(&digits);
        if result.valid {
            prop_assert!((13..=19).contains(&digits.len()));
        }
        if digits.len() < 13 {
            let is_too_short = matches!(result.error(), Some(ClassifyError::TooShort { .. }));
            prop_assert!(is_too_short);
        }
    }

    /// Brands are reported only when a rule matched the normalized number.
    #[test]
    fn reported_brand_matches_a_rule(digits in digit_string(13..=19)) {
        let rules = RuleSet::default();
        let result = classify(&digits);
        if let Some(brand) = &result.brand {
            let number = normalize(&digits, Normalization::Separators).unwrap();
            let first = rules.first_match(&number).map(|r| r.name().to_string());
            prop_assert_eq!(first.as_ref(), Some(brand));
        }
    }

    /// Adding a check digit makes any digit sequence Luhn-valid.
    #[test]
    fn check_digit_makes_valid(prefix in digit_string(1..=18)) {
        let full = complete(&prefix);
        prop_assert!(luhn::validate(&to_digits(&full)));
    }

    /// Changing any single digit of a valid number breaks the checksum.
    #[test]
    fn single_digit_change_invalidates((card, _) in branded_card(), pos in 0usize..19, delta in 1u8..=9) {
        let mut digits = to_digits(&card);
        let pos = pos % digits.len();
        digits[pos] = (digits[pos] + delta) % 10;
        prop_assert!(!luhn::validate(&digits));
    }
}
