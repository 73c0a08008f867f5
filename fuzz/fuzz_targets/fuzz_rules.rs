//! Fuzz target for JSON rule tables.
//!
//! Malformed tables and patterns must surface as errors, never panics.

#![no_main]

use card_classifier::{CardClassifier, RuleSet};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    if let Ok(rules) = RuleSet::from_json(data) {
        let classifier = CardClassifier::with_rules(rules);
        let _ = classifier.classify("4111111111111111");
    }
});
