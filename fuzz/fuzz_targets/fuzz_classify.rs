//! Fuzz target for classification.
//!
//! Classification must never panic, and every failure must carry a message.

#![no_main]

use card_classifier::{
    luhn, normalize, CardClassifier, ClassifierConfig, Normalization, ResultPolicy,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    for policy in [ResultPolicy::MatchFirst, ResultPolicy::ChecksumGated] {
        for normalization in [Normalization::Separators, Normalization::DigitsOnly] {
            let config = ClassifierConfig::default()
                .with_policy(policy)
                .with_normalization(normalization);
            let result = CardClassifier::with_config(config).classify(data);
            assert_eq!(result.valid, result.message.is_none());

            if let Ok(number) = normalize(data, normalization) {
                assert!(number.as_str().bytes().all(|b| b.is_ascii_digit()));
                let _ = luhn::passes(&number);
            }
        }
    }

    // Raw bytes as digits
    let digits: Vec<u8> = data.bytes().map(|b| b % 10).collect();
    let _ = luhn::validate(&digits);
});
