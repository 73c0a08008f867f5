//! Luhn checksum.
//!
//! The Luhn algorithm (also known as the "modulus 10" algorithm) guards card
//! numbers against single-digit typos and most adjacent transpositions.

use crate::normalize::NormalizedNumber;

/// Doubled digit with 9 subtracted when the product exceeds 9.
/// Index is the digit (0-9).
const DOUBLE_TABLE: [u8; 10] = [0, 2, 4, 6, 8, 1, 3, 5, 7, 9];

/// Validates a sequence of digits (0-9 values, not ASCII).
///
/// Empty input never passes.
///
/// # Example
///
/// ```
/// use card_classifier::luhn::validate;
///
/// let digits = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1];
/// assert!(validate(&digits));
///
/// let invalid = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2];
/// assert!(!validate(&invalid));
/// ```
#[inline]
pub fn validate(digits: &[u8]) -> bool {
    if digits.is_empty() {
        return false;
    }

    compute_checksum(digits) % 10 == 0
}

/// Luhn check on a normalized card number.
#[inline]
pub fn passes(number: &NormalizedNumber) -> bool {
    validate(&number.digits())
}

/// Computes the Luhn sum (not reduced modulo 10).
///
/// Walks from the rightmost digit leftwards. The rightmost digit is not
/// doubled; the flag alternates on every step after that.
#[inline]
pub fn compute_checksum(digits: &[u8]) -> u64 {
    let mut sum: u64 = 0;
    let mut double = false;

    for &digit in digits.iter().rev() {
        sum += if double {
            DOUBLE_TABLE[digit as usize] as u64
        } else {
            digit as u64
        };
        double = !double;
    }

    sum
}

/// Computes the check digit that completes `digits` into a Luhn-valid number.
///
/// # Example
///
/// ```
/// use card_classifier::luhn::generate_check_digit;
///
/// let partial = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1];
/// assert_eq!(generate_check_digit(&partial), 1);
/// ```
#[inline]
pub fn generate_check_digit(digits: &[u8]) -> u8 {
    // Appending a 0 shifts every existing digit one place left, so its
    // checksum tells us how far we are from a multiple of 10.
    let mut padded = Vec::with_capacity(digits.len() + 1);
    padded.extend_from_slice(digits);
    padded.push(0);

    ((10 - (compute_checksum(&padded) % 10)) % 10) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_cards() {
        // Visa
        assert!(validate(&[4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1]));
        assert!(validate(&[4, 0, 1, 2, 8, 8, 8, 8, 8, 8, 8, 8, 1, 8, 8, 1]));

        // Amex
        assert!(validate(&[3, 7, 1, 4, 4, 9, 6, 3, 5, 3, 9, 8, 4, 3, 1]));

        // Discover
        assert!(validate(&[6, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 4]));

        // Diners Club
        assert!(validate(&[3, 0, 5, 6, 9, 3, 0, 9, 0, 2, 5, 9, 0, 4]));
    }

    #[test]
    fn test_invalid_cards() {
        assert!(!validate(&[4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2]));
        assert!(!validate(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 0, 1, 2, 3, 4, 5, 6]));
    }

    #[test]
    fn test_checksum_value() {
        // 4111111111111111: 8 + 1*7 doubled (14) + 1*8 = 30
        assert_eq!(
            compute_checksum(&[4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1]),
            30
        );
    }

    #[test]
    fn test_checksum_of_long_input() {
        // 9 doubles to 9, so the sum is 9 per digit
        let nines = vec![9u8; 1_000_000];
        let sum: u64 = compute_checksum(&nines);
        assert_eq!(sum, 9_000_000);
        assert!(!validate(&nines));
        assert!(validate(&vec![0u8; 1_000_000]));
    }

    #[test]
    fn test_generate_check_digit() {
        assert_eq!(
            generate_check_digit(&[4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1]),
            1
        );
        assert_eq!(
            generate_check_digit(&[3, 7, 1, 4, 4, 9, 6, 3, 5, 3, 9, 8, 4, 3]),
            1
        );
        assert_eq!(
            generate_check_digit(&[6, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]),
            4
        );
    }

    #[test]
    fn test_passes_normalized() {
        let n = NormalizedNumber::try_from("4111 1111 1111 1111").unwrap();
        assert!(passes(&n));
        let n = NormalizedNumber::try_from("4111 1111 1111 1112").unwrap();
        assert!(!passes(&n));
    }

    #[test]
    fn test_empty_input() {
        assert!(!validate(&[]));
    }

    #[test]
    fn test_single_digit() {
        assert!(validate(&[0]));
        assert!(!validate(&[1]));
    }

    #[test]
    fn test_double_table_values() {
        for i in 0..10 {
            let doubled = i * 2;
            let expected = if doubled > 9 { doubled - 9 } else { doubled };
            assert_eq!(DOUBLE_TABLE[i], expected as u8);
        }
    }
}
