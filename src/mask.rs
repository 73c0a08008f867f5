//! Masking for log output.
//!
//! Classification logs never carry a full card number. Only the last four
//! digits survive; everything else is replaced with `*`, grouped by four.

/// Masks a digit string, keeping only the last four digits visible.
///
/// Non-digit characters are ignored. Inputs of four digits or fewer are
/// masked entirely.
///
/// # Example
///
/// ```
/// use card_classifier::mask::mask_digits;
///
/// assert_eq!(mask_digits("4111111111111111"), "****-****-****-1111");
/// assert_eq!(mask_digits("371449635398431"), "****-****-***8431");
/// ```
pub fn mask_digits(input: &str) -> String {
    let digits: Vec<char> = input.chars().filter(|c| c.is_ascii_digit()).collect();
    let len = digits.len();

    if len <= 4 {
        return "*".repeat(len);
    }

    let masked_count = len - 4;
    let mut result = String::with_capacity(len + len / 4);

    for i in 0..masked_count {
        if i > 0 && i % 4 == 0 {
            result.push('-');
        }
        result.push('*');
    }

    if masked_count % 4 == 0 {
        result.push('-');
    }

    result.extend(&digits[masked_count..]);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_16_digits() {
        assert_eq!(mask_digits("4111111111111111"), "****-****-****-1111");
        assert_eq!(mask_digits("4111-1111 1111-1111"), "****-****-****-1111");
    }

    #[test]
    fn test_mask_odd_lengths() {
        assert_eq!(mask_digits("30569309025904"), "****-****-**5904");
        assert_eq!(mask_digits("6062820000000000000"), "****-****-****-***0000");
    }

    #[test]
    fn test_mask_short() {
        assert_eq!(mask_digits("1234"), "****");
        assert_eq!(mask_digits(""), "");
        assert_eq!(mask_digits("12345"), "*2345");
    }

    #[test]
    fn test_never_leaks_full_number() {
        let masked = mask_digits("4111111111111111");
        assert!(!masked.contains("4111111111111111"));
        assert!(!masked.starts_with('4'));
    }
}
