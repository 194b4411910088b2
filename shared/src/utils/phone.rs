//! Phone number utilities
//!
//! The gateway serves Indian mobile numbers: ten digits starting with 6-9,
//! optionally prefixed with the `91` country code. Every number is stored and
//! compared in the canonical `+91XXXXXXXXXX` form.

use once_cell::sync::Lazy;
use regex::Regex;

/// Country calling code prefixed to canonical numbers
pub const INDIA_COUNTRY_CODE: &str = "+91";

// Digits only, optional 91 prefix, subscriber number starts with 6-9
static INDIA_MOBILE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(91)?[6-9][0-9]{9}$").expect("valid mobile number regex")
});

/// Normalize a phone number by removing every non-digit character
pub fn normalize_phone_number(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Check if a phone number is a valid Indian mobile number
///
/// Formatting characters (`+`, spaces, dashes, brackets) are ignored.
pub fn is_valid_indian_mobile(phone: &str) -> bool {
    INDIA_MOBILE_REGEX.is_match(&normalize_phone_number(phone))
}

/// Format an Indian mobile number in canonical `+91XXXXXXXXXX` form
///
/// Returns `None` when the input is not a valid Indian mobile number.
///
/// # Examples
///
/// ```
/// use otp_shared::utils::phone::format_indian_mobile;
///
/// assert_eq!(format_indian_mobile("98765 43210").as_deref(), Some("+919876543210"));
/// assert_eq!(format_indian_mobile("+91-98765-43210").as_deref(), Some("+919876543210"));
/// assert_eq!(format_indian_mobile("12345"), None);
/// ```
pub fn format_indian_mobile(phone: &str) -> Option<String> {
    let digits = normalize_phone_number(phone);
    if !INDIA_MOBILE_REGEX.is_match(&digits) {
        return None;
    }
    let subscriber = &digits[digits.len() - 10..];
    Some(format!("{}{}", INDIA_COUNTRY_CODE, subscriber))
}

/// Mask a phone number for display and logs
///
/// Canonical numbers keep the country code and the last four digits
/// (`+91******3210`); anything else keeps only the last four digits.
pub fn mask_phone_number(phone: &str) -> String {
    if let Some(subscriber) = phone.strip_prefix(INDIA_COUNTRY_CODE) {
        if subscriber.len() == 10 && subscriber.chars().all(|c| c.is_ascii_digit()) {
            return format!("{}******{}", INDIA_COUNTRY_CODE, &subscriber[6..]);
        }
    }

    let digits = normalize_phone_number(phone);
    if digits.len() <= 4 {
        return "****".to_string();
    }
    format!("{}{}", "*".repeat(digits.len() - 4), &digits[digits.len() - 4..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_phone_number() {
        assert_eq!(normalize_phone_number("987-654-3210"), "9876543210");
        assert_eq!(normalize_phone_number("+91 98765 43210"), "919876543210");
        assert_eq!(normalize_phone_number("(98765) 43210"), "9876543210");
    }

    #[test]
    fn test_valid_indian_mobile() {
        assert!(is_valid_indian_mobile("9876543210"));
        assert!(is_valid_indian_mobile("6123456789"));
        assert!(is_valid_indian_mobile("919876543210"));
        assert!(is_valid_indian_mobile("+919876543210"));
        assert!(is_valid_indian_mobile("+91 98765-43210"));
    }

    #[test]
    fn test_invalid_indian_mobile() {
        assert!(!is_valid_indian_mobile(""));
        assert!(!is_valid_indian_mobile("5876543210")); // leading digit outside 6-9
        assert!(!is_valid_indian_mobile("987654321")); // too short
        assert!(!is_valid_indian_mobile("98765432101")); // 11 digits
        assert!(!is_valid_indian_mobile("+449876543210")); // foreign country code
        assert!(!is_valid_indian_mobile("abcdefghij"));
    }

    #[test]
    fn test_format_indian_mobile() {
        assert_eq!(format_indian_mobile("9876543210").as_deref(), Some("+919876543210"));
        assert_eq!(format_indian_mobile("919876543210").as_deref(), Some("+919876543210"));
        assert_eq!(format_indian_mobile("+919876543210").as_deref(), Some("+919876543210"));
        assert_eq!(format_indian_mobile("5876543210"), None);
    }

    #[test]
    fn test_format_keeps_subscriber_numbers_starting_with_91() {
        // Ten-digit subscriber number that happens to begin with 9 then 1
        assert_eq!(format_indian_mobile("9123456789").as_deref(), Some("+919123456789"));
        assert_eq!(format_indian_mobile("919123456789").as_deref(), Some("+919123456789"));
    }

    #[test]
    fn test_mask_phone_number() {
        assert_eq!(mask_phone_number("+919876543210"), "+91******3210");
        assert_eq!(mask_phone_number("9876543210"), "******3210");
        assert_eq!(mask_phone_number("123"), "****");
    }
}
