// utils/phone.rs
use regex::Regex;

/// US-style phone pattern, with or without separators and parentheses.
pub fn validate_phone_number(phone_number: &str) -> bool {
    match Regex::new(r"^\(?([0-9]{3})\)?[-. ]?([0-9]{3})[-. ]?([0-9]{4})$") {
        Ok(re) => re.is_match(phone_number),
        Err(_) => false,
    }
}

/// Render a bare 10-digit number as (123) 456-7890; anything else is
/// returned unchanged.
pub fn format_phone_number(phone_number: &str) -> String {
    let digits: String = phone_number
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();

    if digits.len() == 10 {
        format!("({}) {}-{}", &digits[0..3], &digits[3..6], &digits[6..10])
    } else {
        phone_number.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_us_formats() {
        assert!(validate_phone_number("1234567890"));
        assert!(validate_phone_number("(123) 456-7890"));
        assert!(validate_phone_number("123-456-7890"));
        assert!(validate_phone_number("123.456.7890"));
    }

    #[test]
    fn rejects_short_and_garbled_input() {
        assert!(!validate_phone_number("12345"));
        assert!(!validate_phone_number("phone"));
        assert!(!validate_phone_number("123-45-67890"));
        assert!(!validate_phone_number(""));
    }

    #[test]
    fn formats_ten_digit_numbers() {
        assert_eq!(format_phone_number("1234567890"), "(123) 456-7890");
        assert_eq!(format_phone_number("123-456-7890"), "(123) 456-7890");
    }

    #[test]
    fn leaves_everything_else_alone() {
        assert_eq!(format_phone_number("+44 20 7946 0958"), "+44 20 7946 0958");
        assert_eq!(format_phone_number("12345"), "12345");
    }
}
