//! Telegram/mobile number normalization and validation
//!
//! Numbers are Egyptian mobiles: `01` followed by 8 or 9 digits.

use lazy_static::lazy_static;
use regex::Regex;

/// Longest number the input will hold
pub const MAX_PHONE_DIGITS: usize = 11;

lazy_static! {
    static ref PHONE_PATTERN: Regex = Regex::new(r"^01[0-9]{8,9}$").unwrap();
}

/// Rewrite raw keystroke input into a `01`-prefixed digit string of at most
/// 11 digits
///
/// Already normalized values come back unchanged.
pub fn normalize_phone(raw: &str) -> String {
    let mut value: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    if !value.is_empty() && !value.starts_with("01") {
        value = if value.starts_with('1') {
            format!("0{}", value)
        } else if value.starts_with('0') {
            // second digit is known not to be '1' here
            format!("01{}", &value[1..])
        } else {
            format!("01{}", value)
        };
    }

    value.truncate(MAX_PHONE_DIGITS);
    value
}

/// Check a value against `^01[0-9]{8,9}$`
pub fn is_valid_phone(value: &str) -> bool {
    PHONE_PATTERN.is_match(value)
}

/// Outcome of checking the phone input when it loses focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneCheck {
    /// Nothing entered yet; no validity class is applied
    Empty,
    Valid,
    Invalid,
}

pub fn check_phone(value: &str) -> PhoneCheck {
    if value.is_empty() {
        PhoneCheck::Empty
    } else if is_valid_phone(value) {
        PhoneCheck::Valid
    } else {
        PhoneCheck::Invalid
    }
}
