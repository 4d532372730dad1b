//! Shared input patterns.

use once_cell::sync::Lazy;
use regex::Regex;

/// `local@domain.tld`: no whitespace, a single `@`, at least one dot after it.
pub static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// National phone number: exactly ten ASCII digits.
pub static NATIONAL_PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("phone pattern compiles"));

/// Country calling code without the leading `+`.
pub static CALLING_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{1,4}$").expect("calling code pattern compiles"));
