//! Unit conversion for free-form height and phone input.
//!
//! Handles:
//! - Height text in centimeters, decimal feet or feet+inches ("170", "5.5", "5'6\"", "5 feet 6 inches")
//! - Centimeters back to a feet'inches label
//! - Bangladeshi mobile numbers to `+880...` form

use std::sync::LazyLock;

use regex::Regex;

pub const CM_PER_FOOT: f64 = 30.48;
pub const CM_PER_INCH: f64 = 2.54;

/// A single number above this is taken as centimeters, otherwise as feet.
const FEET_CUTOFF: f64 = 10.0;

static UNIT_WORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(feet|foot|ft|inches|inch|in)\b").expect("valid regex"));
static QUOTES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"["']"#).expect("valid regex"));
static NUMBERS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+\.?\d*").expect("valid regex"));

/// Convert free-form height text to centimeters.
///
/// One number is centimeters when above 10 and feet otherwise; two numbers are
/// feet and inches. Any other shape yields `None`.
pub fn height_to_cm(input: &str) -> Option<f64> {
    let lower = input.trim().to_lowercase();
    let without_units = UNIT_WORDS.replace_all(&lower, "");
    let spaced = QUOTES.replace_all(&without_units, " ");

    let numbers = NUMBERS
        .find_iter(&spaced)
        .map(|m| m.as_str().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .ok()?;

    match numbers.as_slice() {
        [value] if *value > FEET_CUTOFF => Some(*value),
        [feet] => Some(feet * CM_PER_FOOT),
        [feet, inches] => Some(feet_inches_to_cm(*feet, *inches)),
        _ => None,
    }
}

/// Height in centimeters from feet and inches.
pub fn feet_inches_to_cm(feet: f64, inches: f64) -> f64 {
    (feet * 12.0 + inches) * CM_PER_INCH
}

/// Format centimeters as `F'I"`.
///
/// Inches are rounded half-to-even after taking the remainder, so a remainder
/// of 11.5 or more prints as 12 inches rather than carrying into feet.
pub fn cm_to_feet_inches(cm: f64) -> String {
    let total_inches = cm / CM_PER_INCH;
    let feet = (total_inches / 12.0).floor();
    let inches = (total_inches % 12.0).round_ties_even();
    format!("{}'{}\"", feet as i64, inches as i64)
}

/// Normalize a phone number to international form.
///
/// - 11 digits starting `01` get a `+88` prefix
/// - 13 digits starting `880` get a `+` prefix
/// - 10 digits are treated as a local subscriber number under `+8801`
///
/// Anything else is returned untouched.
pub fn normalize_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();

    match digits.len() {
        11 if digits.starts_with("01") => format!("+88{}", digits),
        13 if digits.starts_with("880") => format!("+{}", digits),
        10 => format!("+8801{}", digits),
        _ => raw.to_string(),
    }
}
