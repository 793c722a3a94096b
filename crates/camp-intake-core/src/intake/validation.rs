//! Field validation for raw intake text.
//!
//! Each parser accepts what a clinic volunteer types at a prompt and either returns
//! a typed value or a [`ValidationError`] carrying the guidance to re-prompt with.
//! Optional fields treat blank input as "skipped".

use thiserror::Error;

use crate::metrics::{height_to_cm, normalize_phone};
use crate::models::{Age, BloodGroup, BloodPressure, Gender};

/// Accepted blood sugar range (mmol/L).
pub const SUGAR_RANGE: (f64, f64) = (1.0, 44.4);
/// Accepted weight range (kg).
pub const WEIGHT_RANGE: (f64, f64) = (1.0, 500.0);
/// Accepted height range (cm).
pub const HEIGHT_RANGE: (f64, f64) = (30.0, 300.0);

/// Intake validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Please enter a valid number for age: {0}")]
    Age(String),

    #[error("Please enter a valid age (0-120): {0}")]
    AgeOutOfRange(String),

    #[error("Please enter M/F or Male/Female: {0}")]
    Gender(String),

    #[error("Please use format like 120/80: {0}")]
    BloodPressureFormat(String),

    #[error("Invalid BP range {systolic}/{diastolic}. Systolic: 50-250, Diastolic: 30-150, systolic above diastolic")]
    BloodPressureRange { systolic: u16, diastolic: u16 },

    #[error("Please enter a valid blood group (A+, A-, B+, B-, AB+, AB-, O+, O-): {0}")]
    BloodGroup(String),

    #[error("Please enter blood sugar between 1.0-44.4 mmol/L: {0}")]
    BloodSugar(String),

    #[error("Please enter weight between 1-500 kg: {0}")]
    Weight(String),

    #[error("Please enter height between 30-300 cm or 1'-10': {0}")]
    Height(String),
}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Trim and title-case a patient name.
pub fn parse_name(raw: &str) -> ValidationResult<String> {
    let name = raw
        .split_whitespace()
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ");

    if name.is_empty() {
        Err(ValidationError::EmptyName)
    } else {
        Ok(name)
    }
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

pub fn parse_age(raw: &str) -> ValidationResult<Age> {
    let trimmed = raw.trim();
    let years: i64 = trimmed
        .parse()
        .map_err(|_| ValidationError::Age(trimmed.to_string()))?;

    u8::try_from(years)
        .map_err(|_| ValidationError::AgeOutOfRange(trimmed.to_string()))
        .and_then(Age::new)
}

pub fn parse_gender(raw: &str) -> ValidationResult<Gender> {
    raw.parse()
}

/// Normalized phone; blank stays blank.
pub fn parse_phone(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        normalize_phone(trimmed)
    }
}

/// `systolic/diastolic` in mmHg.
pub fn parse_blood_pressure(raw: &str) -> ValidationResult<Option<BloodPressure>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let format_error = || ValidationError::BloodPressureFormat(trimmed.to_string());
    let (systolic, diastolic) = trimmed.split_once('/').ok_or_else(format_error)?;
    let systolic: u16 = systolic.trim().parse().map_err(|_| format_error())?;
    let diastolic: u16 = diastolic.trim().parse().map_err(|_| format_error())?;

    BloodPressure::new(systolic, diastolic).map(Some)
}

pub fn parse_blood_group(raw: &str) -> ValidationResult<Option<BloodGroup>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Ok(None)
    } else {
        trimmed.parse().map(Some)
    }
}

pub fn parse_sugar(raw: &str) -> ValidationResult<Option<f64>> {
    parse_bounded(raw, SUGAR_RANGE, ValidationError::BloodSugar)
}

pub fn parse_weight(raw: &str) -> ValidationResult<Option<f64>> {
    parse_bounded(raw, WEIGHT_RANGE, ValidationError::Weight)
}

/// Height in centimeters from any format [`height_to_cm`] accepts.
pub fn parse_height(raw: &str) -> ValidationResult<Option<f64>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    height_to_cm(trimmed)
        .filter(|cm| in_range(*cm, HEIGHT_RANGE))
        .map(Some)
        .ok_or_else(|| ValidationError::Height(trimmed.to_string()))
}

fn parse_bounded(
    raw: &str,
    range: (f64, f64),
    error: fn(String) -> ValidationError,
) -> ValidationResult<Option<f64>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value: f64 = trimmed.parse().map_err(|_| error(trimmed.to_string()))?;
    check_bounded(value, range, error).map(Some)
}

fn check_bounded(
    value: f64,
    range: (f64, f64),
    error: fn(String) -> ValidationError,
) -> ValidationResult<f64> {
    if in_range(value, range) {
        Ok(value)
    } else {
        Err(error(value.to_string()))
    }
}

fn in_range(value: f64, (min, max): (f64, f64)) -> bool {
    (min..=max).contains(&value)
}
