//! Canonical column set and the row ↔ record mapping.
//!
//! Column-name lookups happen only here; the rest of the crate works with
//! [`PatientRecord`] fields.

use std::collections::HashMap;

use chrono::{Local, NaiveDateTime};
use thiserror::Error;
use tracing::warn;

use crate::intake::validation::{self, ValidationError};
use crate::intake::{build_record_at, IntakeFields};
use crate::metrics::cm_to_feet_inches;
use crate::models::{PatientRecord, TIMESTAMP_FORMAT};

pub const NAME: &str = "Name";
pub const AGE: &str = "Age";
pub const GENDER: &str = "Gender";
pub const PHONE: &str = "Phone";
pub const BLOOD_PRESSURE: &str = "Blood Pressure";
pub const BLOOD_GROUP: &str = "Blood Group";
pub const BLOOD_SUGAR: &str = "Blood Sugar";
pub const WEIGHT: &str = "Weight";
pub const HEIGHT_CM: &str = "Height (cm)";
pub const HEIGHT_FT: &str = "Height (ft)";
pub const BMI: &str = "BMI";
pub const HEALTH_COMMENTS: &str = "Health Comments";
pub const DATE_ADDED: &str = "Date Added";

/// Canonical columns in sheet order.
pub const COLUMNS: [&str; 13] = [
    NAME,
    AGE,
    GENDER,
    PHONE,
    BLOOD_PRESSURE,
    BLOOD_GROUP,
    BLOOD_SUGAR,
    WEIGHT,
    HEIGHT_CM,
    HEIGHT_FT,
    BMI,
    HEALTH_COMMENTS,
    DATE_ADDED,
];

/// One stored row: column name → text value.
pub type ColumnRow = HashMap<String, String>;

/// Why a stored row could not become a record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RowRejection {
    #[error("row has no name")]
    MissingName,

    #[error("invalid age: {0}")]
    Age(ValidationError),

    #[error("invalid gender: {0}")]
    Gender(ValidationError),
}

/// Record as ordered `(column, value)` pairs. Absent values are empty strings.
pub fn record_to_row(record: &PatientRecord, separator: &str) -> Vec<(&'static str, String)> {
    let optional = |value: Option<f64>| value.map(format_decimal).unwrap_or_default();

    vec![
        (NAME, record.name().to_string()),
        (AGE, record.age().years().to_string()),
        (GENDER, record.gender().label().to_string()),
        (PHONE, record.phone().to_string()),
        (
            BLOOD_PRESSURE,
            record
                .blood_pressure()
                .map(|bp| bp.to_string())
                .unwrap_or_default(),
        ),
        (
            BLOOD_GROUP,
            record
                .blood_group()
                .map(|g| g.label().to_string())
                .unwrap_or_default(),
        ),
        (BLOOD_SUGAR, optional(record.sugar_mmol())),
        (WEIGHT, optional(record.weight_kg())),
        (HEIGHT_CM, optional(record.height_cm())),
        (
            HEIGHT_FT,
            record.height_cm().map(cm_to_feet_inches).unwrap_or_default(),
        ),
        (BMI, optional(record.bmi())),
        (HEALTH_COMMENTS, record.joined_advisories(separator)),
        (DATE_ADDED, record.created_at_text()),
    ]
}

/// Rebuild a record from a stored row.
///
/// Vitals are re-validated; an invalid optional value is dropped with a warning.
/// BMI and advisories are recomputed, so any stored `BMI`/`Health Comments`
/// text is ignored. `Date Added` is kept when it parses.
pub fn record_from_row(row: &ColumnRow) -> Result<PatientRecord, RowRejection> {
    let name = cell(row, NAME);
    if name.is_empty() {
        return Err(RowRejection::MissingName);
    }

    let age = validation::parse_age(cell(row, AGE)).map_err(RowRejection::Age)?;
    let gender = validation::parse_gender(cell(row, GENDER)).map_err(RowRejection::Gender)?;

    let mut fields = IntakeFields::new(name, age, gender);
    fields.phone = cell(row, PHONE).to_string();
    fields.blood_pressure = lenient(
        name,
        BLOOD_PRESSURE,
        validation::parse_blood_pressure(cell(row, BLOOD_PRESSURE)),
    );
    fields.blood_group = lenient(
        name,
        BLOOD_GROUP,
        validation::parse_blood_group(cell(row, BLOOD_GROUP)),
    );
    fields.sugar_mmol = lenient(
        name,
        BLOOD_SUGAR,
        validation::parse_sugar(cell(row, BLOOD_SUGAR)),
    );
    fields.weight_kg = lenient(name, WEIGHT, validation::parse_weight(cell(row, WEIGHT)));
    fields.height_cm = lenient(
        name,
        HEIGHT_CM,
        validation::parse_height(cell(row, HEIGHT_CM)),
    );

    let date_added = cell(row, DATE_ADDED);
    let created_at = NaiveDateTime::parse_from_str(date_added, TIMESTAMP_FORMAT).unwrap_or_else(|_| {
        warn!(patient = name, value = date_added, "unreadable Date Added, using now");
        Local::now().naive_local()
    });

    Ok(build_record_at(fields, created_at))
}

fn cell<'r>(row: &'r ColumnRow, column: &str) -> &'r str {
    row.get(column).map(|v| v.trim()).unwrap_or("")
}

fn lenient<T>(name: &str, column: &str, parsed: Result<Option<T>, ValidationError>) -> Option<T> {
    parsed.unwrap_or_else(|e| {
        warn!(patient = name, column, error = %e, "dropping invalid stored value");
        None
    })
}

/// One decimal place, or none for whole numbers (`70`, `70.5`).
pub fn format_decimal(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::build_record;
    use crate::models::{Age, BloodGroup, BloodPressure, Gender};

    fn row(pairs: &[(&str, &str)]) -> ColumnRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_record_to_row_order_and_values() {
        let record = build_record(
            IntakeFields::new("Rahim", Age::new(45).unwrap(), Gender::Male)
                .with_blood_pressure(BloodPressure::new(120, 80).unwrap())
                .with_blood_group(BloodGroup::BNegative)
                .with_weight(70.0)
                .with_height(175.0),
        );

        let pairs = record_to_row(&record, " | ");
        let columns: Vec<&str> = pairs.iter().map(|(c, _)| *c).collect();
        assert_eq!(columns, COLUMNS);

        let values: HashMap<&str, &str> = pairs.iter().map(|(c, v)| (*c, v.as_str())).collect();
        assert_eq!(values[BLOOD_PRESSURE], "120/80");
        assert_eq!(values[BLOOD_GROUP], "B-");
        assert_eq!(values[BLOOD_SUGAR], "");
        assert_eq!(values[WEIGHT], "70");
        assert_eq!(values[HEIGHT_FT], "5'9\"");
        assert_eq!(values[BMI], "22.9");
    }

    #[test]
    fn test_row_without_name_is_rejected() {
        let stored = row(&[(NAME, "   "), (AGE, "30"), (GENDER, "Male")]);
        assert_eq!(record_from_row(&stored), Err(RowRejection::MissingName));
    }

    #[test]
    fn test_row_with_bad_age_is_rejected() {
        let stored = row(&[(NAME, "A"), (AGE, "old"), (GENDER, "Male")]);
        assert!(matches!(record_from_row(&stored), Err(RowRejection::Age(_))));
    }

    #[test]
    fn test_row_recomputes_derived_fields() {
        let stored = row(&[
            (NAME, "Fatema"),
            (AGE, "30"),
            (GENDER, "Female"),
            (BLOOD_SUGAR, "12"),
            (WEIGHT, "70"),
            (HEIGHT_CM, "175"),
            (BMI, "99.9"),
            (HEALTH_COMMENTS, "hand edited"),
            (DATE_ADDED, "2024-03-01 09:30:00"),
        ]);

        let record = record_from_row(&stored).unwrap();
        assert_eq!(record.bmi(), Some(22.9));
        assert_eq!(
            record.advisories(),
            [
                "VERY HIGH SUGAR - Diabetic range, see doctor",
                "HEALTHY WEIGHT - Maintain current lifestyle",
            ]
        );
        assert_eq!(record.created_at_text(), "2024-03-01 09:30:00");
    }

    #[test]
    fn test_invalid_optional_value_is_dropped() {
        let stored = row(&[
            (NAME, "Karim"),
            (AGE, "50"),
            (GENDER, "M"),
            (BLOOD_PRESSURE, "999/1"),
            (BLOOD_GROUP, "O+"),
        ]);

        let record = record_from_row(&stored).unwrap();
        assert_eq!(record.blood_pressure(), None);
        assert_eq!(record.blood_group(), Some(BloodGroup::OPositive));
    }

    #[test]
    fn test_format_decimal() {
        assert_eq!(format_decimal(70.0), "70");
        assert_eq!(format_decimal(70.5), "70.5");
        assert_eq!(format_decimal(22.94), "22.9");
    }
}
