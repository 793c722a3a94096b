//! Record normalizer: typed intake fields → canonical [`PatientRecord`].

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::validation::{self, ValidationResult};
use crate::metrics::{
    age_band, classify_bmi, classify_bp, classify_sugar, compute_bmi, round_to_tenth,
};
use crate::models::{Age, BloodGroup, BloodPressure, Gender, PatientRecord};

/// Raw prompt answers, one string per field. Blank optional fields are skipped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawIntake {
    pub name: String,
    pub age: String,
    pub gender: String,
    pub phone: String,
    pub blood_pressure: String,
    pub blood_group: String,
    pub blood_sugar: String,
    pub weight: String,
    pub height: String,
}

/// Validated intake fields.
///
/// Built by [`IntakeFields::from_raw`] or by [`IntakeFields::new`] plus the
/// `with_*` setters. The setters do not range check: weight and height passed to
/// them must be positive, or the record loses its BMI.
#[derive(Debug, Clone, PartialEq)]
pub struct IntakeFields {
    pub(crate) name: String,
    pub(crate) age: Age,
    pub(crate) gender: Gender,
    pub(crate) phone: String,
    pub(crate) blood_pressure: Option<BloodPressure>,
    pub(crate) blood_group: Option<BloodGroup>,
    pub(crate) sugar_mmol: Option<f64>,
    pub(crate) weight_kg: Option<f64>,
    pub(crate) height_cm: Option<f64>,
}

impl IntakeFields {
    /// Fields with only the required values set.
    pub fn new(name: impl Into<String>, age: Age, gender: Gender) -> Self {
        Self {
            name: name.into(),
            age,
            gender,
            phone: String::new(),
            blood_pressure: None,
            blood_group: None,
            sugar_mmol: None,
            weight_kg: None,
            height_cm: None,
        }
    }

    /// Validate every raw field, stopping at the first invalid one.
    pub fn from_raw(raw: &RawIntake) -> ValidationResult<Self> {
        Ok(Self {
            name: validation::parse_name(&raw.name)?,
            age: validation::parse_age(&raw.age)?,
            gender: validation::parse_gender(&raw.gender)?,
            phone: validation::parse_phone(&raw.phone),
            blood_pressure: validation::parse_blood_pressure(&raw.blood_pressure)?,
            blood_group: validation::parse_blood_group(&raw.blood_group)?,
            sugar_mmol: validation::parse_sugar(&raw.blood_sugar)?,
            weight_kg: validation::parse_weight(&raw.weight)?,
            height_cm: validation::parse_height(&raw.height)?,
        })
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    pub fn with_blood_pressure(mut self, bp: BloodPressure) -> Self {
        self.blood_pressure = Some(bp);
        self
    }

    pub fn with_blood_group(mut self, group: BloodGroup) -> Self {
        self.blood_group = Some(group);
        self
    }

    pub fn with_sugar(mut self, mmol: f64) -> Self {
        self.sugar_mmol = Some(mmol);
        self
    }

    pub fn with_weight(mut self, kg: f64) -> Self {
        self.weight_kg = Some(kg);
        self
    }

    pub fn with_height(mut self, cm: f64) -> Self {
        self.height_cm = Some(cm);
        self
    }
}

/// Build a record timestamped now.
pub fn build_record(fields: IntakeFields) -> PatientRecord {
    build_record_at(fields, Local::now().naive_local())
}

/// Build a record with an explicit creation time (used when loading stored rows).
///
/// Fields are assumed validated; weight and height must be positive when present.
/// Sugar, weight and height are rounded to one decimal, the precision they are
/// stored with, before BMI and advisories are derived. BMI is derived when weight
/// and height are both present, and advisories are collected in BP, sugar, BMI,
/// age-band order.
pub fn build_record_at(fields: IntakeFields, created_at: NaiveDateTime) -> PatientRecord {
    let sugar_mmol = fields.sugar_mmol.map(round_to_tenth);
    let weight_kg = fields.weight_kg.map(round_to_tenth);
    let height_cm = fields.height_cm.map(round_to_tenth);

    let bmi = match (weight_kg, height_cm) {
        (Some(weight), Some(height)) => compute_bmi(weight, height),
        _ => None,
    };

    let advisories = derive_advisories(fields.blood_pressure, sugar_mmol, bmi, fields.age.years());

    let record = PatientRecord {
        id: uuid::Uuid::new_v4().to_string(),
        name: fields.name,
        age: fields.age,
        gender: fields.gender,
        phone: fields.phone,
        blood_pressure: fields.blood_pressure,
        blood_group: fields.blood_group,
        sugar_mmol,
        weight_kg,
        height_cm,
        bmi,
        advisories,
        created_at,
    };

    debug!(
        id = %record.id,
        advisories = record.advisories.len(),
        bmi = ?record.bmi,
        "built patient record"
    );

    record
}

fn derive_advisories(
    blood_pressure: Option<BloodPressure>,
    sugar_mmol: Option<f64>,
    bmi: Option<f64>,
    age: u8,
) -> Vec<String> {
    [
        blood_pressure.map(|bp| classify_bp(bp.systolic(), bp.diastolic()).advisory),
        sugar_mmol.map(|mmol| classify_sugar(mmol).advisory),
        bmi.map(|value| classify_bmi(value).advisory),
        age_band(age).map(|band| band.advisory()),
    ]
    .into_iter()
    .flatten()
    .map(str::to_string)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adult(name: &str) -> IntakeFields {
        IntakeFields::new(name, Age::new(35).unwrap(), Gender::Female)
    }

    #[test]
    fn test_minimal_record() {
        let record = build_record(adult("Ayesha"));
        assert_eq!(record.name(), "Ayesha");
        assert_eq!(record.bmi(), None);
        assert!(record.advisories().is_empty());
        assert_eq!(record.id().len(), 36);
    }

    #[test]
    fn test_bmi_requires_weight_and_height() {
        let weight_only = build_record(adult("A").with_weight(70.0));
        assert_eq!(weight_only.bmi(), None);

        let height_only = build_record(adult("B").with_height(175.0));
        assert_eq!(height_only.bmi(), None);

        let both = build_record(adult("C").with_weight(70.0).with_height(175.0));
        assert_eq!(both.bmi(), Some(22.9));
    }

    #[test]
    fn test_advisory_order() {
        let fields = IntakeFields::new("Karim", Age::new(65).unwrap(), Gender::Male)
            .with_blood_pressure(BloodPressure::new(150, 95).unwrap())
            .with_sugar(8.0)
            .with_weight(80.0)
            .with_height(170.0);

        let record = build_record(fields);
        assert_eq!(
            record.advisories(),
            [
                "HIGH BP - Immediate medical attention",
                "HIGH SUGAR - Pre-diabetic range",
                "OVERWEIGHT - Diet and exercise recommended",
                "SENIOR - Regular health checkups recommended",
            ]
        );
        assert_eq!(record.joined_advisories(" | ").matches(" | ").count(), 3);
    }

    #[test]
    fn test_from_raw() {
        let raw = RawIntake {
            name: "nadia islam".into(),
            age: "8".into(),
            gender: "f".into(),
            phone: "01812345678".into(),
            blood_pressure: "".into(),
            blood_group: "b+".into(),
            blood_sugar: "5.0".into(),
            weight: "25".into(),
            height: "4'2".into(),
        };

        let fields = IntakeFields::from_raw(&raw).unwrap();
        assert_eq!(fields.name, "Nadia Islam");
        assert_eq!(fields.gender, Gender::Female);
        assert_eq!(fields.phone, "+8801812345678");
        assert_eq!(fields.blood_pressure, None);
        assert_eq!(fields.blood_group, Some(BloodGroup::BPositive));

        let record = build_record(fields);
        assert_eq!(
            record.advisories().last().map(String::as_str),
            Some("CHILD - Growth monitoring important")
        );
    }

    #[test]
    fn test_from_raw_rejects_invalid_field() {
        let raw = RawIntake {
            name: "Test".into(),
            age: "30".into(),
            gender: "M".into(),
            blood_sugar: "99".into(),
            ..Default::default()
        };
        assert!(matches!(
            IntakeFields::from_raw(&raw),
            Err(validation::ValidationError::BloodSugar(_))
        ));
    }

    #[test]
    fn test_vitals_rounded_before_classification() {
        let record = build_record(adult("Rina").with_sugar(7.76).with_weight(61.04).with_height(175.26));
        assert_eq!(record.sugar_mmol(), Some(7.8));
        assert_eq!(record.weight_kg(), Some(61.0));
        assert_eq!(record.height_cm(), Some(175.3));
        assert_eq!(record.bmi(), compute_bmi(61.0, 175.3));
        assert_eq!(record.advisories()[0], "HIGH SUGAR - Pre-diabetic range");
    }

    #[test]
    fn test_from_raw_rejects_zero_height() {
        let raw = RawIntake {
            name: "Test".into(),
            age: "30".into(),
            gender: "M".into(),
            weight: "60".into(),
            height: "0".into(),
            ..Default::default()
        };
        assert!(matches!(
            IntakeFields::from_raw(&raw),
            Err(validation::ValidationError::Height(_))
        ));
    }
}
