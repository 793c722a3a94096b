//! Patient record models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::intake::ValidationError;

/// Timestamp format used for `Date Added`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Patient age in whole years, always within 0..=120.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Age(u8);

impl Age {
    pub const MAX: u8 = 120;

    pub fn new(years: u8) -> Result<Self, ValidationError> {
        if years <= Self::MAX {
            Ok(Self(years))
        } else {
            Err(ValidationError::AgeOutOfRange(years.to_string()))
        }
    }

    pub fn years(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Age {
    type Error = ValidationError;

    fn try_from(years: u8) -> Result<Self, Self::Error> {
        Age::new(years)
    }
}

impl From<Age> for u8 {
    fn from(age: Age) -> Self {
        age.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl FromStr for Gender {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "M" | "MALE" => Ok(Gender::Male),
            "F" | "FEMALE" => Ok(Gender::Female),
            _ => Err(ValidationError::Gender(s.to_string())),
        }
    }
}

/// ABO/Rh blood group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BloodGroup {
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
}

impl BloodGroup {
    pub const ALL: [BloodGroup; 8] = [
        BloodGroup::APositive,
        BloodGroup::ANegative,
        BloodGroup::BPositive,
        BloodGroup::BNegative,
        BloodGroup::AbPositive,
        BloodGroup::AbNegative,
        BloodGroup::OPositive,
        BloodGroup::ONegative,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BloodGroup::APositive => "A+",
            BloodGroup::ANegative => "A-",
            BloodGroup::BPositive => "B+",
            BloodGroup::BNegative => "B-",
            BloodGroup::AbPositive => "AB+",
            BloodGroup::AbNegative => "AB-",
            BloodGroup::OPositive => "O+",
            BloodGroup::ONegative => "O-",
        }
    }
}

impl fmt::Display for BloodGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BloodGroup {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        BloodGroup::ALL
            .into_iter()
            .find(|group| group.label() == upper)
            .ok_or_else(|| ValidationError::BloodGroup(s.to_string()))
    }
}

/// Blood pressure pair in mmHg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BloodPressure {
    systolic: u16,
    diastolic: u16,
}

impl BloodPressure {
    pub const SYSTOLIC_RANGE: (u16, u16) = (50, 250);
    pub const DIASTOLIC_RANGE: (u16, u16) = (30, 150);

    /// Create a reading; systolic 50-250, diastolic 30-150, systolic above diastolic.
    pub fn new(systolic: u16, diastolic: u16) -> Result<Self, ValidationError> {
        let (s_min, s_max) = Self::SYSTOLIC_RANGE;
        let (d_min, d_max) = Self::DIASTOLIC_RANGE;
        if (s_min..=s_max).contains(&systolic)
            && (d_min..=d_max).contains(&diastolic)
            && systolic > diastolic
        {
            Ok(Self {
                systolic,
                diastolic,
            })
        } else {
            Err(ValidationError::BloodPressureRange {
                systolic,
                diastolic,
            })
        }
    }

    pub fn systolic(&self) -> u16 {
        self.systolic
    }

    pub fn diastolic(&self) -> u16 {
        self.diastolic
    }
}

impl fmt::Display for BloodPressure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.systolic, self.diastolic)
    }
}

/// Canonical patient record.
///
/// Only the record normalizer creates records, so `bmi` is present exactly when
/// both weight and height are, and `advisories` always reflect the stored vitals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientRecord {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) age: Age,
    pub(crate) gender: Gender,
    pub(crate) phone: String,
    pub(crate) blood_pressure: Option<BloodPressure>,
    pub(crate) blood_group: Option<BloodGroup>,
    pub(crate) sugar_mmol: Option<f64>,
    pub(crate) weight_kg: Option<f64>,
    pub(crate) height_cm: Option<f64>,
    pub(crate) bmi: Option<f64>,
    pub(crate) advisories: Vec<String>,
    pub(crate) created_at: NaiveDateTime,
}

impl PatientRecord {
    /// Local UUID, used as the alert patient reference
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> Age {
        self.age
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    /// Normalized phone, empty when not provided
    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn has_phone(&self) -> bool {
        !self.phone.is_empty()
    }

    pub fn blood_pressure(&self) -> Option<BloodPressure> {
        self.blood_pressure
    }

    pub fn blood_group(&self) -> Option<BloodGroup> {
        self.blood_group
    }

    pub fn sugar_mmol(&self) -> Option<f64> {
        self.sugar_mmol
    }

    pub fn weight_kg(&self) -> Option<f64> {
        self.weight_kg
    }

    pub fn height_cm(&self) -> Option<f64> {
        self.height_cm
    }

    pub fn bmi(&self) -> Option<f64> {
        self.bmi
    }

    /// Advisories in BP, sugar, BMI, age-band order.
    pub fn advisories(&self) -> &[String] {
        &self.advisories
    }

    /// Advisories joined with `separator`.
    pub fn joined_advisories(&self, separator: &str) -> String {
        self.advisories.join(separator)
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    /// `Date Added` text.
    pub fn created_at_text(&self) -> String {
        self.created_at.format(TIMESTAMP_FORMAT).to_string()
    }
}
