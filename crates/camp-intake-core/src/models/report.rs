//! Population report models consumed by renderers.

use serde::Serialize;

use super::{BloodGroup, BmiCategory, Severity};

/// A count with its share of some denominator, as a percentage (0-100).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CountShare {
    pub count: usize,
    pub percentage: f64,
}

impl CountShare {
    /// Percentage is 0 when the denominator is 0.
    pub fn of(count: usize, denominator: usize) -> Self {
        let percentage = if denominator == 0 {
            0.0
        } else {
            count as f64 / denominator as f64 * 100.0
        };
        Self { count, percentage }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenderBreakdown {
    pub male: CountShare,
    pub female: CountShare,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeStats {
    pub min: u8,
    pub max: u8,
    pub mean: f64,
    /// Upper-middle element of the sorted ages
    pub median: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BloodGroupShare {
    pub group: BloodGroup,
    /// Share of typed records, not of the population
    pub share: CountShare,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BloodGroupSummary {
    /// Non-zero groups, sorted by label
    pub groups: Vec<BloodGroupShare>,
    pub typed: usize,
    pub untyped: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BmiCategoryShare {
    pub category: BmiCategory,
    /// Share of measured records
    pub share: CountShare,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BmiStats {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BmiSummary {
    /// Non-zero categories in ascending BMI order
    pub categories: Vec<BmiCategoryShare>,
    pub stats: Option<BmiStats>,
    pub measured: usize,
    pub not_measured: usize,
}

/// Optional field whose presence counts toward screening coverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ScreeningKind {
    BloodGroup,
    BloodSugar,
    BloodPressure,
    Bmi,
    Contact,
}

impl ScreeningKind {
    pub const ALL: [ScreeningKind; 5] = [
        ScreeningKind::BloodGroup,
        ScreeningKind::BloodSugar,
        ScreeningKind::BloodPressure,
        ScreeningKind::Bmi,
        ScreeningKind::Contact,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ScreeningKind::BloodGroup => "Blood Group Testing",
            ScreeningKind::BloodSugar => "Blood Sugar Testing",
            ScreeningKind::BloodPressure => "Blood Pressure Check",
            ScreeningKind::Bmi => "BMI Calculation",
            ScreeningKind::Contact => "Contact Information",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreeningCoverage {
    pub kind: ScreeningKind,
    /// Share of the whole population
    pub completed: CountShare,
}

/// Counts of patients needing follow-up, per condition.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FollowUpCounts {
    pub high_blood_pressure: usize,
    pub high_sugar: usize,
    pub obese: usize,
    pub hypertensive_crisis: usize,
}

impl FollowUpCounts {
    /// Sum of the high BP, high sugar and obesity counts.
    pub fn total(&self) -> usize {
        self.high_blood_pressure + self.high_sugar + self.obese
    }
}

/// Derived view over the full record collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopulationSummary {
    pub total_patients: usize,
    pub gender: GenderBreakdown,
    pub age: Option<AgeStats>,
    pub blood_groups: BloodGroupSummary,
    pub bmi: BmiSummary,
    pub screening: Vec<ScreeningCoverage>,
    pub follow_up: FollowUpCounts,
}

impl PopulationSummary {
    pub fn coverage(&self, kind: ScreeningKind) -> Option<&ScreeningCoverage> {
        self.screening.iter().find(|c| c.kind == kind)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertPriority {
    High,
    Medium,
}

impl AlertPriority {
    pub fn label(self) -> &'static str {
        match self {
            AlertPriority::High => "HIGH",
            AlertPriority::Medium => "MEDIUM",
        }
    }
}

/// Reference back to the record an alert was raised for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatientRef {
    pub id: String,
    pub name: String,
    pub age: u8,
    pub phone: String,
}

/// A triaged patient needing follow-up.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertEntry {
    pub patient: PatientRef,
    pub priority: AlertPriority,
    /// Highest severity across BP, sugar and BMI
    pub severity: Severity,
    /// Advisories of every non-normal classification, in BP, sugar, BMI order
    pub reasons: Vec<String>,
}

/// Band counts for an alert list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AlertCounts {
    pub high: usize,
    pub medium: usize,
}

impl AlertCounts {
    pub fn from_alerts(alerts: &[AlertEntry]) -> Self {
        alerts.iter().fold(Self::default(), |mut counts, alert| {
            match alert.priority {
                AlertPriority::High => counts.high += 1,
                AlertPriority::Medium => counts.medium += 1,
            }
            counts
        })
    }

    pub fn total(&self) -> usize {
        self.high + self.medium
    }
}
