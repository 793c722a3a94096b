//! Classification models produced by the metric classifier.

use serde::{Deserialize, Serialize};

/// Clinical urgency attached to a classification, ordered from least to most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    None,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::None => "NONE",
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
            Severity::Critical => "CRITICAL",
        }
    }

    /// Severity that puts a patient in the HIGH alert band.
    pub fn is_high_band(self) -> bool {
        matches!(self, Severity::High | Severity::Critical)
    }

    /// Severity that puts a patient in the MEDIUM alert band.
    pub fn is_medium_band(self) -> bool {
        matches!(self, Severity::Low | Severity::Medium)
    }
}

/// BMI category, declared in ascending BMI order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BmiCategory {
    SeverelyUnderweight,
    Underweight,
    Normal,
    Overweight,
    ObeseI,
    ObeseII,
    ObeseIII,
}

impl BmiCategory {
    /// All categories in ascending BMI order.
    pub const ALL: [BmiCategory; 7] = [
        BmiCategory::SeverelyUnderweight,
        BmiCategory::Underweight,
        BmiCategory::Normal,
        BmiCategory::Overweight,
        BmiCategory::ObeseI,
        BmiCategory::ObeseII,
        BmiCategory::ObeseIII,
    ];

    /// Display label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            BmiCategory::SeverelyUnderweight => "Severely Underweight",
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::ObeseI => "Obese Class I",
            BmiCategory::ObeseII => "Obese Class II",
            BmiCategory::ObeseIII => "Obese Class III",
        }
    }

    /// Whether the category counts as obesity.
    pub fn is_obese(self) -> bool {
        self >= BmiCategory::ObeseI
    }
}

/// Blood pressure band. Variants are the rule tags of the BP cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BpCategory {
    HypertensiveCrisis,
    High,
    SlightlyHigh,
    Elevated,
    Normal,
    Low,
    Unclassified,
}

/// Blood sugar band (mmol/L).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SugarCategory {
    Low,
    Normal,
    Borderline,
    PreDiabetic,
    Diabetic,
    /// Value outside every band (only reachable with a non-finite reading).
    Unclassified,
}

/// Informational age band. Carries no severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeBand {
    Senior,
    Infant,
    Child,
    Adolescent,
}

/// Result of classifying a single vital.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification<C> {
    /// Metric-specific category
    pub category: C,
    /// Clinical urgency
    pub severity: Severity,
    /// Human-readable recommendation
    pub advisory: &'static str,
}

pub type BmiClassification = Classification<BmiCategory>;
pub type BpClassification = Classification<BpCategory>;
pub type SugarClassification = Classification<SugarCategory>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::None < Severity::Low);
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::High < Severity::Critical);
        assert_eq!(
            [Severity::Low, Severity::Critical, Severity::None].iter().max(),
            Some(&Severity::Critical)
        );
    }

    #[test]
    fn test_alert_bands_are_disjoint() {
        for severity in [
            Severity::None,
            Severity::Low,
            Severity::Medium,
            Severity::High,
            Severity::Critical,
        ] {
            assert!(!(severity.is_high_band() && severity.is_medium_band()));
        }
        assert!(!Severity::None.is_high_band());
        assert!(!Severity::None.is_medium_band());
    }

    #[test]
    fn test_bmi_obese_categories() {
        assert!(!BmiCategory::Overweight.is_obese());
        assert!(BmiCategory::ObeseI.is_obese());
        assert!(BmiCategory::ObeseIII.is_obese());
        assert_eq!(BmiCategory::ObeseII.label(), "Obese Class II");
    }
}
