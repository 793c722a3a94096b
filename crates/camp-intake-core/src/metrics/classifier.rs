//! Vital sign classification.
//!
//! Every classifier is a pure, total function returning a category, a severity and
//! an advisory. Blood pressure and age bands are first-match cascades over the
//! ordered rule lists [`BP_RULES`] and [`AGE_BAND_RULES`]; the ranges overlap, so
//! the list order is part of the contract.

use crate::models::{
    AgeBand, BmiCategory, BmiClassification, BpCategory, BpClassification, Classification,
    Severity, SugarCategory, SugarClassification,
};

/// Blood pressure rules in evaluation order. [`BpCategory::Unclassified`] is the fallback.
pub const BP_RULES: [BpCategory; 6] = [
    BpCategory::HypertensiveCrisis,
    BpCategory::High,
    BpCategory::SlightlyHigh,
    BpCategory::Elevated,
    BpCategory::Normal,
    BpCategory::Low,
];

/// Age band rules in evaluation order. No match means no advisory.
pub const AGE_BAND_RULES: [AgeBand; 4] = [
    AgeBand::Senior,
    AgeBand::Infant,
    AgeBand::Child,
    AgeBand::Adolescent,
];

/// Exclusive upper bounds of each BMI category below [`BmiCategory::ObeseIII`].
const BMI_UPPER_BOUNDS: [(f64, BmiCategory); 6] = [
    (16.0, BmiCategory::SeverelyUnderweight),
    (18.5, BmiCategory::Underweight),
    (25.0, BmiCategory::Normal),
    (30.0, BmiCategory::Overweight),
    (35.0, BmiCategory::ObeseI),
    (40.0, BmiCategory::ObeseII),
];

/// Exclusive upper bounds of each sugar band below [`SugarCategory::Diabetic`] (mmol/L).
const SUGAR_UPPER_BOUNDS: [(f64, SugarCategory); 4] = [
    (3.9, SugarCategory::Low),
    (5.6, SugarCategory::Normal),
    (7.8, SugarCategory::Borderline),
    (11.1, SugarCategory::PreDiabetic),
];

impl BpCategory {
    /// Whether this rule's range contains the reading.
    pub fn matches(self, systolic: u16, diastolic: u16) -> bool {
        let (s, d) = (systolic, diastolic);
        match self {
            BpCategory::HypertensiveCrisis => s >= 180 || d >= 120,
            BpCategory::High => (140..=179).contains(&s) || (90..=119).contains(&d),
            BpCategory::SlightlyHigh => (130..=139).contains(&s) || (80..=89).contains(&d),
            BpCategory::Elevated => (120..=129).contains(&s) && d < 80,
            BpCategory::Normal => s < 120 && d < 80,
            BpCategory::Low => s < 90 || d < 60,
            BpCategory::Unclassified => true,
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            BpCategory::HypertensiveCrisis => Severity::Critical,
            BpCategory::High => Severity::High,
            BpCategory::SlightlyHigh => Severity::Medium,
            BpCategory::Elevated => Severity::Low,
            BpCategory::Normal => Severity::None,
            BpCategory::Low => Severity::Medium,
            BpCategory::Unclassified => Severity::None,
        }
    }

    pub fn advisory(self) -> &'static str {
        match self {
            BpCategory::HypertensiveCrisis => {
                "HYPERTENSIVE CRISIS - Emergency medical care needed"
            }
            BpCategory::High => "HIGH BP - Immediate medical attention",
            BpCategory::SlightlyHigh => {
                "BP slightly higher than normal - Consider consulting doctor"
            }
            BpCategory::Elevated => "ELEVATED BP - Lifestyle changes recommended",
            BpCategory::Normal => "BP is normal",
            BpCategory::Low => "LOW BP - BP is lower than normal",
            BpCategory::Unclassified => "BP recorded",
        }
    }
}

impl SugarCategory {
    pub fn severity(self) -> Severity {
        match self {
            SugarCategory::Low => Severity::Medium,
            SugarCategory::Normal => Severity::None,
            SugarCategory::Borderline => Severity::Low,
            SugarCategory::PreDiabetic => Severity::High,
            SugarCategory::Diabetic => Severity::Critical,
            SugarCategory::Unclassified => Severity::None,
        }
    }

    pub fn advisory(self) -> &'static str {
        match self {
            SugarCategory::Low => "LOW SUGAR - Hypoglycemia risk",
            SugarCategory::Normal => "NORMAL SUGAR - Good glucose level",
            SugarCategory::Borderline => "BORDERLINE - Monitor glucose levels",
            SugarCategory::PreDiabetic => "HIGH SUGAR - Pre-diabetic range",
            SugarCategory::Diabetic => "VERY HIGH SUGAR - Diabetic range, see doctor",
            SugarCategory::Unclassified => "Sugar level recorded",
        }
    }
}

impl BmiCategory {
    /// Severity rises with the distance from [`BmiCategory::Normal`] on either side.
    pub fn severity(self) -> Severity {
        match self {
            BmiCategory::SeverelyUnderweight => Severity::High,
            BmiCategory::Underweight => Severity::Low,
            BmiCategory::Normal => Severity::None,
            BmiCategory::Overweight => Severity::Low,
            BmiCategory::ObeseI => Severity::Medium,
            BmiCategory::ObeseII => Severity::High,
            BmiCategory::ObeseIII => Severity::Critical,
        }
    }

    pub fn advisory(self) -> &'static str {
        match self {
            BmiCategory::SeverelyUnderweight => {
                "SEVERELY UNDERWEIGHT - Nutritional support needed"
            }
            BmiCategory::Underweight => "UNDERWEIGHT - Increase caloric intake",
            BmiCategory::Normal => "HEALTHY WEIGHT - Maintain current lifestyle",
            BmiCategory::Overweight => "OVERWEIGHT - Diet and exercise recommended",
            BmiCategory::ObeseI => "OBESE - Medical consultation advised",
            BmiCategory::ObeseII => "SEVERELY OBESE - Immediate medical attention",
            BmiCategory::ObeseIII => "MORBIDLY OBESE - Urgent medical intervention",
        }
    }
}

impl AgeBand {
    pub fn matches(self, age: u8) -> bool {
        match self {
            AgeBand::Senior => age >= 60,
            AgeBand::Infant => age <= 2,
            AgeBand::Child => (3..=12).contains(&age),
            AgeBand::Adolescent => (13..=19).contains(&age),
        }
    }

    pub fn advisory(self) -> &'static str {
        match self {
            AgeBand::Senior => "SENIOR - Regular health checkups recommended",
            AgeBand::Infant => "INFANT - Pediatric care recommended",
            AgeBand::Child => "CHILD - Growth monitoring important",
            AgeBand::Adolescent => "ADOLESCENT - Developmental checkups advised",
        }
    }
}

/// Classify a blood pressure reading; the first matching rule in [`BP_RULES`] wins.
pub fn classify_bp(systolic: u16, diastolic: u16) -> BpClassification {
    let category = BP_RULES
        .into_iter()
        .find(|rule| rule.matches(systolic, diastolic))
        .unwrap_or(BpCategory::Unclassified);

    Classification {
        category,
        severity: category.severity(),
        advisory: category.advisory(),
    }
}

/// Classify a blood sugar value in mmol/L.
pub fn classify_sugar(mmol: f64) -> SugarClassification {
    let category = if mmol.is_nan() {
        SugarCategory::Unclassified
    } else {
        SUGAR_UPPER_BOUNDS
            .into_iter()
            .find(|(upper, _)| mmol < *upper)
            .map(|(_, category)| category)
            .unwrap_or(SugarCategory::Diabetic)
    };

    Classification {
        category,
        severity: category.severity(),
        advisory: category.advisory(),
    }
}

/// BMI category; lower bounds are inclusive (`18.5` is Normal).
pub fn categorize_bmi(bmi: f64) -> BmiCategory {
    BMI_UPPER_BOUNDS
        .into_iter()
        .find(|(upper, _)| bmi < *upper)
        .map(|(_, category)| category)
        .unwrap_or(BmiCategory::ObeseIII)
}

pub fn classify_bmi(bmi: f64) -> BmiClassification {
    let category = categorize_bmi(bmi);
    Classification {
        category,
        severity: category.severity(),
        advisory: category.advisory(),
    }
}

/// Age band of a patient, if any; the first matching rule in [`AGE_BAND_RULES`] wins.
pub fn age_band(age: u8) -> Option<AgeBand> {
    AGE_BAND_RULES.into_iter().find(|band| band.matches(age))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmi_boundaries() {
        assert_eq!(categorize_bmi(15.99), BmiCategory::SeverelyUnderweight);
        assert_eq!(categorize_bmi(16.0), BmiCategory::Underweight);
        assert_eq!(categorize_bmi(18.49), BmiCategory::Underweight);
        assert_eq!(categorize_bmi(18.5), BmiCategory::Normal);
        assert_eq!(categorize_bmi(24.99), BmiCategory::Normal);
        assert_eq!(categorize_bmi(25.0), BmiCategory::Overweight);
        assert_eq!(categorize_bmi(30.0), BmiCategory::ObeseI);
        assert_eq!(categorize_bmi(35.0), BmiCategory::ObeseII);
        assert_eq!(categorize_bmi(39.99), BmiCategory::ObeseII);
        assert_eq!(categorize_bmi(40.0), BmiCategory::ObeseIII);
    }

    #[test]
    fn test_bmi_severity_escalates_away_from_normal() {
        let above: Vec<Severity> = BmiCategory::ALL[2..].iter().map(|c| c.severity()).collect();
        assert!(above.windows(2).all(|w| w[0] < w[1]));

        let below: Vec<Severity> = BmiCategory::ALL[..3].iter().rev().map(|c| c.severity()).collect();
        assert!(below.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_bp_crisis() {
        let result = classify_bp(190, 100);
        assert_eq!(result.category, BpCategory::HypertensiveCrisis);
        assert_eq!(result.severity, Severity::Critical);

        assert_eq!(classify_bp(150, 120).category, BpCategory::HypertensiveCrisis);
    }

    #[test]
    fn test_bp_first_match_wins() {
        // Diastolic 95 hits the HIGH band before the 80-89 band is considered
        let result = classify_bp(135, 95);
        assert_eq!(result.category, BpCategory::High);
        assert_eq!(result.severity, Severity::High);
        assert_eq!(result.advisory, "HIGH BP - Immediate medical attention");
    }

    #[test]
    fn test_bp_bands() {
        assert_eq!(classify_bp(135, 70).category, BpCategory::SlightlyHigh);
        assert_eq!(classify_bp(110, 85).category, BpCategory::SlightlyHigh);
        assert_eq!(classify_bp(125, 75).category, BpCategory::Elevated);
        assert_eq!(classify_bp(125, 75).severity, Severity::Low);
        assert_eq!(classify_bp(115, 75).category, BpCategory::Normal);
        // Normal is checked before Low, so a low reading with d < 80 reads as normal
        assert_eq!(classify_bp(85, 55).category, BpCategory::Normal);
    }

    #[test]
    fn test_bp_rule_order() {
        assert_eq!(BP_RULES[0], BpCategory::HypertensiveCrisis);
        assert_eq!(BP_RULES[BP_RULES.len() - 1], BpCategory::Low);
        assert!(BpCategory::Unclassified.matches(0, 0));
    }

    #[test]
    fn test_sugar_bands() {
        assert_eq!(classify_sugar(3.8).category, SugarCategory::Low);
        assert_eq!(classify_sugar(3.8).severity, Severity::Medium);
        assert_eq!(classify_sugar(3.9).category, SugarCategory::Normal);
        assert_eq!(classify_sugar(5.6).category, SugarCategory::Borderline);
        assert_eq!(classify_sugar(6.0).severity, Severity::Low);
        assert_eq!(classify_sugar(7.8).category, SugarCategory::PreDiabetic);
        assert_eq!(classify_sugar(11.0).severity, Severity::High);
        assert_eq!(classify_sugar(11.1).category, SugarCategory::Diabetic);
        assert_eq!(classify_sugar(30.0).severity, Severity::Critical);
        assert_eq!(classify_sugar(f64::NAN).category, SugarCategory::Unclassified);
    }

    #[test]
    fn test_age_bands() {
        assert_eq!(age_band(0), Some(AgeBand::Infant));
        assert_eq!(age_band(2), Some(AgeBand::Infant));
        assert_eq!(age_band(3), Some(AgeBand::Child));
        assert_eq!(age_band(12), Some(AgeBand::Child));
        assert_eq!(age_band(13), Some(AgeBand::Adolescent));
        assert_eq!(age_band(19), Some(AgeBand::Adolescent));
        assert_eq!(age_band(20), None);
        assert_eq!(age_band(59), None);
        assert_eq!(age_band(60), Some(AgeBand::Senior));
        assert_eq!(age_band(120), Some(AgeBand::Senior));
    }
}
