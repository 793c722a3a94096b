//! Population summary over a record collection.

use tracing::debug;

use crate::metrics::{categorize_bmi, classify_bp, classify_sugar};
use crate::models::{
    AgeStats, BloodGroup, BloodGroupShare, BloodGroupSummary, BmiCategory, BmiCategoryShare,
    BmiStats, BmiSummary, CountShare, FollowUpCounts, Gender, GenderBreakdown, PatientRecord,
    PopulationSummary, ScreeningCoverage, ScreeningKind, Severity,
};

/// Running tallies collected in one pass over the records.
#[derive(Default)]
struct Tally {
    male: usize,
    female: usize,
    ages: Vec<u8>,
    blood_groups: [usize; BloodGroup::ALL.len()],
    bmi_categories: [usize; BmiCategory::ALL.len()],
    bmi_values: Vec<f64>,
    sugar_tested: usize,
    bp_tested: usize,
    phone_provided: usize,
    follow_up: FollowUpCounts,
}

impl Tally {
    fn add(&mut self, record: &PatientRecord) {
        match record.gender() {
            Gender::Male => self.male += 1,
            Gender::Female => self.female += 1,
        }
        self.ages.push(record.age().years());

        if let Some(group) = record.blood_group() {
            self.blood_groups[group as usize] += 1;
        }

        if let Some(bmi) = record.bmi() {
            let category = categorize_bmi(bmi);
            self.bmi_categories[category as usize] += 1;
            self.bmi_values.push(bmi);
            if category.is_obese() {
                self.follow_up.obese += 1;
            }
        }

        if let Some(bp) = record.blood_pressure() {
            self.bp_tested += 1;
            let severity = classify_bp(bp.systolic(), bp.diastolic()).severity;
            if severity >= Severity::High {
                self.follow_up.high_blood_pressure += 1;
            }
            if severity == Severity::Critical {
                self.follow_up.hypertensive_crisis += 1;
            }
        }

        if let Some(mmol) = record.sugar_mmol() {
            self.sugar_tested += 1;
            if classify_sugar(mmol).severity >= Severity::High {
                self.follow_up.high_sugar += 1;
            }
        }

        if record.has_phone() {
            self.phone_provided += 1;
        }
    }

    fn finish(mut self) -> PopulationSummary {
        let total = self.ages.len();

        let age = age_stats(&mut self.ages);
        let blood_groups = blood_group_summary(&self.blood_groups, total);
        let bmi = bmi_summary(&self.bmi_categories, &self.bmi_values, total);

        let screening = ScreeningKind::ALL
            .into_iter()
            .map(|kind| {
                let completed = match kind {
                    ScreeningKind::BloodGroup => blood_groups.typed,
                    ScreeningKind::BloodSugar => self.sugar_tested,
                    ScreeningKind::BloodPressure => self.bp_tested,
                    ScreeningKind::Bmi => bmi.measured,
                    ScreeningKind::Contact => self.phone_provided,
                };
                ScreeningCoverage {
                    kind,
                    completed: CountShare::of(completed, total),
                }
            })
            .collect();

        PopulationSummary {
            total_patients: total,
            gender: GenderBreakdown {
                male: CountShare::of(self.male, total),
                female: CountShare::of(self.female, total),
            },
            age,
            blood_groups,
            bmi,
            screening,
            follow_up: self.follow_up,
        }
    }
}

/// Summarize a collection. Absent optional fields are left out of the statistic
/// they feed; every percentage is 0 for an empty collection.
pub fn summarize(records: &[PatientRecord]) -> PopulationSummary {
    let mut tally = Tally::default();
    for record in records {
        tally.add(record);
    }

    let summary = tally.finish();
    debug!(
        total = summary.total_patients,
        typed = summary.blood_groups.typed,
        measured = summary.bmi.measured,
        "summarized population"
    );
    summary
}

fn age_stats(ages: &mut [u8]) -> Option<AgeStats> {
    if ages.is_empty() {
        return None;
    }

    ages.sort_unstable();
    let sum: u64 = ages.iter().map(|&a| u64::from(a)).sum();

    Some(AgeStats {
        min: ages[0],
        max: ages[ages.len() - 1],
        mean: sum as f64 / ages.len() as f64,
        median: ages[ages.len() / 2],
    })
}

fn blood_group_summary(counts: &[usize], total: usize) -> BloodGroupSummary {
    let typed: usize = counts.iter().sum();

    let mut groups: Vec<BloodGroupShare> = BloodGroup::ALL
        .into_iter()
        .zip(counts.iter().copied())
        .filter(|(_, count)| *count > 0)
        .map(|(group, count)| BloodGroupShare {
            group,
            share: CountShare::of(count, typed),
        })
        .collect();
    groups.sort_by_key(|g| g.group.label());

    BloodGroupSummary {
        groups,
        typed,
        untyped: total - typed,
    }
}

fn bmi_summary(counts: &[usize], values: &[f64], total: usize) -> BmiSummary {
    let measured = values.len();

    let categories = BmiCategory::ALL
        .into_iter()
        .zip(counts.iter().copied())
        .filter(|(_, count)| *count > 0)
        .map(|(category, count)| BmiCategoryShare {
            category,
            share: CountShare::of(count, measured),
        })
        .collect();

    let stats = (!values.is_empty()).then(|| BmiStats {
        mean: values.iter().sum::<f64>() / measured as f64,
        min: values.iter().copied().fold(f64::INFINITY, f64::min),
        max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    });

    BmiSummary {
        categories,
        stats,
        measured,
        not_measured: total - measured,
    }
}
