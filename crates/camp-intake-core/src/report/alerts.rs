//! Priority-ranked alert list.
//!
//! Priorities are recomputed from each record's raw vitals, never read from the
//! stored advisory text.

use tracing::debug;

use crate::metrics::{classify_bmi, classify_bp, classify_sugar};
use crate::models::{AlertEntry, AlertPriority, PatientRecord, PatientRef, Severity};

/// Classify one record's BP, sugar and BMI and decide its alert band, if any.
///
/// Any HIGH or CRITICAL result makes the record HIGH priority; otherwise any LOW
/// or MEDIUM result makes it MEDIUM priority.
pub fn triage(record: &PatientRecord) -> Option<AlertEntry> {
    let findings: Vec<(Severity, &'static str)> = [
        record
            .blood_pressure()
            .map(|bp| classify_bp(bp.systolic(), bp.diastolic()))
            .map(|c| (c.severity, c.advisory)),
        record
            .sugar_mmol()
            .map(classify_sugar)
            .map(|c| (c.severity, c.advisory)),
        record
            .bmi()
            .map(classify_bmi)
            .map(|c| (c.severity, c.advisory)),
    ]
    .into_iter()
    .flatten()
    .filter(|(severity, _)| *severity > Severity::None)
    .collect();

    let severity = findings.iter().map(|(s, _)| *s).max()?;
    let priority = if severity.is_high_band() {
        AlertPriority::High
    } else {
        AlertPriority::Medium
    };

    Some(AlertEntry {
        patient: PatientRef {
            id: record.id().to_string(),
            name: record.name().to_string(),
            age: record.age().years(),
            phone: record.phone().to_string(),
        },
        priority,
        severity,
        reasons: findings
            .into_iter()
            .map(|(_, advisory)| advisory.to_string())
            .collect(),
    })
}

/// Build the alert list: every HIGH entry, then every MEDIUM entry, each group
/// in input order. A record appears at most once.
pub fn build_alerts(records: &[PatientRecord]) -> Vec<AlertEntry> {
    let (high, medium): (Vec<AlertEntry>, Vec<AlertEntry>) = records
        .iter()
        .filter_map(triage)
        .partition(|alert| alert.priority == AlertPriority::High);

    debug!(high = high.len(), medium = medium.len(), "built alert list");

    let mut alerts = high;
    alerts.extend(medium);
    alerts
}
