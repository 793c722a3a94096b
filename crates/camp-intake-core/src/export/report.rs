//! JSON report for a renderer: summary plus alert list.

use chrono::Local;
use serde::Serialize;

use crate::models::{AlertCounts, AlertEntry, PatientRecord, PopulationSummary, TIMESTAMP_FORMAT};
use crate::report::{build_alerts, summarize};

pub const REPORT_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub format_version: u32,
    pub generated_at: String,
    pub record_count: usize,
}

/// Summary and alerts computed from one snapshot of records.
#[derive(Debug, Clone, Serialize)]
pub struct ReportExport {
    pub metadata: ReportMetadata,
    pub summary: PopulationSummary,
    pub alert_counts: AlertCounts,
    pub alerts: Vec<AlertEntry>,
}

impl ReportExport {
    pub fn from_records(records: &[PatientRecord]) -> Self {
        let alerts = build_alerts(records);

        Self {
            metadata: ReportMetadata {
                format_version: REPORT_FORMAT_VERSION,
                generated_at: Local::now().format(TIMESTAMP_FORMAT).to_string(),
                record_count: records.len(),
            },
            summary: summarize(records),
            alert_counts: AlertCounts::from_alerts(&alerts),
            alerts,
        }
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
