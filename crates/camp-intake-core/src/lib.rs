//! Camp Intake Core Library
//!
//! Offline patient intake for medical screening camps: vitals are classified
//! at capture time and the collection is summarized into a population report
//! with a follow-up alert list.
//!
//! # Architecture
//!
//! ```text
//!   Raw prompt answers (RawIntake)
//!               │
//!         intake::validation
//!               │
//!          IntakeFields
//!               │
//!    ┌──────────▼───────────┐
//!    │   Record Normalizer  │  height → cm, BMI, advisories
//!    │  (metrics::*)        │  (BP, sugar, BMI, age band)
//!    └──────────┬───────────┘
//!               │
//!         PatientRecord ──────────► db (patient_records)
//!               │
//!        RecordCollection
//!               │
//!       ┌───────┴────────┐
//!       ▼                ▼
//!   summarize       build_alerts
//!       │                │
//!       └───────┬────────┘
//!               ▼
//!     export (JSON report, CSV sheet)
//! ```
//!
//! # Modules
//!
//! - [`metrics`]: unit conversion, BMI and the metric classifier
//! - [`models`]: domain types (PatientRecord, Severity, PopulationSummary, etc.)
//! - [`intake`]: field validation, record normalizer and the record collection
//! - [`report`]: population summary and alert triage
//! - [`db`]: SQLite load/store with the canonical column mapping
//! - [`export`]: CSV sheet and JSON report
//! - [`config`]: runtime configuration

pub mod config;
pub mod db;
pub mod export;
pub mod intake;
pub mod metrics;
pub mod models;
pub mod report;

// Re-export commonly used types
pub use config::IntakeConfig;
pub use db::Database;
pub use intake::{build_record, IntakeFields, RawIntake, RecordCollection};
pub use models::{
    AlertEntry, AlertPriority, BloodGroup, BloodPressure, Gender, PatientRecord,
    PopulationSummary, Severity,
};
pub use report::{build_alerts, summarize};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex, RwLock};

use tracing_subscriber::EnvFilter;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum IntakeError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Config error: {0}")]
    ConfigError(String),
}

impl From<db::DbError> for IntakeError {
    fn from(e: db::DbError) -> Self {
        IntakeError::DatabaseError(e.to_string())
    }
}

impl From<intake::ValidationError> for IntakeError {
    fn from(e: intake::ValidationError) -> Self {
        IntakeError::InvalidInput(e.to_string())
    }
}

impl From<serde_json::Error> for IntakeError {
    fn from(e: serde_json::Error) -> Self {
        IntakeError::SerializationError(e.to_string())
    }
}

impl From<config::ConfigError> for IntakeError {
    fn from(e: config::ConfigError) -> Self {
        IntakeError::ConfigError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for IntakeError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        IntakeError::DatabaseError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create a database at the given path and load its records.
#[uniffi::export]
pub fn open_database(path: String) -> Result<Arc<CampIntakeCore>, IntakeError> {
    let config = IntakeConfig {
        database_path: path.into(),
        ..IntakeConfig::default()
    };
    CampIntakeCore::with_config(config).map(Arc::new)
}

/// Open the database named by a JSON config file and install logging with the
/// config's `log_filter`.
#[uniffi::export]
pub fn open_with_config(config_path: String) -> Result<Arc<CampIntakeCore>, IntakeError> {
    let config = IntakeConfig::load(&config_path)?;
    install_subscriber(&config.log_directive(""));
    CampIntakeCore::with_config(config).map(Arc::new)
}

/// Create an in-memory database (for testing).
#[uniffi::export]
pub fn open_database_in_memory() -> Result<Arc<CampIntakeCore>, IntakeError> {
    let db = Database::open_in_memory()?;
    Ok(Arc::new(CampIntakeCore {
        db: Mutex::new(db),
        records: RwLock::new(RecordCollection::new()),
        config: IntakeConfig::default(),
    }))
}

/// Install a `tracing` subscriber. An empty filter uses the default
/// configuration's `log_filter`. Later calls are no-ops.
#[uniffi::export]
pub fn init_logging(filter: String) {
    install_subscriber(&IntakeConfig::default().log_directive(&filter));
}

fn install_subscriber(directive: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directive))
        .try_init();
}

// =========================================================================
// Converters (exported to FFI)
// =========================================================================

#[uniffi::export]
pub fn compute_bmi(weight_kg: f64, height_cm: f64) -> Option<f64> {
    metrics::compute_bmi(weight_kg, height_cm)
}

#[uniffi::export]
pub fn height_to_cm(input: String) -> Option<f64> {
    metrics::height_to_cm(&input)
}

#[uniffi::export]
pub fn cm_to_feet_inches(cm: f64) -> String {
    metrics::cm_to_feet_inches(cm)
}

#[uniffi::export]
pub fn normalize_phone(phone: String) -> String {
    metrics::normalize_phone(&phone)
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe intake session for FFI.
///
/// Appends take the collection write lock; reports and searches share the
/// read lock and always see a consistent snapshot.
#[derive(uniffi::Object)]
pub struct CampIntakeCore {
    db: Mutex<Database>,
    records: RwLock<RecordCollection>,
    config: IntakeConfig,
}

impl CampIntakeCore {
    /// Open the configured database and load its records.
    pub fn with_config(config: IntakeConfig) -> Result<Self, IntakeError> {
        let db = Database::open(&config.database_path)?;
        let records = db.load_collection()?;
        Ok(Self {
            db: Mutex::new(db),
            records: RwLock::new(records),
            config,
        })
    }

    fn matching(
        &self,
        search: impl Fn(&RecordCollection) -> Vec<&PatientRecord>,
    ) -> Result<Vec<FfiPatientRecord>, IntakeError> {
        let records = self.records.read()?;
        let found = search(&records)
            .into_iter()
            .map(FfiPatientRecord::from)
            .collect();
        Ok(found)
    }
}

#[uniffi::export]
impl CampIntakeCore {
    // =========================================================================
    // Intake
    // =========================================================================

    /// Validate, normalize, persist and append one patient.
    pub fn add_patient(&self, raw: FfiRawIntake) -> Result<FfiPatientRecord, IntakeError> {
        let fields = IntakeFields::from_raw(&raw.into())?;
        let record = build_record(fields);

        let mut records = self.records.write()?;
        self.db
            .lock()?
            .insert_record(&record, &self.config.advisory_separator)?;
        Ok(records.push(record).into())
    }

    pub fn patient_count(&self) -> Result<u32, IntakeError> {
        Ok(self.records.read()?.len() as u32)
    }

    /// All records in insertion order.
    pub fn list_patients(&self) -> Result<Vec<FfiPatientRecord>, IntakeError> {
        self.matching(|records| records.iter().collect())
    }

    pub fn get_patient(&self, id: String) -> Result<FfiPatientRecord, IntakeError> {
        let records = self.records.read()?;
        records
            .get(&id)
            .map(FfiPatientRecord::from)
            .ok_or(IntakeError::NotFound(id))
    }

    // =========================================================================
    // Search
    // =========================================================================

    pub fn search_by_name(&self, query: String) -> Result<Vec<FfiPatientRecord>, IntakeError> {
        self.matching(|records| records.search_by_name(&query))
    }

    pub fn search_by_blood_group(
        &self,
        group: String,
    ) -> Result<Vec<FfiPatientRecord>, IntakeError> {
        let group: BloodGroup = group.parse()?;
        self.matching(|records| records.search_by_blood_group(group))
    }

    /// Ages within `min..=max`.
    pub fn search_by_age(&self, min: u8, max: u8) -> Result<Vec<FfiPatientRecord>, IntakeError> {
        self.matching(|records| records.search_by_age(min, max))
    }

    pub fn search_by_condition(
        &self,
        condition: String,
    ) -> Result<Vec<FfiPatientRecord>, IntakeError> {
        self.matching(|records| records.search_by_condition(&condition))
    }

    /// Similar names, best first, using the configured limit and threshold.
    pub fn suggest_names(&self, query: String) -> Result<Vec<FfiNameSuggestion>, IntakeError> {
        let records = self.records.read()?;
        let suggestions = records
            .suggest_names(
                &query,
                self.config.name_suggestion_limit,
                self.config.name_suggestion_threshold,
            )
            .into_iter()
            .map(|s| FfiNameSuggestion {
                record: s.record.into(),
                score: s.score,
            })
            .collect();
        Ok(suggestions)
    }

    // =========================================================================
    // Reports
    // =========================================================================

    /// HIGH alerts first, then MEDIUM, each in insertion order.
    pub fn list_alerts(&self) -> Result<Vec<FfiAlertEntry>, IntakeError> {
        let records = self.records.read()?;
        Ok(build_alerts(records.records())
            .into_iter()
            .map(FfiAlertEntry::from)
            .collect())
    }

    /// Summary and alerts as JSON for a renderer.
    pub fn export_report_json(&self) -> Result<String, IntakeError> {
        let records = self.records.read()?;
        Ok(export::ReportExport::from_records(records.records()).to_json()?)
    }

    /// Record sheet with the canonical columns.
    pub fn export_records_csv(&self) -> Result<String, IntakeError> {
        let records = self.records.read()?;
        Ok(export::records_csv(
            records.records(),
            &self.config.advisory_separator,
        ))
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe raw intake answers.
#[derive(Debug, Clone, Default, uniffi::Record)]
pub struct FfiRawIntake {
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

impl From<FfiRawIntake> for RawIntake {
    fn from(raw: FfiRawIntake) -> Self {
        RawIntake {
            name: raw.name,
            age: raw.age,
            gender: raw.gender,
            phone: raw.phone,
            blood_pressure: raw.blood_pressure,
            blood_group: raw.blood_group,
            blood_sugar: raw.blood_sugar,
            weight: raw.weight,
            height: raw.height,
        }
    }
}

/// FFI-safe patient record.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatientRecord {
    pub id: String,
    pub name: String,
    pub age: u8,
    pub gender: String,
    pub phone: String,
    pub blood_pressure: Option<String>,
    pub blood_group: Option<String>,
    pub sugar_mmol: Option<f64>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub height_ft: Option<String>,
    pub bmi: Option<f64>,
    pub advisories: Vec<String>,
    pub created_at: String,
}

impl From<&PatientRecord> for FfiPatientRecord {
    fn from(record: &PatientRecord) -> Self {
        Self {
            id: record.id().to_string(),
            name: record.name().to_string(),
            age: record.age().years(),
            gender: record.gender().label().to_string(),
            phone: record.phone().to_string(),
            blood_pressure: record.blood_pressure().map(|bp| bp.to_string()),
            blood_group: record.blood_group().map(|g| g.label().to_string()),
            sugar_mmol: record.sugar_mmol(),
            weight_kg: record.weight_kg(),
            height_cm: record.height_cm(),
            height_ft: record.height_cm().map(metrics::cm_to_feet_inches),
            bmi: record.bmi(),
            advisories: record.advisories().to_vec(),
            created_at: record.created_at_text(),
        }
    }
}

/// FFI-safe name suggestion.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNameSuggestion {
    pub record: FfiPatientRecord,
    pub score: f64,
}

/// FFI-safe alert entry.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAlertEntry {
    pub patient_id: String,
    pub name: String,
    pub age: u8,
    pub phone: String,
    pub priority: String,
    pub severity: String,
    pub reasons: Vec<String>,
}

impl From<AlertEntry> for FfiAlertEntry {
    fn from(alert: AlertEntry) -> Self {
        Self {
            patient_id: alert.patient.id,
            name: alert.patient.name,
            age: alert.patient.age,
            phone: alert.patient.phone,
            priority: alert.priority.label().to_string(),
            severity: alert.severity.label().to_string(),
            reasons: alert.reasons,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(name: &str, age: &str, gender: &str) -> FfiRawIntake {
        FfiRawIntake {
            name: name.to_string(),
            age: age.to_string(),
            gender: gender.to_string(),
            ..FfiRawIntake::default()
        }
    }

    #[test]
    fn test_add_and_list_patients() {
        let core = open_database_in_memory().unwrap();
        let added = core
            .add_patient(FfiRawIntake {
                blood_pressure: "150/95".to_string(),
                height: "5'9\"".to_string(),
                weight: "70".to_string(),
                ..raw("  rahim uddin ", "45", "m")
            })
            .unwrap();

        assert_eq!(added.name, "Rahim Uddin");
        assert_eq!(added.gender, "Male");
        assert_eq!(added.blood_pressure.as_deref(), Some("150/95"));
        assert!(added.bmi.is_some());

        let listed = core.list_patients().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, added.id);
        assert_eq!(core.get_patient(added.id.clone()).unwrap().name, "Rahim Uddin");
    }

    #[test]
    fn test_invalid_input_is_rejected() {
        let core = open_database_in_memory().unwrap();
        let result = core.add_patient(raw("", "45", "M"));
        assert!(matches!(result, Err(IntakeError::InvalidInput(_))));

        let result = core.add_patient(raw("Karim", "130", "M"));
        assert!(matches!(result, Err(IntakeError::InvalidInput(_))));
        assert_eq!(core.patient_count().unwrap(), 0);
    }

    #[test]
    fn test_get_missing_patient() {
        let core = open_database_in_memory().unwrap();
        assert!(matches!(
            core.get_patient("nope".to_string()),
            Err(IntakeError::NotFound(_))
        ));
    }

    #[test]
    fn test_alerts_and_exports() {
        let core = open_database_in_memory().unwrap();
        core.add_patient(FfiRawIntake {
            blood_sugar: "6.5".to_string(),
            ..raw("Medium", "30", "F")
        })
        .unwrap();
        core.add_patient(FfiRawIntake {
            blood_pressure: "190/100".to_string(),
            ..raw("Crisis", "55", "M")
        })
        .unwrap();

        let alerts = core.list_alerts().unwrap();
        let names: Vec<&str> = alerts.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["Crisis", "Medium"]);
        assert_eq!(alerts[0].priority, "HIGH");
        assert_eq!(alerts[0].severity, "CRITICAL");

        let json = core.export_report_json().unwrap();
        assert!(json.contains("\"record_count\": 2"));

        let csv = core.export_records_csv().unwrap();
        assert_eq!(csv.lines().count(), 3);
    }

    #[test]
    fn test_search_by_blood_group_parses_label() {
        let core = open_database_in_memory().unwrap();
        core.add_patient(FfiRawIntake {
            blood_group: "o+".to_string(),
            ..raw("Amina", "20", "F")
        })
        .unwrap();

        assert_eq!(core.search_by_blood_group("O+".to_string()).unwrap().len(), 1);
        assert!(matches!(
            core.search_by_blood_group("Z".to_string()),
            Err(IntakeError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_reopen_loads_persisted_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("camp.db").to_string_lossy().into_owned();

        {
            let core = open_database(path.clone()).unwrap();
            core.add_patient(raw("Nasrin", "34", "F")).unwrap();
        }

        let core = open_database(path).unwrap();
        let names: Vec<String> = core.list_patients().unwrap().into_iter().map(|r| r.name).collect();
        assert_eq!(names, ["Nasrin"]);
    }

    #[test]
    fn test_open_with_config_uses_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("camp.db");
        let config_path = dir.path().join("intake.json");
        let config = IntakeConfig {
            database_path: db_path.clone(),
            advisory_separator: "; ".to_string(),
            log_filter: "camp_intake_core=debug".to_string(),
            ..IntakeConfig::default()
        };
        std::fs::write(&config_path, serde_json::to_string(&config).unwrap()).unwrap();

        let core = open_with_config(config_path.to_string_lossy().into_owned()).unwrap();
        assert_eq!(core.config.log_directive(""), "camp_intake_core=debug");
        core.add_patient(FfiRawIntake {
            blood_pressure: "150/95".to_string(),
            ..raw("Karim", "65", "M")
        })
        .unwrap();

        assert!(db_path.exists());
        let csv = core.export_records_csv().unwrap();
        assert!(csv.contains("HIGH BP - Immediate medical attention; SENIOR"));
    }

    #[test]
    fn test_converters() {
        assert_eq!(compute_bmi(70.0, 175.0), Some(22.9));
        assert_eq!(compute_bmi(70.0, 0.0), None);
        assert_eq!(height_to_cm("170".to_string()), Some(170.0));
        assert_eq!(cm_to_feet_inches(180.0), "5'11\"");
        init_logging(String::new());
        init_logging("debug".to_string());
    }
}
