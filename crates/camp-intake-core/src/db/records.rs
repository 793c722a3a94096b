//! Record load/store.

use rusqlite::params;
use tracing::{info, warn};

use super::columns::{self, record_from_row, record_to_row, ColumnRow};
use super::{Database, DbResult};
use crate::intake::RecordCollection;
use crate::models::PatientRecord;

impl Database {
    /// Persist one record with its derived columns.
    pub fn insert_record(&self, record: &PatientRecord, separator: &str) -> DbResult<()> {
        let row = record_to_row(record, separator);
        let value = |column: &str| {
            row.iter()
                .find(|(c, _)| *c == column)
                .map(|(_, v)| v.as_str())
                .unwrap_or("")
        };

        self.conn.execute(
            r#"
            INSERT INTO patient_records (
                id, name, age, gender, phone, blood_pressure, blood_group,
                blood_sugar, weight, height_cm, height_ft, bmi, health_comments,
                date_added
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
            "#,
            params![
                record.id(),
                value(columns::NAME),
                value(columns::AGE),
                value(columns::GENDER),
                value(columns::PHONE),
                value(columns::BLOOD_PRESSURE),
                value(columns::BLOOD_GROUP),
                value(columns::BLOOD_SUGAR),
                value(columns::WEIGHT),
                value(columns::HEIGHT_CM),
                value(columns::HEIGHT_FT),
                value(columns::BMI),
                value(columns::HEALTH_COMMENTS),
                value(columns::DATE_ADDED),
            ],
        )?;

        info!(id = %record.id(), "persisted patient record");
        Ok(())
    }

    /// All stored rows in insertion order, keyed by canonical column name.
    pub fn load_rows(&self) -> DbResult<Vec<ColumnRow>> {
        let select = super::SQL_COLUMNS
            .iter()
            .map(|(_, sql)| *sql)
            .collect::<Vec<_>>()
            .join(", ");
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {} FROM patient_records ORDER BY rowid", select))?;

        let rows = stmt.query_map([], |row| {
            let mut stored = ColumnRow::new();
            for (i, (column, _)) in super::SQL_COLUMNS.iter().enumerate() {
                let value: Option<String> = row.get(i)?;
                stored.insert(column.to_string(), value.unwrap_or_default());
            }
            Ok(stored)
        })?;

        let stored = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(stored)
    }

    /// Load every usable row into a collection. Rejected rows are skipped.
    pub fn load_collection(&self) -> DbResult<RecordCollection> {
        let mut collection = RecordCollection::new();
        let mut skipped = 0usize;

        for row in self.load_rows()? {
            match record_from_row(&row) {
                Ok(record) => {
                    collection.push(record);
                }
                Err(reason) => {
                    skipped += 1;
                    warn!(%reason, "discarding stored row");
                }
            }
        }

        info!(loaded = collection.len(), skipped, "loaded patient records");
        Ok(collection)
    }

    pub fn count_records(&self) -> DbResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM patient_records", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
