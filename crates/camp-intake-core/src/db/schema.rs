//! SQLite schema for the intake store.

/// Records table. Columns mirror the canonical sheet; every cell is text so a
/// hand-edited row survives loading. Insertion order is `rowid` order.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS patient_records (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL DEFAULT '',
    age TEXT NOT NULL DEFAULT '',
    gender TEXT NOT NULL DEFAULT '',
    phone TEXT NOT NULL DEFAULT '',
    blood_pressure TEXT NOT NULL DEFAULT '',
    blood_group TEXT NOT NULL DEFAULT '',
    blood_sugar TEXT NOT NULL DEFAULT '',
    weight TEXT NOT NULL DEFAULT '',
    height_cm TEXT NOT NULL DEFAULT '',
    height_ft TEXT NOT NULL DEFAULT '',
    bmi TEXT NOT NULL DEFAULT '',
    health_comments TEXT NOT NULL DEFAULT '',
    date_added TEXT NOT NULL DEFAULT ''
);

CREATE INDEX IF NOT EXISTS idx_patient_records_name ON patient_records(name);
"#;

/// SQL column for each canonical sheet column, in sheet order.
pub const SQL_COLUMNS: [(&str, &str); 13] = [
    (super::columns::NAME, "name"),
    (super::columns::AGE, "age"),
    (super::columns::GENDER, "gender"),
    (super::columns::PHONE, "phone"),
    (super::columns::BLOOD_PRESSURE, "blood_pressure"),
    (super::columns::BLOOD_GROUP, "blood_group"),
    (super::columns::BLOOD_SUGAR, "blood_sugar"),
    (super::columns::WEIGHT, "weight"),
    (super::columns::HEIGHT_CM, "height_cm"),
    (super::columns::HEIGHT_FT, "height_ft"),
    (super::columns::BMI, "bmi"),
    (super::columns::HEALTH_COMMENTS, "health_comments"),
    (super::columns::DATE_ADDED, "date_added"),
];
