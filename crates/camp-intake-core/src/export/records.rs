//! Record sheet as CSV with the canonical column set.

use crate::db::columns::{record_to_row, COLUMNS};
use crate::models::PatientRecord;

/// Header line plus one line per record, in the given order.
pub fn records_csv<'a, I>(records: I, separator: &str) -> String
where
    I: IntoIterator<Item = &'a PatientRecord>,
{
    let mut csv = COLUMNS.join(",");
    csv.push('\n');

    for record in records {
        let line = record_to_row(record, separator)
            .iter()
            .map(|(_, value)| escape_csv(value))
            .collect::<Vec<_>>()
            .join(",");
        csv.push_str(&line);
        csv.push('\n');
    }

    csv
}

/// Quote a field containing a comma, quote or line break.
pub(crate) fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
