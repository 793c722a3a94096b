//! Caller-owned, append-only collection of patient records.

use strsim::jaro_winkler;
use tracing::info;

use crate::models::{BloodGroup, PatientRecord};

/// Records captured during a session, in insertion order.
///
/// There is no removal or in-place edit; the report functions only read it.
#[derive(Debug, Clone, Default)]
pub struct RecordCollection {
    records: Vec<PatientRecord>,
}

/// A name suggestion with its similarity score (0.0 - 1.0).
#[derive(Debug, Clone, PartialEq)]
pub struct NameSuggestion<'a> {
    pub record: &'a PatientRecord,
    pub score: f64,
}

impl RecordCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record and return a reference to it.
    pub fn push(&mut self, record: PatientRecord) -> &PatientRecord {
        info!(id = %record.id(), total = self.records.len() + 1, "appended patient record");
        self.records.push(record);
        &self.records[self.records.len() - 1]
    }

    pub fn records(&self) -> &[PatientRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PatientRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&PatientRecord> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Case-insensitive substring match on the name.
    pub fn search_by_name(&self, query: &str) -> Vec<&PatientRecord> {
        let needle = query.trim().to_lowercase();
        self.filter(|r| r.name().to_lowercase().contains(&needle))
    }

    pub fn search_by_blood_group(&self, group: BloodGroup) -> Vec<&PatientRecord> {
        self.filter(|r| r.blood_group() == Some(group))
    }

    /// Ages within `min..=max`.
    pub fn search_by_age(&self, min: u8, max: u8) -> Vec<&PatientRecord> {
        self.filter(|r| (min..=max).contains(&r.age().years()))
    }

    /// Case-insensitive substring match over the record's advisories
    /// (e.g. "high bp", "low sugar", "overweight").
    pub fn search_by_condition(&self, condition: &str) -> Vec<&PatientRecord> {
        let needle = condition.trim().to_lowercase();
        self.filter(|r| {
            r.advisories()
                .iter()
                .any(|a| a.to_lowercase().contains(&needle))
        })
    }

    /// Records whose name is similar to `query`, best first.
    pub fn suggest_names(&self, query: &str, limit: usize, threshold: f64) -> Vec<NameSuggestion<'_>> {
        let needle = query.trim().to_lowercase();
        let mut suggestions: Vec<NameSuggestion<'_>> = self
            .records
            .iter()
            .map(|record| NameSuggestion {
                record,
                score: jaro_winkler(&needle, &record.name().to_lowercase()),
            })
            .filter(|s| s.score >= threshold)
            .collect();

        // Stable sort keeps insertion order between equal scores
        suggestions.sort_by(|a, b| b.score.total_cmp(&a.score));
        suggestions.truncate(limit);
        suggestions
    }

    fn filter(&self, predicate: impl Fn(&PatientRecord) -> bool) -> Vec<&PatientRecord> {
        self.records.iter().filter(|r| predicate(r)).collect()
    }
}

impl<'a> IntoIterator for &'a RecordCollection {
    type Item = &'a PatientRecord;
    type IntoIter = std::slice::Iter<'a, PatientRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl Extend<PatientRecord> for RecordCollection {
    fn extend<I: IntoIterator<Item = PatientRecord>>(&mut self, iter: I) {
        self.records.extend(iter);
    }
}

impl FromIterator<PatientRecord> for RecordCollection {
    fn from_iter<I: IntoIterator<Item = PatientRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::{build_record, IntakeFields};
    use crate::models::{Age, BloodPressure, Gender};

    fn sample_collection() -> RecordCollection {
        let mut collection = RecordCollection::new();
        collection.push(build_record(
            IntakeFields::new("Rahim Uddin", Age::new(45).unwrap(), Gender::Male)
                .with_blood_group(BloodGroup::OPositive)
                .with_blood_pressure(BloodPressure::new(150, 95).unwrap()),
        ));
        collection.push(build_record(
            IntakeFields::new("Fatema Begum", Age::new(8).unwrap(), Gender::Female)
                .with_blood_group(BloodGroup::APositive)
                .with_sugar(3.2),
        ));
        collection.push(build_record(
            IntakeFields::new("Rahima Khatun", Age::new(67).unwrap(), Gender::Female)
                .with_blood_group(BloodGroup::OPositive),
        ));
        collection
    }

    #[test]
    fn test_push_preserves_order() {
        let collection = sample_collection();
        let names: Vec<&str> = collection.iter().map(|r| r.name()).collect();
        assert_eq!(names, ["Rahim Uddin", "Fatema Begum", "Rahima Khatun"]);
        assert_eq!(collection.len(), 3);
    }

    #[test]
    fn test_search_by_name() {
        let collection = sample_collection();
        let found = collection.search_by_name("rahim");
        assert_eq!(found.len(), 2);
        assert!(collection.search_by_name("nobody").is_empty());
    }

    #[test]
    fn test_search_by_blood_group_and_age() {
        let collection = sample_collection();
        assert_eq!(collection.search_by_blood_group(BloodGroup::OPositive).len(), 2);
        assert_eq!(collection.search_by_blood_group(BloodGroup::ONegative).len(), 0);

        let seniors = collection.search_by_age(60, 120);
        assert_eq!(seniors.len(), 1);
        assert_eq!(seniors[0].name(), "Rahima Khatun");
    }

    #[test]
    fn test_search_by_condition() {
        let collection = sample_collection();
        let found = collection.search_by_condition("HIGH bp");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name(), "Rahim Uddin");

        assert_eq!(collection.search_by_condition("low sugar").len(), 1);
    }

    #[test]
    fn test_suggest_names() {
        let collection = sample_collection();
        let suggestions = collection.suggest_names("Fatima Begum", 5, 0.8);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].record.name(), "Fatema Begum");

        let limited = collection.suggest_names("Rahim", 1, 0.5);
        assert_eq!(limited.len(), 1);
    }

    #[test]
    fn test_get_by_id() {
        let collection = sample_collection();
        let id = collection.records()[1].id().to_string();
        assert_eq!(collection.get(&id).map(|r| r.name()), Some("Fatema Begum"));
        assert!(collection.get("missing").is_none());
    }
}
