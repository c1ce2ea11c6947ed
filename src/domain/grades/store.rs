//! In-memory working collection of grade records.

use super::{sample_records, GradeFields, GradeInput, GradeRecord};
use crate::domain::error::DashboardError;

/// Holds the records in insertion order.
///
/// Identifiers are never reused: the next id is always above every id the store has held,
/// including ids of records that were deleted since.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GradeStore {
    records: Vec<GradeRecord>,
    next_id: u64,
}

impl GradeStore {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }

    pub fn with_sample_data() -> Self {
        let mut store = Self::new();
        store.replace_all(sample_records());
        store
    }

    pub fn from_records(records: Vec<GradeRecord>) -> Self {
        let mut store = Self::new();
        store.replace_all(records);
        store
    }

    /// Appends a record with a fresh identifier and returns that identifier.
    pub fn add(&mut self, fields: GradeFields) -> u64 {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        self.records.push(GradeRecord::from_fields(id, fields));
        id
    }

    /// Replaces every field of the record except its id.
    pub fn update(&mut self, id: u64, fields: GradeFields) -> Result<&GradeRecord, DashboardError> {
        let slot = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(DashboardError::NotFound { id })?;
        *slot = GradeRecord::from_fields(id, fields);
        Ok(&*slot)
    }

    /// Validates add-form input, then appends it. Nothing changes when validation fails.
    pub fn add_input(&mut self, input: GradeInput) -> Result<&GradeRecord, DashboardError> {
        let fields = input.validate()?;
        let id = self.add(fields);
        self.get(id).ok_or(DashboardError::NotFound { id })
    }

    /// Validates edit-form input, then replaces record `id`.
    pub fn update_input(
        &mut self,
        id: u64,
        input: GradeInput,
    ) -> Result<&GradeRecord, DashboardError> {
        let fields = input.validate()?;
        self.update(id, fields)
    }

    pub fn delete(&mut self, id: u64) -> Result<GradeRecord, DashboardError> {
        let idx = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or(DashboardError::NotFound { id })?;
        Ok(self.records.remove(idx))
    }

    pub fn all(&self) -> &[GradeRecord] {
        &self.records
    }

    pub fn get(&self, id: u64) -> Option<&GradeRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Fresh load: swaps the whole collection. Records keep their ids; duplicates after the
    /// first occurrence are dropped so the id invariant holds.
    pub fn replace_all(&mut self, records: Vec<GradeRecord>) {
        let mut kept: Vec<GradeRecord> = Vec::with_capacity(records.len());
        for record in records {
            if kept.iter().any(|r| r.id == record.id) {
                continue;
            }
            kept.push(record);
        }
        let max_id = kept.iter().map(|r| r.id).max().unwrap_or(0);
        self.next_id = self.next_id.max(max_id + 1);
        self.records = kept;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fields(name: &str, score: i64) -> GradeFields {
        GradeFields {
            student_name: name.to_string(),
            student_id: "2024001".to_string(),
            class_name: "三年级二班".to_string(),
            subject: "数学".to_string(),
            score,
            exam_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        }
    }

    #[test]
    fn add_assigns_unique_ids_and_appends() {
        let mut store = GradeStore::with_sample_data();
        let before = store.len();
        let id = store.add(fields("新同学", 77));
        assert_eq!(id, 13);
        assert_eq!(store.len(), before + 1);
        let last = store.all().last().unwrap();
        assert_eq!(last.id, id);
        assert_eq!(last.fields(), fields("新同学", 77));
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut store = GradeStore::with_sample_data();
        store.delete(3).unwrap();
        let a = store.add(fields("甲", 60));
        let b = store.add(fields("乙", 70));
        assert_ne!(a, b);
        let mut ids: Vec<u64> = store.all().iter().map(|r| r.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), store.len());
        assert!(store.get(3).is_none());
    }

    #[test]
    fn update_replaces_only_target() {
        let mut store = GradeStore::with_sample_data();
        let before = store.clone();
        store.update(5, fields("改名", 66)).unwrap();
        for (old, new) in before.all().iter().zip(store.all()) {
            if old.id == 5 {
                assert_eq!(new.fields(), fields("改名", 66));
                assert_eq!(new.id, 5);
            } else {
                assert_eq!(old, new);
            }
        }
    }

    #[test]
    fn missing_ids_signal_not_found_and_leave_store_unchanged() {
        let mut store = GradeStore::with_sample_data();
        let before = store.clone();
        assert_eq!(store.delete(99), Err(DashboardError::NotFound { id: 99 }));
        assert_eq!(
            store.update(99, fields("x", 1)).unwrap_err(),
            DashboardError::NotFound { id: 99 }
        );
        assert_eq!(store, before);
    }

    #[test]
    fn form_input_is_validated_before_mutation() {
        let mut store = GradeStore::with_sample_data();
        let before = store.clone();

        let mut bad: GradeInput = fields("新同学", 77).into();
        bad.score = Some(101);
        assert!(matches!(store.add_input(bad.clone()), Err(DashboardError::Validation(_))));
        assert!(matches!(store.update_input(1, bad), Err(DashboardError::Validation(_))));
        assert_eq!(store, before);

        let added = store.add_input(fields("新同学", 77).into()).unwrap().id;
        assert_eq!(added, 13);
        let edited = store.update_input(added, fields("新同学", 80).into()).unwrap();
        assert_eq!(edited.score, 80);
        assert_eq!(
            store.update_input(99, fields("x", 1).into()).unwrap_err(),
            DashboardError::NotFound { id: 99 }
        );
    }

    #[test]
    fn replace_all_keeps_ids_above_loaded_maximum() {
        let mut store = GradeStore::new();
        let mut records = sample_records();
        records.truncate(2);
        records[1].id = 40;
        store.replace_all(records);
        assert_eq!(store.add(fields("后来者", 80)), 41);
    }
}
