//! Search/filter predicate over grade records.

use crate::domain::grades::GradeRecord;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Active search text plus subject/class filters. An empty string places no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    #[serde(default)]
    pub name_substring: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub class_name: String,
}

impl FilterCriteria {
    pub fn new(
        name_substring: impl Into<String>,
        subject: impl Into<String>,
        class_name: impl Into<String>,
    ) -> Self {
        Self {
            name_substring: name_substring.into(),
            subject: subject.into(),
            class_name: class_name.into(),
        }
    }

    pub fn by_class(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name_substring.is_empty() && self.subject.is_empty() && self.class_name.is_empty()
    }
}

pub fn matches(record: &GradeRecord, criteria: &FilterCriteria) -> bool {
    let name_ok = criteria.name_substring.is_empty()
        || record
            .student_name
            .to_lowercase()
            .contains(&criteria.name_substring.to_lowercase());
    let subject_ok = criteria.subject.is_empty() || record.subject == criteria.subject;
    let class_ok = criteria.class_name.is_empty() || record.class_name == criteria.class_name;
    name_ok && subject_ok && class_ok
}

/// Keeps the matching records, in input order.
pub fn apply<'a>(records: &'a [GradeRecord], criteria: &FilterCriteria) -> Vec<&'a GradeRecord> {
    records.iter().filter(|r| matches(r, criteria)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::grades::sample_records;

    #[test]
    fn empty_criteria_match_everything() {
        let records = sample_records();
        assert_eq!(apply(&records, &FilterCriteria::default()).len(), records.len());
    }

    #[test]
    fn name_match_is_case_insensitive_substring() {
        let mut records = sample_records();
        records[0].student_name = "Alice Zhang".to_string();
        let hits = apply(&records, &FilterCriteria::new("zHaNg", "", ""));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 1);

        let hits = apply(&records, &FilterCriteria::new("小明", "", ""));
        let ids: Vec<u64> = hits.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![10]);
    }

    #[test]
    fn criteria_combine_with_and_and_preserve_order() {
        let records = sample_records();
        let criteria = FilterCriteria::new("小", "数学", "三年级一班");
        let hits = apply(&records, &criteria);
        let ids: Vec<u64> = hits.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 4, 7, 10]);
        for r in &records {
            assert_eq!(ids.contains(&r.id), matches(r, &criteria));
        }
    }

    #[test]
    fn subject_and_class_need_exact_equality() {
        let records = sample_records();
        assert!(apply(&records, &FilterCriteria::new("", "数", "")).is_empty());
        assert!(apply(&records, &FilterCriteria::by_class("三年级二班")).is_empty());
    }
}
