//! Averages grouped by subject and by class.
//!
//! Subjects without records are absent from the maps rather than reported as `0.0`, so callers
//! can tell "no data" from a real zero average. Chart series substitute `0.0` explicitly.

use crate::domain::grades::GradeRecord;
use std::collections::BTreeMap;

/// subject -> average score
pub type SubjectAverages = BTreeMap<String, f64>;

/// class -> (subject -> average score)
pub type ClassSubjectAverages = BTreeMap<String, SubjectAverages>;

pub fn mean(scores: &[i64]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    Some(scores.iter().sum::<i64>() as f64 / scores.len() as f64)
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Groups scores by an arbitrary key, keeping record order inside each group.
pub fn group_scores<'a, I, F>(records: I, key: F) -> BTreeMap<String, Vec<i64>>
where
    I: IntoIterator<Item = &'a GradeRecord>,
    F: Fn(&GradeRecord) -> &str,
{
    let mut groups: BTreeMap<String, Vec<i64>> = BTreeMap::new();
    for r in records {
        groups.entry(key(r).to_string()).or_default().push(r.score);
    }
    groups
}

pub fn average_by_subject<'a, I>(records: I) -> SubjectAverages
where
    I: IntoIterator<Item = &'a GradeRecord>,
{
    group_scores(records, |r| r.subject.as_str())
        .into_iter()
        .filter_map(|(subject, scores)| mean(&scores).map(|avg| (subject, avg)))
        .collect()
}

pub fn average_by_class_and_subject<'a, I>(records: I) -> ClassSubjectAverages
where
    I: IntoIterator<Item = &'a GradeRecord>,
{
    let mut by_class: BTreeMap<String, Vec<&GradeRecord>> = BTreeMap::new();
    for r in records {
        by_class.entry(r.class_name.clone()).or_default().push(r);
    }
    by_class
        .into_iter()
        .map(|(class_name, rows)| (class_name, average_by_subject(rows)))
        .collect()
}

/// Values for `labels` in order, `0.0` where the map has no entry.
pub fn series_for(labels: &[&str], averages: &SubjectAverages) -> Vec<f64> {
    labels
        .iter()
        .map(|label| averages.get(*label).copied().unwrap_or(0.0))
        .collect()
}
