//! Student and class report models.

use super::aggregate::{mean, round_to};
use super::stats::{score_distribution, subject_summary, ScoreDistribution, ScoreSummary};
use crate::domain::grades::{GradeRecord, SUBJECTS};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use utoipa::ToSchema;

pub fn evaluation(score: i64) -> &'static str {
    match score {
        s if s >= 90 => "优秀",
        s if s >= 80 => "良好",
        s if s >= 70 => "中等",
        s if s >= 60 => "及格",
        _ => "不及格",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubjectResult {
    pub subject: String,
    pub score: i64,
    #[schema(value_type = String, format = Date)]
    pub exam_date: NaiveDate,
    /// 1-based rank among the latest scores of the same class.
    pub class_rank: usize,
    /// 1-based rank among the latest scores of every class.
    pub grade_rank: usize,
    pub evaluation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentReport {
    pub student_id: String,
    pub student_name: String,
    pub class_name: String,
    pub average_score: f64,
    pub results: Vec<SubjectResult>,
}

/// Latest record per (student, subject).
fn latest_per_student_subject<'a>(records: &[&'a GradeRecord]) -> Vec<&'a GradeRecord> {
    let mut latest: BTreeMap<(&str, &str), &GradeRecord> = BTreeMap::new();
    for r in records.iter().copied() {
        let key = (r.student_id.as_str(), r.subject.as_str());
        match latest.get(&key) {
            Some(prev) if prev.exam_date > r.exam_date => {}
            _ => {
                latest.insert(key, r);
            }
        }
    }
    latest.into_values().collect()
}

/// Competition ranking: equal scores share a rank.
fn rank_of(score: i64, pool: &[i64]) -> usize {
    pool.iter().filter(|s| **s > score).count() + 1
}

pub fn student_report<'a, I>(records: I, student_id: &str) -> Option<StudentReport>
where
    I: IntoIterator<Item = &'a GradeRecord>,
{
    let rows: Vec<&GradeRecord> = records.into_iter().collect();
    let latest = latest_per_student_subject(&rows);

    let own: Vec<&GradeRecord> = latest
        .iter()
        .copied()
        .filter(|r| r.student_id == student_id)
        .collect();
    let head = own.iter().max_by_key(|r| r.exam_date)?;
    let student_name = head.student_name.clone();
    let class_name = head.class_name.clone();

    let mut results = Vec::with_capacity(own.len());
    for r in &own {
        let grade_pool: Vec<i64> = latest
            .iter()
            .filter(|o| o.subject == r.subject)
            .map(|o| o.score)
            .collect();
        let class_pool: Vec<i64> = latest
            .iter()
            .filter(|o| o.subject == r.subject && o.class_name == r.class_name)
            .map(|o| o.score)
            .collect();
        results.push(SubjectResult {
            subject: r.subject.clone(),
            score: r.score,
            exam_date: r.exam_date,
            class_rank: rank_of(r.score, &class_pool),
            grade_rank: rank_of(r.score, &grade_pool),
            evaluation: evaluation(r.score).to_string(),
        });
    }
    results.sort_by_key(|res| {
        SUBJECTS
            .iter()
            .position(|s| *s == res.subject)
            .unwrap_or(SUBJECTS.len())
    });

    let scores: Vec<i64> = results.iter().map(|r| r.score).collect();
    Some(StudentReport {
        student_id: student_id.to_string(),
        student_name,
        class_name,
        average_score: round_to(mean(&scores).unwrap_or_default(), 1),
        results,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassReport {
    pub class_name: String,
    pub student_count: usize,
    pub record_count: usize,
    /// Average of every score in the class, one decimal.
    pub class_average: f64,
    pub subjects: BTreeMap<String, ScoreSummary>,
    pub distribution: ScoreDistribution,
}

pub fn class_report<'a, I>(records: I, class_name: &str) -> Option<ClassReport>
where
    I: IntoIterator<Item = &'a GradeRecord>,
{
    let rows: Vec<&GradeRecord> = records
        .into_iter()
        .filter(|r| r.class_name == class_name)
        .collect();
    let scores: Vec<i64> = rows.iter().map(|r| r.score).collect();
    let class_average = mean(&scores)?;

    let mut students: Vec<&str> = rows.iter().map(|r| r.student_id.as_str()).collect();
    students.sort_unstable();
    students.dedup();

    Some(ClassReport {
        class_name: class_name.to_string(),
        student_count: students.len(),
        record_count: rows.len(),
        class_average: round_to(class_average, 1),
        subjects: subject_summary(rows.iter().copied()),
        distribution: score_distribution(rows.iter().copied()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::grades::sample_records;

    #[test]
    fn evaluation_bands() {
        assert_eq!(evaluation(95), "优秀");
        assert_eq!(evaluation(88), "良好");
        assert_eq!(evaluation(70), "中等");
        assert_eq!(evaluation(60), "及格");
        assert_eq!(evaluation(12), "不及格");
    }

    #[test]
    fn student_report_ranks_within_subject() {
        let records = sample_records();
        // 赵小丽 (2023004) scored 87 in 数学; 95, 93 and 91 are higher.
        let report = student_report(&records, "2023004").unwrap();
        assert_eq!(report.student_name, "赵小丽");
        assert_eq!(report.results.len(), 1);
        let math = &report.results[0];
        assert_eq!(math.subject, "数学");
        assert_eq!(math.class_rank, 4);
        assert_eq!(math.grade_rank, 4);
        assert_eq!(math.evaluation, "良好");

        assert!(student_report(&records, "missing").is_none());
    }

    #[test]
    fn class_report_summarizes_class_only() {
        let mut records = sample_records();
        records[0].class_name = "三年级二班".into();
        let report = class_report(&records, "三年级一班").unwrap();
        assert_eq!(report.record_count, 11);
        assert_eq!(report.student_count, 11);
        assert_eq!(report.subjects["数学"].count, 3);
        assert_eq!(report.distribution.counts.iter().sum::<usize>(), 11);
        assert!(class_report(&records, "四年级一班").is_none());
    }
}
