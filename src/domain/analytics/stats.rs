//! Summary statistics, score bands and subject correlation.

use super::aggregate::{group_scores, mean, round_to};
use crate::domain::grades::GradeRecord;
use serde::Serialize;
use std::collections::BTreeMap;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSummary {
    pub count: usize,
    /// Rounded to two decimals.
    pub average: f64,
    pub median: f64,
    pub min: i64,
    pub max: i64,
}

pub fn median(scores: &[i64]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    let mut sorted = scores.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) as f64 / 2.0)
    } else {
        Some(sorted[mid] as f64)
    }
}

pub fn summarize(scores: &[i64]) -> Option<ScoreSummary> {
    let avg = mean(scores)?;
    Some(ScoreSummary {
        count: scores.len(),
        average: round_to(avg, 2),
        median: median(scores)?,
        min: *scores.iter().min()?,
        max: *scores.iter().max()?,
    })
}

pub fn subject_summary<'a, I>(records: I) -> BTreeMap<String, ScoreSummary>
where
    I: IntoIterator<Item = &'a GradeRecord>,
{
    group_scores(records, |r| r.subject.as_str())
        .into_iter()
        .filter_map(|(subject, scores)| summarize(&scores).map(|s| (subject, s)))
        .collect()
}

/// Score bands shown in the distribution chart, highest first.
pub const DISTRIBUTION_LABELS: [&str; 5] = ["90-100分", "80-89分", "70-79分", "60-69分", "60分以下"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScoreDistribution {
    pub labels: Vec<String>,
    /// Counts aligned with `labels`.
    pub counts: Vec<usize>,
}

fn band(score: i64) -> usize {
    match score {
        s if s >= 90 => 0,
        s if s >= 80 => 1,
        s if s >= 70 => 2,
        s if s >= 60 => 3,
        _ => 4,
    }
}

pub fn score_distribution<'a, I>(records: I) -> ScoreDistribution
where
    I: IntoIterator<Item = &'a GradeRecord>,
{
    let mut counts = vec![0usize; DISTRIBUTION_LABELS.len()];
    for r in records {
        counts[band(r.score)] += 1;
    }
    ScoreDistribution {
        labels: DISTRIBUTION_LABELS.iter().map(|l| l.to_string()).collect(),
        counts,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubjectCorrelation {
    pub subject1: String,
    pub subject2: String,
    /// Pearson coefficient, four decimals.
    pub correlation: f64,
    pub student_count: usize,
    pub interpretation: String,
}

/// Pearson correlation; `0.0` for fewer than two pairs or a zero-variance side.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || x.len() < 2 {
        return 0.0;
    }
    let n = x.len() as f64;
    let sum_x: f64 = x.iter().sum();
    let sum_y: f64 = y.iter().sum();
    let sum_xy: f64 = x.iter().zip(y).map(|(a, b)| a * b).sum();
    let sum_x2: f64 = x.iter().map(|a| a * a).sum();
    let sum_y2: f64 = y.iter().map(|b| b * b).sum();

    let numerator = n * sum_xy - sum_x * sum_y;
    let denominator = ((n * sum_x2 - sum_x * sum_x) * (n * sum_y2 - sum_y * sum_y)).sqrt();
    if denominator == 0.0 || denominator.is_nan() {
        return 0.0;
    }
    numerator / denominator
}

pub fn interpret_correlation(correlation: f64) -> String {
    let strength = match correlation.abs() {
        a if a >= 0.9 => "非常强",
        a if a >= 0.7 => "强",
        a if a >= 0.5 => "中等",
        a if a >= 0.3 => "弱",
        _ => "非常弱",
    };
    let direction = if correlation > 0.0 {
        "正相关"
    } else if correlation < 0.0 {
        "负相关"
    } else {
        "无相关性"
    };
    format!("{}{}", strength, direction)
}

/// Latest score of `subject` per student id (ties on date: the later record wins).
fn latest_scores<'a>(records: &[&'a GradeRecord], subject: &str) -> BTreeMap<&'a str, &'a GradeRecord> {
    let mut latest: BTreeMap<&str, &GradeRecord> = BTreeMap::new();
    for r in records.iter().copied().filter(|r| r.subject == subject) {
        match latest.get(r.student_id.as_str()) {
            Some(prev) if prev.exam_date > r.exam_date => {}
            _ => {
                latest.insert(r.student_id.as_str(), r);
            }
        }
    }
    latest
}

/// Correlates two subjects over the students that have a score in both.
/// Returns `None` when no student has both.
pub fn subject_correlation<'a, I>(records: I, subject1: &str, subject2: &str) -> Option<SubjectCorrelation>
where
    I: IntoIterator<Item = &'a GradeRecord>,
{
    let rows: Vec<&GradeRecord> = records.into_iter().collect();
    let first = latest_scores(&rows, subject1);
    let second = latest_scores(&rows, subject2);

    let mut xs = Vec::new();
    let mut ys = Vec::new();
    for (student_id, a) in &first {
        if let Some(b) = second.get(student_id) {
            xs.push(a.score as f64);
            ys.push(b.score as f64);
        }
    }
    if xs.is_empty() {
        return None;
    }

    let correlation = pearson(&xs, &ys);
    Some(SubjectCorrelation {
        subject1: subject1.to_string(),
        subject2: subject2.to_string(),
        correlation: round_to(correlation, 4),
        student_count: xs.len(),
        interpretation: interpret_correlation(correlation),
    })
}
