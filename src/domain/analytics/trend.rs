//! Longitudinal views: a student's progress, month-by-month subject averages and how students
//! of one class compare with the class average.

use super::aggregate::{mean, round_to};
use crate::domain::grades::GradeRecord;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    #[schema(value_type = String, format = Date)]
    pub exam_date: NaiveDate,
    pub score: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubjectTrend {
    pub points: Vec<TrendPoint>,
    pub first_score: i64,
    pub last_score: i64,
    /// `last_score - first_score`
    pub improvement: f64,
    /// Improvement divided by the number of exams, two decimals.
    pub speed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentTrend {
    pub student_id: String,
    pub student_name: String,
    /// Only subjects with at least two exams.
    pub subjects: BTreeMap<String, SubjectTrend>,
}

pub fn student_trend<'a, I>(records: I, student_id: &str) -> Option<StudentTrend>
where
    I: IntoIterator<Item = &'a GradeRecord>,
{
    let own: Vec<&GradeRecord> = records
        .into_iter()
        .filter(|r| r.student_id == student_id)
        .collect();
    let student_name = own.last()?.student_name.clone();

    let mut by_subject: BTreeMap<String, Vec<&GradeRecord>> = BTreeMap::new();
    for r in own.iter().copied() {
        by_subject.entry(r.subject.clone()).or_default().push(r);
    }

    let mut subjects = BTreeMap::new();
    for (subject, mut rows) in by_subject {
        if rows.len() < 2 {
            continue;
        }
        rows.sort_by_key(|r| r.exam_date);
        let first_score = rows[0].score;
        let last_score = rows[rows.len() - 1].score;
        let improvement = (last_score - first_score) as f64;
        subjects.insert(
            subject,
            SubjectTrend {
                points: rows
                    .iter()
                    .map(|r| TrendPoint {
                        exam_date: r.exam_date,
                        score: r.score,
                    })
                    .collect(),
                first_score,
                last_score,
                improvement: round_to(improvement, 2),
                speed: round_to(improvement / rows.len() as f64, 2),
            },
        );
    }

    Some(StudentTrend {
        student_id: student_id.to_string(),
        student_name,
        subjects,
    })
}

/// Average score per subject per calendar month.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTrend {
    /// `YYYY-MM`, chronological.
    pub months: Vec<String>,
    /// subject -> averages aligned with `months`; `None` where the subject had no exam that month.
    pub series: BTreeMap<String, Vec<Option<f64>>>,
}

pub fn monthly_trend<'a, I>(records: I) -> MonthlyTrend
where
    I: IntoIterator<Item = &'a GradeRecord>,
{
    let mut cells: BTreeMap<(String, String), Vec<i64>> = BTreeMap::new();
    let mut months: Vec<String> = Vec::new();
    for r in records {
        let month = r.exam_date.format("%Y-%m").to_string();
        if !months.contains(&month) {
            months.push(month.clone());
        }
        cells.entry((r.subject.clone(), month)).or_default().push(r.score);
    }
    months.sort();

    let mut series: BTreeMap<String, Vec<Option<f64>>> = BTreeMap::new();
    for ((subject, _), _) in &cells {
        if series.contains_key(subject) {
            continue;
        }
        let values = months
            .iter()
            .map(|m| {
                cells
                    .get(&(subject.clone(), m.clone()))
                    .and_then(|scores| mean(scores))
                    .map(|v| round_to(v, 2))
            })
            .collect();
        series.insert(subject.clone(), values);
    }

    MonthlyTrend { months, series }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentStanding {
    pub student_id: String,
    pub student_name: String,
    pub average_score: f64,
    pub difference_from_class: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassComparison {
    pub class_name: String,
    pub class_average: f64,
    pub student_count: usize,
    pub above_average_count: usize,
    pub below_average_count: usize,
    /// Ordered by student id.
    pub students: Vec<StudentStanding>,
}

pub fn class_comparison<'a, I>(records: I, class_name: &str) -> Option<ClassComparison>
where
    I: IntoIterator<Item = &'a GradeRecord>,
{
    let rows: Vec<&GradeRecord> = records
        .into_iter()
        .filter(|r| r.class_name == class_name)
        .collect();
    let all_scores: Vec<i64> = rows.iter().map(|r| r.score).collect();
    let class_average = mean(&all_scores)?;

    let mut per_student: BTreeMap<&str, (&str, Vec<i64>)> = BTreeMap::new();
    for r in rows.iter().copied() {
        per_student
            .entry(r.student_id.as_str())
            .or_insert_with(|| (r.student_name.as_str(), Vec::new()))
            .1
            .push(r.score);
    }

    let mut students = Vec::with_capacity(per_student.len());
    let mut above = 0;
    let mut below = 0;
    for (student_id, (student_name, scores)) in per_student {
        let avg = mean(&scores).unwrap_or_default();
        if avg > class_average {
            above += 1;
        } else if avg < class_average {
            below += 1;
        }
        students.push(StudentStanding {
            student_id: student_id.to_string(),
            student_name: student_name.to_string(),
            average_score: round_to(avg, 2),
            difference_from_class: round_to(avg - class_average, 2),
        });
    }

    Some(ClassComparison {
        class_name: class_name.to_string(),
        class_average: round_to(class_average, 2),
        student_count: students.len(),
        above_average_count: above,
        below_average_count: below,
        students,
    })
}
