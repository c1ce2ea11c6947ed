//! Grade records and the form rules that produce them.

use crate::domain::error::DashboardError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod sample;
pub mod store;

pub use sample::sample_records;
pub use store::GradeStore;

/// Classes offered by the dashboard's selectors.
pub const CLASSES: &[&str] = &["三年级一班", "三年级二班", "四年级一班"];

/// Subjects offered by the dashboard's selectors, in chart order.
pub const SUBJECTS: &[&str] = &["数学", "语文", "英语"];

pub const MIN_SCORE: i64 = 0;
pub const MAX_SCORE: i64 = 100;

/// One exam result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GradeRecord {
    pub id: u64,
    pub student_name: String,
    pub student_id: String,
    pub class_name: String,
    pub subject: String,
    pub score: i64,
    #[schema(value_type = String, format = Date)]
    pub exam_date: NaiveDate,
}

/// Everything a record carries except its identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GradeFields {
    pub student_name: String,
    pub student_id: String,
    pub class_name: String,
    pub subject: String,
    pub score: i64,
    #[schema(value_type = String, format = Date)]
    pub exam_date: NaiveDate,
}

impl GradeRecord {
    pub fn from_fields(id: u64, fields: GradeFields) -> Self {
        Self {
            id,
            student_name: fields.student_name,
            student_id: fields.student_id,
            class_name: fields.class_name,
            subject: fields.subject,
            score: fields.score,
            exam_date: fields.exam_date,
        }
    }

    pub fn fields(&self) -> GradeFields {
        GradeFields {
            student_name: self.student_name.clone(),
            student_id: self.student_id.clone(),
            class_name: self.class_name.clone(),
            subject: self.subject.clone(),
            score: self.score,
            exam_date: self.exam_date,
        }
    }
}

/// Raw add/edit form input. Every field may be missing.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GradeInput {
    #[serde(default)]
    pub student_name: Option<String>,
    #[serde(default)]
    pub student_id: Option<String>,
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub score: Option<i64>,
    /// `YYYY-MM-DD`
    #[serde(default)]
    pub exam_date: Option<String>,
}

impl GradeInput {
    /// Applies the form rules: required fields, catalog membership, score range and date format.
    pub fn validate(self) -> Result<GradeFields, DashboardError> {
        let student_name = required_text(self.student_name, "学生姓名")?;
        let student_id = required_text(self.student_id, "学号")?;

        let class_name = required_text(self.class_name, "班级")?;
        if !CLASSES.contains(&class_name.as_str()) {
            return Err(DashboardError::validation(format!("未知班级: {}", class_name)));
        }

        let subject = required_text(self.subject, "科目")?;
        if !SUBJECTS.contains(&subject.as_str()) {
            return Err(DashboardError::validation(format!("未知科目: {}", subject)));
        }

        let score = self
            .score
            .ok_or_else(|| DashboardError::validation("请填写成绩"))?;
        if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
            return Err(DashboardError::validation(format!(
                "成绩必须在 {} 到 {} 之间",
                MIN_SCORE, MAX_SCORE
            )));
        }

        let raw_date = required_text(self.exam_date, "考试时间")?;
        let exam_date = NaiveDate::parse_from_str(&raw_date, "%Y-%m-%d")
            .map_err(|_| DashboardError::validation(format!("考试时间格式错误: {}", raw_date)))?;

        Ok(GradeFields {
            student_name,
            student_id,
            class_name,
            subject,
            score,
            exam_date,
        })
    }
}

impl From<GradeFields> for GradeInput {
    fn from(fields: GradeFields) -> Self {
        Self {
            student_name: Some(fields.student_name),
            student_id: Some(fields.student_id),
            class_name: Some(fields.class_name),
            subject: Some(fields.subject),
            score: Some(fields.score),
            exam_date: Some(fields.exam_date.format("%Y-%m-%d").to_string()),
        }
    }
}

fn required_text(value: Option<String>, label: &str) -> Result<String, DashboardError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(DashboardError::validation(format!("请填写{}", label))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> GradeInput {
        GradeInput {
            student_name: Some("张小明".into()),
            student_id: Some("2023001".into()),
            class_name: Some("三年级一班".into()),
            subject: Some("数学".into()),
            score: Some(95),
            exam_date: Some("2023-06-15".into()),
        }
    }

    #[test]
    fn valid_input_produces_fields() {
        let fields = input().validate().unwrap();
        assert_eq!(fields.student_name, "张小明");
        assert_eq!(fields.exam_date, NaiveDate::from_ymd_opt(2023, 6, 15).unwrap());
    }

    #[test]
    fn missing_name_is_rejected() {
        let mut i = input();
        i.student_name = Some("   ".into());
        assert_eq!(
            i.validate(),
            Err(DashboardError::Validation("请填写学生姓名".into()))
        );
    }

    #[test]
    fn score_outside_range_is_rejected() {
        let mut i = input();
        i.score = Some(101);
        assert!(matches!(i.validate(), Err(DashboardError::Validation(_))));

        let mut i = input();
        i.score = Some(-1);
        assert!(matches!(i.validate(), Err(DashboardError::Validation(_))));

        let mut i = input();
        i.score = Some(100);
        assert!(i.validate().is_ok());
    }

    #[test]
    fn unknown_subject_and_bad_date_are_rejected() {
        let mut i = input();
        i.subject = Some("物理".into());
        assert!(matches!(i.validate(), Err(DashboardError::Validation(_))));

        let mut i = input();
        i.exam_date = Some("15/06/2023".into());
        assert!(matches!(i.validate(), Err(DashboardError::Validation(_))));
    }
}
