use super::GradeRecord;
use chrono::NaiveDate;

/// (name, student id, subject, score) rows of the demo class.
const SAMPLE_ROWS: &[(&str, &str, &str, i64)] = &[
    ("张小明", "2023001", "数学", 95),
    ("李小红", "2023002", "语文", 88),
    ("王小刚", "2023003", "英语", 92),
    ("赵小丽", "2023004", "数学", 87),
    ("刘小强", "2023005", "语文", 90),
    ("陈小美", "2023006", "英语", 85),
    ("杨小军", "2023007", "数学", 93),
    ("黄小芳", "2023008", "语文", 89),
    ("周小华", "2023009", "英语", 88),
    ("吴小明", "2023010", "数学", 91),
    ("郑小红", "2023011", "语文", 86),
    ("孙小刚", "2023012", "英语", 90),
];

/// The twelve demo records the dashboard starts with (ids 1..=12, one exam on 2023-06-15).
pub fn sample_records() -> Vec<GradeRecord> {
    let exam_date = NaiveDate::from_ymd_opt(2023, 6, 15).unwrap_or_default();
    SAMPLE_ROWS
        .iter()
        .enumerate()
        .map(|(idx, (name, student_id, subject, score))| GradeRecord {
            id: idx as u64 + 1,
            student_name: name.to_string(),
            student_id: student_id.to_string(),
            class_name: "三年级一班".to_string(),
            subject: subject.to_string(),
            score: *score,
            exam_date,
        })
        .collect()
}
