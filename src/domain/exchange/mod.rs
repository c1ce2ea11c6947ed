//! Import/export boundary: the downloadable CSV template and upload filename checks.
//!
//! Uploaded files are not parsed; a valid filename is acknowledged and nothing is imported.

use crate::domain::error::DashboardError;
use serde::Serialize;
use utoipa::ToSchema;

pub const TEMPLATE_FILENAME: &str = "成绩导入模板.csv";

pub const TEMPLATE_HEADER: [&str; 6] = ["学生姓名", "学号", "班级", "科目", "成绩", "考试时间"];

const TEMPLATE_SAMPLE_ROWS: [[&str; 6]; 2] = [
    ["张小明", "2023001", "三年级一班", "数学", "95", "2023-06-15"],
    ["李小红", "2023002", "三年级一班", "语文", "88", "2023-06-15"],
];

/// Byte-order mark so spreadsheet tools open the file as UTF-8.
const UTF8_BOM: char = '\u{FEFF}';

/// Header row plus two example rows, `\n`-terminated, prefixed with a UTF-8 BOM.
pub fn template_csv() -> String {
    let mut out = String::new();
    out.push(UTF8_BOM);
    out.push_str(&TEMPLATE_HEADER.join(","));
    out.push('\n');
    for row in TEMPLATE_SAMPLE_ROWS {
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ImportFormat {
    Xlsx,
    Xls,
    Csv,
}

pub fn validate_import_filename(filename: &str) -> Result<ImportFormat, DashboardError> {
    let name = filename.trim();
    if name.is_empty() {
        return Err(DashboardError::validation("请选择要导入的Excel文件！"));
    }
    let lower = name.to_lowercase();
    if lower.ends_with(".xlsx") {
        Ok(ImportFormat::Xlsx)
    } else if lower.ends_with(".xls") {
        Ok(ImportFormat::Xls)
    } else if lower.ends_with(".csv") {
        Ok(ImportFormat::Csv)
    } else {
        Err(DashboardError::validation(
            "请选择Excel文件（.xlsx, .xls）或CSV文件（.csv）！",
        ))
    }
}

/// Acknowledgement of an accepted upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportReceipt {
    pub filename: String,
    pub format: ImportFormat,
    /// Always 0: uploads are acknowledged, not parsed.
    pub imported: usize,
    pub message: String,
}

pub fn accept_import(filename: &str) -> Result<ImportReceipt, DashboardError> {
    let format = validate_import_filename(filename)?;
    let filename = filename.trim().to_string();
    Ok(ImportReceipt {
        message: format!("文件\"{}\"已选择，模拟导入过程完成。", filename),
        filename,
        format,
        imported: 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_layout() {
        let csv = template_csv();
        assert!(csv.starts_with('\u{FEFF}'));
        let lines: Vec<&str> = csv.trim_start_matches('\u{FEFF}').lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "学生姓名,学号,班级,科目,成绩,考试时间");
        assert_eq!(lines[1], "张小明,2023001,三年级一班,数学,95,2023-06-15");
        assert!(csv.ends_with('\n'));
    }

    #[test]
    fn accepted_extensions() {
        assert_eq!(validate_import_filename("grades.xlsx"), Ok(ImportFormat::Xlsx));
        assert_eq!(validate_import_filename("grades.xls"), Ok(ImportFormat::Xls));
        assert_eq!(validate_import_filename("成绩.CSV"), Ok(ImportFormat::Csv));
    }

    #[test]
    fn rejected_filenames() {
        assert_eq!(
            validate_import_filename("  "),
            Err(DashboardError::validation("请选择要导入的Excel文件！"))
        );
        assert!(matches!(
            validate_import_filename("grades.txt"),
            Err(DashboardError::Validation(_))
        ));
        assert!(validate_import_filename("xlsx").is_err());
    }

    #[test]
    fn receipt_imports_nothing() {
        let r = accept_import("grades.csv").unwrap();
        assert_eq!(r.imported, 0);
        assert_eq!(r.format, ImportFormat::Csv);
        assert!(r.message.contains("grades.csv"));
    }
}
