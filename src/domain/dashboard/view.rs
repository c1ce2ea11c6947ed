//! Pure state -> view-model builders consumed by the table and the charts.

use crate::domain::analytics::stats::DISTRIBUTION_LABELS;
use crate::domain::analytics::{
    average_by_class_and_subject, average_by_subject, monthly_trend, score_distribution,
    series_for, MonthlyTrend, SubjectAverages,
};
use crate::domain::grades::{GradeRecord, CLASSES, SUBJECTS};
use crate::domain::query::{apply, page, FilterCriteria, PAGE_SIZE};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationView {
    pub current_page: usize,
    pub total_pages: usize,
    pub has_prev: bool,
    pub has_next: bool,
    /// Records matching the criteria, across all pages.
    pub total_records: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GradeTableView {
    pub rows: Vec<GradeRecord>,
    pub pagination: PaginationView,
    pub criteria: FilterCriteria,
}

/// Filter, then slice to `page_number` (re-clamped).
pub fn grade_table_view(
    records: &[GradeRecord],
    criteria: &FilterCriteria,
    page_number: usize,
) -> GradeTableView {
    let filtered = apply(records, criteria);
    let p = page(&filtered, page_number, PAGE_SIZE);
    GradeTableView {
        rows: p.items.iter().map(|r| (*r).clone()).collect(),
        pagination: PaginationView {
            current_page: p.page_number,
            total_pages: p.total_pages,
            has_prev: p.has_prev,
            has_next: p.has_next,
            total_records: filtered.len(),
        },
        criteria: criteria.clone(),
    }
}

/// One chart series, aligned with the owning chart's `labels`.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Dataset {
    pub label: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

impl ChartData {
    fn new(labels: &[&str]) -> Self {
        Self {
            labels: labels.iter().map(|l| l.to_string()).collect(),
            datasets: Vec::new(),
        }
    }

    fn with_dataset(mut self, label: impl Into<String>, values: Vec<f64>) -> Self {
        self.datasets.push(Dataset {
            label: label.into(),
            values,
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsView {
    /// `None` means all classes.
    pub class_name: Option<String>,
    pub record_count: usize,
    /// 各科目平均分对比: one dataset, subjects in catalog order, `0.0` where no data.
    pub subject_averages: ChartData,
    /// 不同班级成绩对比: one dataset per class.
    pub class_subject_averages: ChartData,
    pub distribution: ChartData,
    pub monthly_trend: MonthlyTrend,
}

pub fn analytics_view(records: &[GradeRecord], class_name: Option<&str>) -> AnalyticsView {
    let class_name = class_name.filter(|c| !c.is_empty());
    let rows: Vec<&GradeRecord> = records
        .iter()
        .filter(|r| class_name.map_or(true, |c| r.class_name == c))
        .collect();

    let averages = average_by_subject(rows.iter().copied());
    let subject_averages =
        ChartData::new(SUBJECTS).with_dataset("平均分", series_for(SUBJECTS, &averages));

    let by_class = average_by_class_and_subject(rows.iter().copied());
    let mut class_order: Vec<&str> = CLASSES
        .iter()
        .copied()
        .filter(|c| class_name.map_or(true, |sel| sel == *c))
        .collect();
    for c in by_class.keys() {
        if !class_order.contains(&c.as_str()) && class_name.map_or(true, |sel| sel == c.as_str()) {
            class_order.push(c.as_str());
        }
    }
    let empty = SubjectAverages::new();
    let class_subject_averages = class_order.iter().fold(ChartData::new(SUBJECTS), |chart, c| {
        chart.with_dataset(*c, series_for(SUBJECTS, by_class.get(*c).unwrap_or(&empty)))
    });

    let dist = score_distribution(rows.iter().copied());
    let distribution = ChartData::new(&DISTRIBUTION_LABELS)
        .with_dataset("人数", dist.counts.iter().map(|c| *c as f64).collect());

    AnalyticsView {
        class_name: class_name.map(str::to_string),
        record_count: rows.len(),
        subject_averages,
        class_subject_averages,
        distribution,
        monthly_trend: monthly_trend(rows.iter().copied()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::grades::sample_records;

    #[test]
    fn sample_pages() {
        let records = sample_records();
        let criteria = FilterCriteria::default();

        let first = grade_table_view(&records, &criteria, 1);
        let ids: Vec<u64> = first.rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<_>>());
        assert!(first.pagination.has_next);
        assert!(!first.pagination.has_prev);
        assert_eq!(first.pagination.total_pages, 2);
        assert_eq!(first.pagination.total_records, 12);

        let second = grade_table_view(&records, &criteria, 2);
        let ids: Vec<u64> = second.rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![11, 12]);
        assert!(!second.pagination.has_next);
        assert!(second.pagination.has_prev);
    }

    #[test]
    fn out_of_range_page_is_reclamped() {
        let records = sample_records();
        let criteria = FilterCriteria::new("", "数学", "");
        let view = grade_table_view(&records, &criteria, 2);
        assert_eq!(view.pagination.current_page, 1);
        assert_eq!(view.rows.len(), 4);
    }

    #[test]
    fn analytics_series_follow_catalog_order() {
        let records = sample_records();
        let view = analytics_view(&records, None);
        assert_eq!(view.subject_averages.labels, vec!["数学", "语文", "英语"]);
        assert_eq!(view.subject_averages.datasets[0].values[0], 91.5);
        assert_eq!(view.class_subject_averages.datasets.len(), CLASSES.len());
        // No records for 四年级一班: zeros for display.
        let fourth = &view.class_subject_averages.datasets[2];
        assert_eq!(fourth.label, "四年级一班");
        assert_eq!(fourth.values, vec![0.0, 0.0, 0.0]);
        assert_eq!(view.distribution.datasets[0].values.iter().sum::<f64>(), 12.0);
    }

    #[test]
    fn analytics_for_one_class() {
        let records = sample_records();
        let view = analytics_view(&records, Some("三年级二班"));
        assert_eq!(view.record_count, 0);
        assert_eq!(view.subject_averages.datasets[0].values, vec![0.0, 0.0, 0.0]);
        assert_eq!(view.class_subject_averages.datasets.len(), 1);
        assert!(view.monthly_trend.months.is_empty());
    }
}
