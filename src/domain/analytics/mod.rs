//! Aggregation engine: pure functions over the current record set.
//!
//! Nothing here caches; every view refresh recomputes from the records it is given.

pub mod aggregate;
pub mod reports;
pub mod stats;
pub mod trend;

pub use aggregate::{
    average_by_class_and_subject, average_by_subject, series_for, ClassSubjectAverages,
    SubjectAverages,
};
pub use reports::{class_report, student_report, ClassReport, StudentReport, SubjectResult};
pub use stats::{
    score_distribution, subject_correlation, subject_summary, ScoreDistribution, ScoreSummary,
    SubjectCorrelation,
};
pub use trend::{
    class_comparison, monthly_trend, student_trend, ClassComparison, MonthlyTrend,
    StudentStanding, StudentTrend, SubjectTrend, TrendPoint,
};
