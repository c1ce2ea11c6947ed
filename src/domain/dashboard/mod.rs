pub mod state;
pub mod view;

pub use state::{DashboardState, Outcome};
pub use view::{
    analytics_view, grade_table_view, AnalyticsView, ChartData, Dataset, GradeTableView,
    PaginationView,
};
