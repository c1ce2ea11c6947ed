//! Application state of one dashboard session and its transitions.
//!
//! Every transition consumes the state and hands back the next one together with the
//! user-visible outcome. A failed transition returns the input state untouched.

use super::view::{analytics_view, grade_table_view, AnalyticsView, GradeTableView};
use crate::domain::error::DashboardError;
use crate::domain::exchange::accept_import;
use crate::domain::grades::{GradeInput, GradeStore};
use crate::domain::query::{apply, FilterCriteria, PaginationState};
use crate::domain::session::SessionState;

/// `Ok(Some(message))` carries a notice to show; `Ok(None)` is a silent success.
pub type Outcome = Result<Option<String>, DashboardError>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    pub session: SessionState,
    pub store: GradeStore,
    pub criteria: FilterCriteria,
    pub pagination: PaginationState,
}

impl DashboardState {
    pub fn new(store: GradeStore) -> Self {
        Self {
            store,
            ..Self::default()
        }
    }

    pub fn with_sample_data() -> Self {
        Self::new(GradeStore::with_sample_data())
    }

    /// Starts from an already-resolved session, e.g. one restored from a persisted token.
    pub fn with_session(mut self, session: SessionState) -> Self {
        self.session = session;
        self
    }

    pub fn filtered_count(&self) -> usize {
        apply(self.store.all(), &self.criteria).len()
    }

    fn reclamp(mut self) -> Self {
        self.pagination = self.pagination.clamped(self.filtered_count());
        self
    }

    fn require_session(&self) -> Result<(), DashboardError> {
        if self.session.is_authenticated() {
            Ok(())
        } else {
            Err(DashboardError::SessionRequired)
        }
    }

    pub fn login_succeeded(mut self, display_label: impl Into<String>) -> (Self, Outcome) {
        self.session = SessionState::Authenticated {
            display_label: display_label.into(),
        };
        (self, Ok(None))
    }

    /// Back to `Anonymous`; the table returns to its unfiltered first page.
    pub fn logout(mut self) -> (Self, Outcome) {
        self.session = SessionState::Anonymous;
        self.criteria = FilterCriteria::default();
        self.pagination = PaginationState::first();
        (self, Ok(None))
    }

    pub fn apply_filter(mut self, criteria: FilterCriteria) -> (Self, Outcome) {
        if let Err(e) = self.require_session() {
            return (self, Err(e));
        }
        self.criteria = criteria;
        self.pagination = PaginationState::first();
        (self, Ok(None))
    }

    pub fn reset_filters(self) -> (Self, Outcome) {
        self.apply_filter(FilterCriteria::default())
    }

    pub fn change_page(mut self, page_number: usize) -> (Self, Outcome) {
        if let Err(e) = self.require_session() {
            return (self, Err(e));
        }
        self.pagination = PaginationState {
            current_page: page_number,
        };
        (self.reclamp(), Ok(None))
    }

    pub fn add_grade(mut self, input: GradeInput) -> (Self, Outcome) {
        if let Err(e) = self.require_session() {
            return (self, Err(e));
        }
        let id = match self.store.add_input(input).map(|r| r.id) {
            Ok(id) => id,
            Err(e) => return (self, Err(e)),
        };
        tracing::debug!("> Dashboard: added grade record {}", id);
        (self.reclamp(), Ok(Some("成绩添加成功！".to_string())))
    }

    pub fn edit_grade(mut self, id: u64, input: GradeInput) -> (Self, Outcome) {
        if let Err(e) = self.require_session() {
            return (self, Err(e));
        }
        if let Err(e) = self.store.update_input(id, input).map(|_| ()) {
            return (self, Err(e));
        }
        (self.reclamp(), Ok(Some("成绩更新成功！".to_string())))
    }

    pub fn delete_grade(mut self, id: u64) -> (Self, Outcome) {
        if let Err(e) = self.require_session() {
            return (self, Err(e));
        }
        if let Err(e) = self.store.delete(id) {
            return (self, Err(e));
        }
        (self.reclamp(), Ok(Some("成绩记录已删除！".to_string())))
    }

    /// Validates the filename only; no records are added.
    pub fn import_file(self, filename: &str) -> (Self, Outcome) {
        if let Err(e) = self.require_session() {
            return (self, Err(e));
        }
        match accept_import(filename) {
            Ok(receipt) => (self.reclamp(), Ok(Some(receipt.message))),
            Err(e) => (self, Err(e)),
        }
    }

    pub fn table_view(&self) -> GradeTableView {
        grade_table_view(self.store.all(), &self.criteria, self.pagination.current_page)
    }

    pub fn analytics_view(&self, class_name: Option<&str>) -> AnalyticsView {
        analytics_view(self.store.all(), class_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::grades::GradeFields;
    use chrono::NaiveDate;

    fn signed_in() -> DashboardState {
        DashboardState::with_sample_data().login_succeeded("教师用户").0
    }

    fn input(name: &str, subject: &str, score: i64) -> GradeInput {
        GradeFields {
            student_name: name.into(),
            student_id: "2023099".into(),
            class_name: "三年级一班".into(),
            subject: subject.into(),
            score,
            exam_date: NaiveDate::from_ymd_opt(2023, 9, 1).unwrap(),
        }
        .into()
    }

    #[test]
    fn anonymous_state_rejects_everything_but_login() {
        let state = DashboardState::with_sample_data();
        let before = state.clone();
        let (state, out) = state.delete_grade(1);
        assert_eq!(out, Err(DashboardError::SessionRequired));
        assert_eq!(state, before);
        let (_, out) = state.change_page(2);
        assert_eq!(out, Err(DashboardError::SessionRequired));
    }

    #[test]
    fn filter_change_resets_page() {
        let (state, _) = signed_in().change_page(2);
        assert_eq!(state.pagination.current_page, 2);
        let (state, out) = state.apply_filter(FilterCriteria::new("小", "", ""));
        assert_eq!(out, Ok(None));
        assert_eq!(state.pagination.current_page, 1);
    }

    #[test]
    fn page_reclamps_when_filter_shrinks_results() {
        let (state, _) = signed_in().change_page(2);
        // Bypass the reset to reproduce a stale page against a narrower filter.
        let mut state = state;
        state.criteria = FilterCriteria::new("", "英语", "");
        let stale_page = state.pagination.current_page;
        let (state, _) = state.change_page(stale_page);
        assert_eq!(state.pagination.current_page, 1);
        assert_eq!(state.table_view().rows.len(), 4);
    }

    #[test]
    fn change_page_clamps_to_last_page() {
        let (state, _) = signed_in().change_page(99);
        assert_eq!(state.pagination.current_page, 2);
        let (state, _) = state.change_page(0);
        assert_eq!(state.pagination.current_page, 1);
    }

    #[test]
    fn deleting_last_row_of_last_page_moves_back() {
        let (state, _) = signed_in().change_page(2);
        let (state, _) = state.delete_grade(12);
        let (state, out) = state.delete_grade(11);
        assert_eq!(out, Ok(Some("成绩记录已删除！".to_string())));
        assert_eq!(state.pagination.current_page, 1);
        assert_eq!(state.table_view().rows.len(), 10);
    }

    #[test]
    fn add_then_edit() {
        let (state, out) = signed_in().add_grade(input("新同学", "数学", 77));
        assert_eq!(out, Ok(Some("成绩添加成功！".to_string())));
        assert_eq!(state.store.len(), 13);
        let id = state.store.all().last().unwrap().id;

        let (state, out) = state.edit_grade(id, input("新同学", "英语", 81));
        assert!(out.is_ok());
        let rec = state.store.get(id).unwrap();
        assert_eq!(rec.subject, "英语");
        assert_eq!(rec.score, 81);
    }

    #[test]
    fn invalid_input_leaves_state_unchanged() {
        let state = signed_in();
        let before = state.clone();
        let (state, out) = state.add_grade(input("新同学", "数学", 101));
        assert!(matches!(out, Err(DashboardError::Validation(_))));
        assert_eq!(state, before);

        let (state, out) = state.edit_grade(999, input("新同学", "数学", 90));
        assert_eq!(out, Err(DashboardError::NotFound { id: 999 }));
        assert_eq!(state, before);
    }

    #[test]
    fn import_acknowledges_without_adding() {
        let (state, out) = signed_in().import_file("成绩.xlsx");
        assert!(out.unwrap().unwrap().contains("成绩.xlsx"));
        assert_eq!(state.store.len(), 12);
        let (_, out) = state.import_file("成绩.pdf");
        assert!(matches!(out, Err(DashboardError::Validation(_))));
    }

    #[test]
    fn logout_returns_to_anonymous() {
        let (state, _) = signed_in().apply_filter(FilterCriteria::by_class("三年级一班"));
        let (state, _) = state.logout();
        assert_eq!(state.session, SessionState::Anonymous);
        assert!(state.criteria.is_empty());
        assert_eq!(state.store.len(), 12);
    }
}
