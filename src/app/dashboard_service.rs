//! The dashboard service behind the HTTP API.
//!
//! It owns:
//! 1.  The shared grade store every request derives its view from.
//! 2.  The registry of issued bearer tokens (token -> display label), bounded by a cap.
//! 3.  The account allowlist used by `/api/login`.

use crate::crypto::hashing::issue_token;
use crate::domain::dashboard::{analytics_view, grade_table_view, AnalyticsView, GradeTableView};
use crate::domain::error::DashboardError;
use crate::domain::grades::{GradeInput, GradeRecord, GradeStore};
use crate::domain::query::FilterCriteria;
use crate::domain::session::{Allowlist, AuthGrant, Credentials};
use crate::infra::config;
use std::collections::{HashMap, VecDeque};

pub struct DashboardService {
    store: GradeStore,
    /// Tokens never expire; once `session_cap` is reached the oldest one is revoked.
    sessions: HashMap<String, String>,
    /// Live tokens, oldest first.
    issued: VecDeque<String>,
    session_cap: usize,
    allowlist: Allowlist,
}

impl DashboardService {
    pub fn new(store: GradeStore, allowlist: Allowlist) -> Self {
        Self {
            store,
            sessions: HashMap::new(),
            issued: VecDeque::new(),
            session_cap: config::DEFAULT_MAX_SESSIONS,
            allowlist,
        }
    }

    pub fn with_sample_data() -> anyhow::Result<Self> {
        Ok(Self::new(GradeStore::with_sample_data(), Allowlist::builtin()?))
    }

    pub fn with_session_cap(mut self, cap: usize) -> Self {
        self.session_cap = cap.max(1);
        self
    }

    /// Seeds the store according to `SEED_SAMPLE_DATA` and caps sessions at `MAX_SESSIONS`.
    pub fn from_config() -> anyhow::Result<Self> {
        let store = if config::seed_sample_data()? {
            GradeStore::with_sample_data()
        } else {
            GradeStore::new()
        };
        tracing::info!("> DashboardService: starting with {} grade records", store.len());
        Ok(Self::new(store, Allowlist::builtin()?).with_session_cap(config::max_sessions()?))
    }

    pub fn store(&self) -> &GradeStore {
        &self.store
    }

    pub fn records(&self) -> &[GradeRecord] {
        self.store.all()
    }

    pub fn allowlist(&self) -> &Allowlist {
        &self.allowlist
    }

    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }

    /// Verifies and registers in one step. The HTTP handler splits the two so the Argon2 check
    /// runs outside the lock.
    pub fn login(&mut self, credentials: &Credentials) -> Result<AuthGrant, DashboardError> {
        let label = self.allowlist.verify(credentials)?.to_string();
        tracing::info!("> DashboardService: '{}' signed in", credentials.username);
        Ok(self.open_session(label))
    }

    /// Registers a fresh token for an already-verified account.
    pub fn open_session(&mut self, display_label: String) -> AuthGrant {
        while self.sessions.len() >= self.session_cap {
            let Some(oldest) = self.issued.pop_front() else {
                break;
            };
            self.sessions.remove(&oldest);
            tracing::info!("> DashboardService: session cap reached, oldest session revoked");
        }

        let token = issue_token();
        self.sessions.insert(token.clone(), display_label.clone());
        self.issued.push_back(token.clone());
        AuthGrant {
            token,
            display_label,
        }
    }

    /// Returns whether the token was known.
    pub fn logout(&mut self, token: &str) -> bool {
        if self.sessions.remove(token).is_none() {
            return false;
        }
        self.issued.retain(|t| t != token);
        true
    }

    pub fn session_label(&self, token: &str) -> Result<&str, DashboardError> {
        self.sessions
            .get(token)
            .map(String::as_str)
            .ok_or(DashboardError::SessionRequired)
    }

    pub fn grade_table(&self, criteria: &FilterCriteria, page_number: usize) -> GradeTableView {
        grade_table_view(self.store.all(), criteria, page_number)
    }

    pub fn create_grade(&mut self, input: GradeInput) -> Result<GradeRecord, DashboardError> {
        self.store.add_input(input).cloned()
    }

    pub fn update_grade(&mut self, id: u64, input: GradeInput) -> Result<GradeRecord, DashboardError> {
        self.store.update_input(id, input).cloned()
    }

    pub fn delete_grade(&mut self, id: u64) -> Result<GradeRecord, DashboardError> {
        self.store.delete(id)
    }

    pub fn analytics(&self, class_name: Option<&str>) -> AnalyticsView {
        analytics_view(self.store.all(), class_name)
    }
}
