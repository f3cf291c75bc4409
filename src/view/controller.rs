//! View state and the transitions that are allowed to change it.
//!
//! Every fetch is issued through the controller and tagged with a sequence
//! number. Completions are applied in whatever order they arrive, but only the
//! most recently issued request may change the state; older ones are dropped.

use crate::api::{FetchError, FetchResponse};
use crate::models::{ErrorBody, PaginationSummary, TransactionRecord, TransactionsPage};
use crate::pagination::PageStrip;
use crate::query::{build_query, FilterCriteria, SearchBy};
use std::fmt;
use tracing::{debug, info, warn};

pub const GENERIC_ERROR: &str = "something bad happened";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlertVariant {
    #[default]
    Danger,
}

impl fmt::Display for AlertVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertVariant::Danger => write!(f, "danger"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Alert {
    pub show: bool,
    pub variant: AlertVariant,
    pub message: String,
}

impl Alert {
    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            show: true,
            variant: AlertVariant::Danger,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub loading: bool,
    pub phase: Phase,
    pub transactions: Vec<TransactionRecord>,
    pub pagination: Option<PaginationSummary>,
    pub alert: Alert,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            loading: false,
            phase: Phase::Idle,
            transactions: Vec::new(),
            pagination: None,
            alert: Alert::default(),
        }
    }
}

/// A fetch the caller must run and report back through [`ResultViewController::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub seq: u64,
    pub criteria: FilterCriteria,
    pub query: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied(Phase),
    Stale,
}

#[derive(Debug)]
pub struct ResultViewController {
    state: ViewState,
    current_page: u64,
    search_by: SearchBy,
    search_text: String,
    last_issued: u64,
}

impl Default for ResultViewController {
    fn default() -> Self {
        Self {
            state: ViewState::default(),
            current_page: 1,
            search_by: SearchBy::Unset,
            search_text: String::new(),
            last_issued: 0,
        }
    }
}

impl ResultViewController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a page and filter other than the defaults.
    pub fn with_filter(page: u64, search_by: SearchBy, search_text: impl Into<String>) -> Self {
        Self {
            current_page: page.max(1),
            search_by,
            search_text: search_text.into(),
            ..Default::default()
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn current_page(&self) -> u64 {
        self.current_page
    }

    pub fn filter(&self) -> (SearchBy, &str) {
        (self.search_by, &self.search_text)
    }

    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria::new(self.current_page, self.search_by, self.search_text.clone())
    }

    /// Page strip for the current results; `None` before the first success.
    pub fn page_strip(&self) -> Option<PageStrip> {
        self.state.pagination.map(|summary| {
            PageStrip::compute(
                summary.total_documents,
                summary.per_page,
                self.current_page,
                !self.state.transactions.is_empty(),
            )
        })
    }

    pub fn mount(&mut self) -> FetchRequest {
        self.begin_fetch()
    }

    pub fn submit_filter(&mut self, search_by: SearchBy, search_text: impl Into<String>) -> FetchRequest {
        self.search_by = search_by;
        self.search_text = search_text.into();
        self.current_page = 1;
        info!(
            "Filter submitted: search_by={}, search_text={:?}",
            self.search_by, self.search_text
        );
        self.begin_fetch()
    }

    /// Pages are 1-based; 0 is treated as 1.
    pub fn select_page(&mut self, page: u64) -> FetchRequest {
        let page = page.max(1);
        self.current_page = page;
        debug!("Page selected: {}", page);
        self.begin_fetch()
    }

    pub fn dismiss_alert(&mut self) {
        self.state.alert.show = false;
    }

    fn begin_fetch(&mut self) -> FetchRequest {
        self.last_issued += 1;
        self.state.loading = true;
        self.state.phase = Phase::Loading;

        let criteria = self.criteria();
        let query = build_query(&criteria);
        debug!("Issuing request #{} with query {:?}", self.last_issued, query);

        FetchRequest {
            seq: self.last_issued,
            criteria,
            query,
        }
    }

    /// Apply the completion of request `seq`.
    pub fn apply(&mut self, seq: u64, result: Result<FetchResponse, FetchError>) -> ApplyOutcome {
        if seq != self.last_issued {
            debug!(
                "Discarding stale response #{} (latest issued is #{})",
                seq, self.last_issued
            );
            return ApplyOutcome::Stale;
        }

        self.state.loading = false;

        match interpret(result) {
            Ok(page) => {
                info!(
                    "Loaded {} transactions ({} total)",
                    page.transactions.len(),
                    page.pagination.total_documents
                );
                self.state.transactions = page.transactions;
                self.state.pagination = Some(page.pagination);
                self.state.alert.show = false;
                self.state.phase = Phase::Success;
            }
            Err(message) => {
                warn!("Request #{} failed: {}", seq, message);
                self.state.alert = Alert::danger(message);
                self.state.phase = Phase::Error;
            }
        }

        ApplyOutcome::Applied(self.state.phase)
    }
}

/// Route a completed fetch to the page it carries or the message to show.
pub fn interpret(result: Result<FetchResponse, FetchError>) -> Result<TransactionsPage, String> {
    let response = result.map_err(|e| e.to_string())?;

    match response.status {
        200..=299 => serde_json::from_value::<TransactionsPage>(response.body)
            .map_err(|e| format!("Failed to parse response: {}", e)),
        400..=500 => Err(error_message(response.body).unwrap_or_else(|| GENERIC_ERROR.to_string())),
        status => Err(error_message(response.body)
            .unwrap_or_else(|| format!("unexpected response status {}", status))),
    }
}

fn error_message(body: serde_json::Value) -> Option<String> {
    serde_json::from_value::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.trim().is_empty())
}
