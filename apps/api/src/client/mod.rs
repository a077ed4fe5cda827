//! Prompt Store Client — submits interpreted prompts and keeps the displayed list.
//!
//! Submission runs `Idle → Submitting → Idle`; a call arriving while another is
//! `Submitting` is rejected rather than queued. Each successful fetch replaces the
//! displayed list wholesale, a failed fetch leaves it as it was.

pub mod search;
pub mod timeframe;

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::errors::{AppError, GENERIC_FAILURE};
use crate::interpreter::{interpret, TokenMatching};
use crate::models::prompt::PromptRecord;
use crate::store::PromptStore;

pub use search::filter_by_search;
pub use timeframe::TimeFilter;

/// Supplies "today" for date detection and timeframe ranges.
pub type Clock = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    Idle,
    Submitting,
}

/// User-visible result of the last finished submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    Saved,
    Failed,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::Saved => "Prompt saved",
            Notice::Failed => GENERIC_FAILURE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Blank input; nothing was sent and nothing changed.
    Ignored,
    /// Row stored. `refreshed` is false when the follow-up fetch failed.
    Stored {
        record: PromptRecord,
        refreshed: bool,
    },
}

#[derive(Debug)]
struct View {
    state: SubmissionState,
    notice: Option<Notice>,
    timeframe: TimeFilter,
    records: Vec<PromptRecord>,
}

pub struct PromptStoreClient {
    store: Arc<dyn PromptStore>,
    matching: TokenMatching,
    clock: Clock,
    view: Mutex<View>,
}

/// Returns the client to `Idle` however the submission ends, including when
/// the calling future is dropped mid-request.
struct SubmittingGuard<'a> {
    client: &'a PromptStoreClient,
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        self.client.view().state = SubmissionState::Idle;
    }
}

impl PromptStoreClient {
    pub fn new(store: Arc<dyn PromptStore>, matching: TokenMatching) -> Self {
        Self::with_clock(store, matching, Arc::new(|| Local::now().date_naive()))
    }

    pub fn with_clock(store: Arc<dyn PromptStore>, matching: TokenMatching, clock: Clock) -> Self {
        Self {
            store,
            matching,
            clock,
            view: Mutex::new(View {
                state: SubmissionState::Idle,
                notice: None,
                timeframe: TimeFilter::default(),
                records: Vec::new(),
            }),
        }
    }

    pub fn today(&self) -> NaiveDate {
        (self.clock)()
    }

    pub fn matching(&self) -> TokenMatching {
        self.matching
    }

    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }

    pub fn state(&self) -> SubmissionState {
        self.view().state
    }

    pub fn notice(&self) -> Option<Notice> {
        self.view().notice
    }

    pub fn timeframe(&self) -> TimeFilter {
        self.view().timeframe
    }

    /// Snapshot of the currently displayed list.
    pub fn displayed(&self) -> Vec<PromptRecord> {
        self.view().records.clone()
    }

    /// The displayed list narrowed by `term`; no store round-trip.
    pub fn search(&self, term: &str) -> Vec<PromptRecord> {
        filter_by_search(&self.view().records, term)
    }

    // The lock is never held across an await, so a poisoned lock only means a
    // panic mid-assignment; the view is still usable.
    fn view(&self) -> MutexGuard<'_, View> {
        self.view.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn begin_submission(&self) -> Result<SubmittingGuard<'_>, AppError> {
        let mut view = self.view();
        if view.state == SubmissionState::Submitting {
            return Err(AppError::SubmissionInFlight);
        }
        view.state = SubmissionState::Submitting;
        Ok(SubmittingGuard { client: self })
    }

    /// Interprets and stores `text`, then refreshes the list for `timeframe`.
    pub async fn submit(&self, text: &str, timeframe: TimeFilter) -> Result<SubmitOutcome, AppError> {
        if text.trim().is_empty() {
            return Ok(SubmitOutcome::Ignored);
        }

        let guard = self.begin_submission()?;

        let prompt = interpret(text, self.today(), self.matching).into_new_prompt(text.to_string());
        let record = match self.store.insert(prompt).await {
            Ok(record) => record,
            Err(e) => {
                error!("Failed to store prompt: {e}");
                self.view().notice = Some(Notice::Failed);
                return Err(AppError::Insert(e));
            }
        };

        info!(
            "Stored prompt {} (platform={:?}, layout={:?}, content_date={:?})",
            record.id, record.platform, record.layout_type, record.content_date
        );
        self.view().notice = Some(Notice::Saved);
        drop(guard);

        let refreshed = match self.fetch_window(timeframe).await {
            Ok(_) => true,
            Err(e) => {
                warn!("Prompt stored but list refresh failed: {e}");
                false
            }
        };

        Ok(SubmitOutcome::Stored { record, refreshed })
    }

    /// Fetches the rows for `timeframe` and makes them the displayed list.
    pub async fn fetch_window(&self, timeframe: TimeFilter) -> Result<Vec<PromptRecord>, AppError> {
        let range = timeframe.range(self.today());
        match self.store.list(range).await {
            Ok(records) => {
                let mut view = self.view();
                view.timeframe = timeframe;
                view.records = records.clone();
                Ok(records)
            }
            Err(e) => {
                error!("Failed to fetch prompts for {timeframe}: {e}");
                Err(AppError::Fetch(e))
            }
        }
    }
}
