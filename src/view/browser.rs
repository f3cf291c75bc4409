use crate::api::{FetchError, FetchResponse, TransactionSource};
use crate::query::SearchBy;
use crate::view::controller::{ApplyOutcome, FetchRequest, ResultViewController};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, error};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationError {
    #[error("No results loaded")]
    NothingLoaded,

    #[error("Already on the last page")]
    AtLastPage,

    #[error("Already on the first page")]
    AtFirstPage,
}

struct Completion {
    seq: u64,
    result: Result<FetchResponse, FetchError>,
}

/// Runs the controller's fetches as tasks and feeds their completions back
/// one at a time, so the view state only ever has a single writer.
pub struct TransactionBrowser {
    controller: ResultViewController,
    source: Arc<dyn TransactionSource>,
    sender: mpsc::Sender<Completion>,
    receiver: mpsc::Receiver<Completion>,
    in_flight: usize,
}

impl TransactionBrowser {
    const CHANNEL_CAPACITY: usize = 64;

    pub fn new(source: Arc<dyn TransactionSource>, controller: ResultViewController) -> Self {
        let (sender, receiver) = mpsc::channel(Self::CHANNEL_CAPACITY);
        Self {
            controller,
            source,
            sender,
            receiver,
            in_flight: 0,
        }
    }

    pub fn controller(&self) -> &ResultViewController {
        &self.controller
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn mount(&mut self) -> u64 {
        let request = self.controller.mount();
        self.dispatch(request)
    }

    pub fn submit_filter(&mut self, search_by: SearchBy, search_text: impl Into<String>) -> u64 {
        let request = self.controller.submit_filter(search_by, search_text);
        self.dispatch(request)
    }

    pub fn select_page(&mut self, page: u64) -> u64 {
        let request = self.controller.select_page(page);
        self.dispatch(request)
    }

    /// Move forward one page if the current results have one.
    pub fn next_page(&mut self) -> Result<u64, NavigationError> {
        let strip = self.controller.page_strip().ok_or(NavigationError::NothingLoaded)?;
        if !strip.has_next {
            return Err(NavigationError::AtLastPage);
        }
        Ok(self.select_page(self.controller.current_page() + 1))
    }

    pub fn previous_page(&mut self) -> Result<u64, NavigationError> {
        let strip = self.controller.page_strip().ok_or(NavigationError::NothingLoaded)?;
        if !strip.has_previous {
            return Err(NavigationError::AtFirstPage);
        }
        let target = self.controller.current_page().min(strip.total_pages + 1) - 1;
        Ok(self.select_page(target))
    }

    pub fn dismiss_alert(&mut self) {
        self.controller.dismiss_alert();
    }

    fn dispatch(&mut self, request: FetchRequest) -> u64 {
        let FetchRequest { seq, query, .. } = request;
        let source = self.source.clone();
        let sender = self.sender.clone();

        self.in_flight += 1;
        tokio::spawn(async move {
            // The fetch runs in its own task so a panic still yields a completion.
            let result = match tokio::spawn(async move { source.fetch(&query).await }).await {
                Ok(result) => result,
                Err(e) => {
                    error!("Request #{} task failed: {}", seq, e);
                    Err(FetchError::TaskFailed(e.to_string()))
                }
            };
            if sender.send(Completion { seq, result }).await.is_err() {
                debug!("Browser dropped before request #{} completed", seq);
            }
        });

        seq
    }

    /// Wait for the next completion and apply it.
    pub async fn settle_next(&mut self) -> Option<ApplyOutcome> {
        if self.in_flight == 0 {
            return None;
        }

        match self.receiver.recv().await {
            Some(Completion { seq, result }) => {
                self.in_flight -= 1;
                Some(self.controller.apply(seq, result))
            }
            None => {
                error!("Completion channel closed with {} requests in flight", self.in_flight);
                self.in_flight = 0;
                None
            }
        }
    }

    /// Apply completions until nothing is in flight.
    pub async fn settle(&mut self) {
        while self.settle_next().await.is_some() {}
    }
}
