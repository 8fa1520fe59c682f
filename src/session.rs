//! Extraction session for one comparison page.
//!
//! A session owns the host page handle, the options and the result cache.
//! It is the object a UI shell talks to: it hands out cached results within
//! the TTL, refuses a second run while one is in flight and keeps a status
//! for the status indicator.

use std::cell::{Cell, RefCell};
use std::sync::Arc;

use serde::Serialize;
use tokio::time::Instant;

use crate::cache::ResultCache;
use crate::diagnostics::PageDiagnostics;
use crate::error::{Error, Result};
use crate::extractor::Extractor;
use crate::host::HostPage;
use crate::options::Options;
use crate::progress::Progress;
use crate::result::Snapshot;
use crate::url_utils;

/// Message shown when the page layout is not there yet.
pub const PAGE_LOADING_MESSAGE: &str = "Page may still be loading. Please wait a moment and try again.";

/// What the session is doing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase", tag = "state")]
pub enum Status {
    /// No run has happened yet.
    #[default]
    Idle,
    /// A run is in flight.
    Fetching {
        /// Last reported percentage.
        percent: u8,
        /// Last reported phase label.
        phase: String,
    },
    /// Results are available.
    Ready {
        /// Number of improvement records.
        improvements: usize,
        /// Number of regression records.
        regressions: usize,
    },
    /// The last run failed.
    Failed {
        /// Error text of the failed run.
        message: String,
    },
}

/// Text to show the user for a failed request.
#[must_use]
pub fn user_message(error: &Error) -> String {
    if error.is_region_missing() {
        PAGE_LOADING_MESSAGE.to_string()
    } else {
        error.to_string()
    }
}

/// Clears the running flag when a run ends, including on cancellation.
struct RunningFlag<'a>(&'a Cell<bool>);

impl<'a> RunningFlag<'a> {
    fn raise(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self(flag)
    }
}

impl Drop for RunningFlag<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Extraction session bound to one host page.
pub struct Session<P: HostPage> {
    page: P,
    options: Options,
    cache: RefCell<ResultCache>,
    running: Cell<bool>,
    status: RefCell<Status>,
}

impl<P: HostPage> Session<P> {
    /// New idle session with an empty cache.
    pub fn new(page: P, options: Options) -> Self {
        let cache = ResultCache::new(options.cache_ttl);
        Self {
            page,
            options,
            cache: RefCell::new(cache),
            running: Cell::new(false),
            status: RefCell::new(Status::Idle),
        }
    }

    /// Session for `url`, or `None` when it is not a comparison page.
    pub fn activate(url: &str, page: P, options: Options) -> Option<Self> {
        if !url_utils::is_comparison_page(url, &options.page_path) {
            log::debug!("Not a comparison page: {url}");
            return None;
        }
        match url_utils::comparison_id(url, &options.page_path) {
            Some(id) => log::info!("Activating on comparison request {id}"),
            None => log::info!("Activating on {url}"),
        }
        Some(Self::new(page, options))
    }

    /// The host page.
    pub fn page(&self) -> &P {
        &self.page
    }

    /// Options in effect.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Current status.
    pub fn status(&self) -> Status {
        self.status.borrow().clone()
    }

    /// Whether a run is in flight.
    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    /// User-facing text for the last failure, if the last run failed.
    pub fn user_message(&self) -> Option<String> {
        match &*self.status.borrow() {
            Status::Failed { message } => Some(user_message(&Error::ExtractionFailed(message.clone()))),
            _ => None,
        }
    }

    /// Structure of the page as it is now, to explain a failed run.
    ///
    /// # Errors
    ///
    /// Returns the host error if the page cannot be snapshotted.
    pub fn diagnostics(&self) -> Result<PageDiagnostics> {
        Extractor::new(&self.page, &self.options).diagnose()
    }

    /// Results of the current page.
    ///
    /// Returns the cached snapshot while it is younger than the cache TTL,
    /// otherwise runs a fresh extraction.
    ///
    /// # Errors
    ///
    /// [`Error::AlreadyRunning`] while another run is in flight, and
    /// [`Error::ExtractionFailed`] when the run fails.
    pub async fn results(&self, progress: &dyn Progress) -> Result<Arc<Snapshot>> {
        if self.running.get() {
            return Err(Error::AlreadyRunning);
        }
        let cached = self.cache.borrow().get(Instant::now());
        if let Some(snapshot) = cached {
            log::info!("Using cached results");
            return Ok(snapshot);
        }
        self.run(progress).await
    }

    /// Drop cached results and run a fresh extraction.
    ///
    /// # Errors
    ///
    /// Same as [`Session::results`].
    pub async fn retry(&self, progress: &dyn Progress) -> Result<Arc<Snapshot>> {
        if self.running.get() {
            return Err(Error::AlreadyRunning);
        }
        log::info!("Retrying extraction");
        self.cache.borrow_mut().clear();
        self.run(progress).await
    }

    async fn run(&self, progress: &dyn Progress) -> Result<Arc<Snapshot>> {
        let _running = RunningFlag::raise(&self.running);
        self.set_status(Status::Fetching {
            percent: 0,
            phase: "Starting".to_string(),
        });

        let tracker = |percent: u8, phase: &str| {
            self.set_status(Status::Fetching {
                percent,
                phase: phase.to_string(),
            });
            progress.update(percent, phase);
        };
        let result = Extractor::new(&self.page, &self.options).extract(&tracker).await;

        if !result.success {
            self.set_status(Status::Failed {
                message: result.message.clone(),
            });
            return Err(Error::ExtractionFailed(result.message));
        }

        for warning in &result.warnings {
            log::debug!("Run warning: {warning}");
        }
        let snapshot = Arc::new(Snapshot::from_result(result));
        self.cache
            .borrow_mut()
            .store(Instant::now(), Arc::clone(&snapshot));
        self.set_status(Status::Ready {
            improvements: snapshot.improvements.len(),
            regressions: snapshot.regressions.len(),
        });
        Ok(snapshot)
    }

    fn set_status(&self, status: Status) {
        *self.status.borrow_mut() = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{SimulatedPage, SimulatedRegion, SimulatedRow};
    use crate::progress::NullProgress;
    use std::time::Duration;

    fn page() -> SimulatedPage {
        let region = |label: &str| {
            SimulatedRegion::new(label)
                .page(vec![SimulatedRow::new("aa/bb/cc", "g", "1", "1 ms", "1 ms")])
                .page(vec![SimulatedRow::new("dd/ee/ff", "g", "2", "2 ms", "2 ms")])
        };
        SimulatedPage::new(Some(region("P0 Improvements")), Some(region("P0 Regressions")))
    }

    #[tokio::test(start_paused = true)]
    async fn second_request_is_rejected_while_running() {
        let session = Session::new(page(), Options::default());
        let (first, second) = tokio::join!(session.results(&NullProgress), session.results(&NullProgress));
        assert!(first.is_ok());
        assert!(matches!(second, Err(Error::AlreadyRunning)));
        assert!(!session.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn status_follows_the_run() {
        let session = Session::new(page(), Options::default());
        assert_eq!(session.status(), Status::Idle);
        let snapshot = session.results(&NullProgress).await.expect("results");
        assert_eq!(
            session.status(),
            Status::Ready {
                improvements: snapshot.improvements.len(),
                regressions: snapshot.regressions.len(),
            }
        );
        assert!(session.user_message().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn retry_ignores_fresh_cache() {
        let session = Session::new(page(), Options::default());
        let first = session.results(&NullProgress).await.expect("first");
        tokio::time::advance(Duration::from_secs(10)).await;
        let again = session.retry(&NullProgress).await.expect("retry");
        assert!(!Arc::ptr_eq(&first, &again));
        assert_eq!(first.improvements, again.improvements);
    }

    #[tokio::test(start_paused = true)]
    async fn missing_layout_asks_to_wait() {
        let session = Session::new(SimulatedPage::new(None, None), Options::immediate());
        let err = session.results(&NullProgress).await.expect_err("no regions");
        assert_eq!(user_message(&err), PAGE_LOADING_MESSAGE);
        assert_eq!(session.user_message().as_deref(), Some(PAGE_LOADING_MESSAGE));
        assert!(matches!(session.status(), Status::Failed { .. }));

        let report = session.diagnostics().expect("diagnostics");
        assert!(report.has_main_content);
        assert!(!report.has_regions());
        assert_eq!(report.row_cells, 0);
    }

    #[test]
    fn activates_only_on_comparison_pages() {
        let url = "https://edgeteam.ms/perf-lab/perf-comparison-requests/details/77";
        assert!(Session::activate(url, page(), Options::default()).is_some());
        assert!(Session::activate("https://edgeteam.ms/perf-lab/", page(), Options::default()).is_none());
    }
}
