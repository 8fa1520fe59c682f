//! # perflab-scrape
//!
//! Scraper for perf-lab comparison dashboards.
//!
//! A comparison page shows two paginated tables, "P0 Improvements" and
//! "P0 Regressions". This library walks every page of both tables through a
//! [`HostPage`](host::HostPage), parses each visible row into a typed
//! [`MetricRecord`] and returns both lists in an [`ExtractionResult`].
//!
//! ## Quick Start
//!
//! ```rust
//! use perflab_scrape::host::{SimulatedPage, SimulatedRegion, SimulatedRow};
//! use perflab_scrape::{extract_blocking, NullProgress, Options};
//!
//! let page = SimulatedPage::new(
//!     Some(SimulatedRegion::new("P0 Improvements")
//!         .page(vec![SimulatedRow::new("speedometer3/TodoMVC/Score", "desktop", "-4.0", "100 ms", "96 ms")])
//!         .page(vec![SimulatedRow::new("jetstream2/Air/Runtime", "desktop", "-2.5", "40 ms", "39 ms")])),
//!     Some(SimulatedRegion::new("P0 Regressions")
//!         .page(vec![SimulatedRow::new("motionmark/Canvas/Score", "mobile", "6.1", "1,200 pts", "1,273 pts")])),
//! );
//!
//! let result = extract_blocking(&page, &Options::immediate(), &NullProgress)?;
//! assert!(result.success);
//! assert_eq!(result.message, "Found 2 improvements and 1 regressions");
//! assert_eq!(result.regressions[0].baseline_value, 1200.0);
//! # Ok::<(), perflab_scrape::Error>(())
//! ```
//!
//! ## Features
//!
//! - **Paginated extraction**: polls busy indicators and page numbers, clicks
//!   through pages in order and never revisits one
//! - **Resilient lookups**: ordered fallback selectors for rows, cells and
//!   page indicators, all configurable through [`Options`]
//! - **Sessions**: five-minute result cache, single-run guard and status for
//!   a UI shell ([`session::Session`])
//! - **Table helpers**: sorting and value formatting ([`report`])
//! - **Diagnostics**: what the page looked like when a run failed
//!   ([`diagnostics`])

mod error;
mod options;
mod patterns;
mod result;

/// DOM operations adapter over `dom_query`.
pub mod dom;

/// Ordered selector cascades for regions, rows and page indicators.
pub mod selector;

/// Cell-text parsers: metric names, values, percent changes, page indicators.
pub mod parse;

/// Host page abstraction and the static and simulated hosts.
pub mod host;

/// Progress reporting.
pub mod progress;

/// Row extraction, pagination, region walks and run orchestration.
pub mod extractor;

/// Single-slot result cache.
pub mod cache;

/// Extraction session with caching and a single-run guard.
pub mod session;

/// Table sorting, value formatting and summaries.
pub mod report;

/// Page structure diagnostics for failed runs.
pub mod diagnostics;

/// Charset detection and transcoding for saved pages.
pub mod encoding;

/// URL checks for comparison pages.
pub mod url_utils;

// Public API - re-exports
pub use diagnostics::PageDiagnostics;
pub use error::{Error, Result};
pub use extractor::Extractor;
pub use options::{Options, Selectors};
pub use progress::{NullProgress, Progress, ProgressSpan};
pub use result::{ExtractionResult, MetricRecord, PageInfo, Snapshot};

use host::HostPage;

/// Runs one extraction against `page`.
///
/// Never fails: errors are reported through a failed [`ExtractionResult`].
pub async fn extract<P: HostPage>(page: &P, options: &Options, progress: &dyn Progress) -> ExtractionResult {
    Extractor::new(page, options).extract(progress).await
}

/// Runs one extraction on a fresh current-thread runtime.
///
/// For callers without a runtime of their own, such as the binaries.
///
/// # Errors
///
/// Returns [`Error::Io`] if the runtime cannot be created.
pub fn extract_blocking<P: HostPage>(
    page: &P,
    options: &Options,
    progress: &dyn Progress,
) -> Result<ExtractionResult> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    Ok(runtime.block_on(extract(page, options, progress)))
}

/// Extracts from a saved comparison page with automatic charset detection.
///
/// Navigation controls of a saved page are inert: a table whose indicator
/// shows more than one page cannot be walked and the run fails with a
/// pagination error.
///
/// # Errors
///
/// Returns [`Error::Io`] if the runtime cannot be created.
///
/// # Example
///
/// ```rust
/// use perflab_scrape::{extract_bytes, Options};
///
/// let result = extract_bytes(b"<html><body>Loading</body></html>", &Options::immediate())?;
/// assert!(!result.success);
/// assert!(result.improvements.is_empty());
/// # Ok::<(), perflab_scrape::Error>(())
/// ```
pub fn extract_bytes(html: &[u8], options: &Options) -> Result<ExtractionResult> {
    let page = host::StaticPage::from_bytes(html);
    extract_blocking(&page, options, &NullProgress)
}
