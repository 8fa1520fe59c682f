//! Configuration options for scraping a comparison page.
//!
//! The `Options` struct controls timing, budgets and the selector cascades
//! used to find data regions on the host page. Defaults match the live
//! perf-lab layout.

use std::time::Duration;

/// CSS selectors describing the host page layout.
///
/// Region-relative selectors are appended to `#<region id>`; row-cell
/// selectors are appended to `#<row marker>`. Every list is tried in order
/// until one strategy yields a non-empty result.
#[derive(Debug, Clone)]
pub struct Selectors {
    /// Structural path of the improvements region.
    pub improvements_region: String,

    /// Structural path of the regressions region.
    pub regressions_region: String,

    /// Busy/spinner indicator, relative to a region.
    pub busy_indicator: String,

    /// Primary page indicator, relative to a region. Used without text checks.
    pub page_indicator: String,

    /// Fallback page-indicator strategies, relative to a region.
    ///
    /// Candidates must contain `<n> / <m>` text to be accepted.
    pub page_indicator_fallbacks: Vec<String>,

    /// Previous/next buttons, relative to a region (index 0 and 1).
    pub nav_buttons: String,

    /// Row container strategies, relative to a region.
    pub row_containers: Vec<String>,

    /// Cell strategies, relative to the marked row.
    pub row_cells: Vec<String>,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            improvements_region:
                "#main-content > div > div > div > div:nth-child(14) > div:nth-child(3)".to_string(),
            regressions_region:
                "#main-content > div > div > div > div:nth-child(14) > div:nth-child(2)".to_string(),
            busy_indicator: "> div:nth-child(1) > div.ms-Spinner".to_string(),
            page_indicator: "> div:nth-child(2) > div:nth-child(3) > p".to_string(),
            page_indicator_fallbacks: vec![
                "p".to_string(),
                r#"[role="status"]"#.to_string(),
                r#"div[class*="page"]"#.to_string(),
            ],
            nav_buttons: "> div:nth-child(2) > div:nth-child(3) > button".to_string(),
            row_containers: vec![
                "div.ms-List-page div.ms-List-cell".to_string(),
                ".ms-List-cell".to_string(),
                r#"[role="row"]"#.to_string(),
                r#"div[class*="row"]"#.to_string(),
                r#"div[class*="cell"]"#.to_string(),
            ],
            row_cells: vec![
                "div.ms-DetailsRow-cell".to_string(),
                r#"[role="gridcell"]"#.to_string(),
                r#"div[class*="cell"]"#.to_string(),
                "td".to_string(),
                "> div > div".to_string(),
            ],
        }
    }
}

/// Configuration options for an extraction run.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for the live page settings.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use perflab_scrape::Options;
///
/// let options = Options {
///     warmup: Duration::ZERO,
///     max_navigation_steps: 50,
///     ..Options::default()
/// };
/// assert_eq!(options.poll_interval, Duration::from_millis(100));
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Grace period before the first DOM query.
    ///
    /// Default: `2s`
    pub warmup: Duration,

    /// Delay between pagination polls (busy re-check or after a click).
    ///
    /// Default: `100ms`
    pub poll_interval: Duration,

    /// Delay between finishing one page and driving towards the next.
    ///
    /// Default: `100ms`
    pub page_advance_delay: Duration,

    /// Maximum polling steps spent reaching one target page.
    ///
    /// A permanently busy or non-advancing region fails the run once this
    /// budget is exhausted.
    ///
    /// Default: `600` (about one minute at the default poll interval)
    pub max_navigation_steps: usize,

    /// Time-to-live of a cached successful result.
    ///
    /// Default: `5min`
    pub cache_ttl: Duration,

    /// Minimum number of cells a row needs to produce a record.
    ///
    /// Default: `5`
    pub min_row_cells: usize,

    /// Expected leading label text of the improvements region.
    ///
    /// Default: `"P0 Improvements"`
    pub improvements_label: String,

    /// Expected leading label text of the regressions region.
    ///
    /// Default: `"P0 Regressions"`
    pub regressions_label: String,

    /// Id assigned to the improvements region on the host page.
    ///
    /// Default: `"P0ImprovementsWrapper"`
    pub improvements_id: String,

    /// Id assigned to the regressions region on the host page.
    ///
    /// Default: `"P0RegressionsWrapper"`
    pub regressions_id: String,

    /// Temporary id put on a row while its cells are selected.
    ///
    /// Default: `"currentCell"`
    pub row_marker: String,

    /// URL path fragment identifying supported comparison pages.
    ///
    /// Default: `"/perf-lab/perf-comparison-requests/details/"`
    pub page_path: String,

    /// Selector cascades for the page layout.
    pub selectors: Selectors,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            warmup: Duration::from_secs(2),
            poll_interval: Duration::from_millis(100),
            page_advance_delay: Duration::from_millis(100),
            max_navigation_steps: 600,
            cache_ttl: Duration::from_secs(5 * 60),
            min_row_cells: 5,
            improvements_label: "P0 Improvements".to_string(),
            regressions_label: "P0 Regressions".to_string(),
            improvements_id: "P0ImprovementsWrapper".to_string(),
            regressions_id: "P0RegressionsWrapper".to_string(),
            row_marker: "currentCell".to_string(),
            page_path: "/perf-lab/perf-comparison-requests/details/".to_string(),
            selectors: Selectors::default(),
        }
    }
}

impl Options {
    /// Options with every delay set to zero.
    ///
    /// Useful for static snapshots and tests where nothing re-renders.
    #[must_use]
    pub fn immediate() -> Self {
        Self {
            warmup: Duration::ZERO,
            poll_interval: Duration::ZERO,
            page_advance_delay: Duration::ZERO,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_live_page() {
        let opts = Options::default();
        assert_eq!(opts.warmup, Duration::from_secs(2));
        assert_eq!(opts.cache_ttl, Duration::from_secs(300));
        assert_eq!(opts.min_row_cells, 5);
        assert_eq!(opts.selectors.row_cells.len(), 5);
        assert!(opts.selectors.improvements_region.ends_with("div:nth-child(3)"));
        assert!(opts.selectors.regressions_region.ends_with("div:nth-child(2)"));
    }

    #[test]
    fn immediate_keeps_budgets() {
        let opts = Options::immediate();
        assert_eq!(opts.poll_interval, Duration::ZERO);
        assert_eq!(opts.max_navigation_steps, 600);
    }
}
