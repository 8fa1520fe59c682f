//! Page structure diagnostics.
//!
//! When a run cannot find its regions the interesting question is what the
//! page looked like at that moment: whether the layout root rendered, whether
//! a spinner was still up, whether any rows or page indicators existed at
//! all. [`diagnose`] answers that from one snapshot.

use std::fmt;

use dom_query::Document;
use serde::Serialize;

use crate::dom;
use crate::options::Options;
use crate::selector;

/// Root container of the comparison page layout.
const LAYOUT_ROOT: &str = "#main-content";

/// What a snapshot of the comparison page contains.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDiagnostics {
    /// The layout root `#main-content` exists.
    pub has_main_content: bool,
    /// The improvements region selector matched.
    pub improvements_region: bool,
    /// The regressions region selector matched.
    pub regressions_region: bool,
    /// Text of the first `<n> / <m>` page indicator anywhere on the page.
    pub page_indicator: Option<String>,
    /// Row cells matched by the primary cell selector, page wide.
    pub row_cells: usize,
    /// A busy spinner is showing somewhere on the page.
    pub spinner_active: bool,
    /// Number of `div` elements.
    pub total_divs: usize,
    /// Elements whose text mentions "p0" (any case).
    pub p0_elements: usize,
    /// Elements whose text mentions "improvement" (any case).
    pub improvement_elements: usize,
    /// Elements whose text mentions "regression" (any case).
    pub regression_elements: usize,
}

impl PageDiagnostics {
    /// Both regions were found.
    #[must_use]
    pub fn has_regions(&self) -> bool {
        self.improvements_region && self.regressions_region
    }
}

impl fmt::Display for PageDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let found = |yes: bool| if yes { "found" } else { "missing" };
        write!(
            f,
            "main content {}, improvements {}, regressions {}, page indicator {}, {} row cells, spinner {}, \
             {} divs, text hits p0/improvement/regression {}/{}/{}",
            found(self.has_main_content),
            found(self.improvements_region),
            found(self.regressions_region),
            self.page_indicator.as_deref().unwrap_or("missing"),
            self.row_cells,
            if self.spinner_active { "active" } else { "idle" },
            self.total_divs,
            self.p0_elements,
            self.improvement_elements,
            self.regression_elements,
        )
    }
}

/// Inspect a page snapshot.
///
/// Region-relative selectors from `options` are used page wide, so the
/// counts describe the page even when no region could be located.
///
/// # Example
///
/// ```rust
/// use perflab_scrape::{diagnostics, dom, Options};
///
/// let doc = dom::parse(r#"<div id="main-content"><div class="ms-Spinner"></div></div>"#);
/// let report = diagnostics::diagnose(&doc, &Options::default());
/// assert!(report.has_main_content);
/// assert!(report.spinner_active);
/// assert!(!report.has_regions());
/// ```
#[must_use]
pub fn diagnose(doc: &Document, options: &Options) -> PageDiagnostics {
    let selectors = &options.selectors;
    let count = |selector: &str| dom::query_all(doc, selector).map_or(0, |sel| sel.length());

    let page_indicator = selectors.page_indicator_fallbacks.iter().find_map(|strategy| {
        let matches = dom::query_all(doc, strategy)?;
        dom::elements(&matches)
            .into_iter()
            .find(selector::has_page_indicator_text)
            .map(|sel| dom::text_content(&sel).trim().to_string())
    });

    let mut report = PageDiagnostics {
        has_main_content: dom::query_first(doc, LAYOUT_ROOT).is_some(),
        improvements_region: dom::query_first(doc, &selectors.improvements_region).is_some(),
        regressions_region: dom::query_first(doc, &selectors.regressions_region).is_some(),
        page_indicator,
        row_cells: selectors.row_cells.first().map_or(0, |strategy| count(strategy)),
        spinner_active: count(last_compound(&selectors.busy_indicator)) > 0,
        total_divs: count("div"),
        ..PageDiagnostics::default()
    };

    if let Some(all) = dom::query_all(doc, "body *") {
        for element in dom::elements(&all) {
            let text = dom::text_content(&element).to_lowercase();
            report.p0_elements += usize::from(text.contains("p0"));
            report.improvement_elements += usize::from(text.contains("improvement"));
            report.regression_elements += usize::from(text.contains("regression"));
        }
    }
    report
}

/// Last compound of a child-combinator path, usable without its scope.
///
/// `> div:nth-child(1) > div.ms-Spinner` becomes `div.ms-Spinner`.
fn last_compound(relative: &str) -> &str {
    relative.rsplit('>').next().map_or(relative, str::trim)
}
