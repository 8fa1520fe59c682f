//! Selector Infrastructure
//!
//! Lookups on the comparison page are ordered cascades of CSS strategies.
//! The first strategy that yields a non-empty result wins; later ones only
//! exist to survive minor markup drift on the host page.

use dom_query::{Document, Selection};

use crate::dom;
use crate::options::Selectors;
use crate::parse;

/// A predicate applied to candidates of a strategy.
///
/// Candidates failing the rule are skipped, and a strategy with no accepted
/// candidate counts as empty.
pub type Rule = fn(&Selection) -> bool;

/// Accept candidates whose text contains a `<n> / <m>` page indicator.
#[must_use]
pub fn has_page_indicator_text(sel: &Selection) -> bool {
    parse::looks_like_page_indicator(&dom::text_content(sel))
}

/// All matches of the first strategy that yields any.
///
/// Each strategy is prefixed with `scope` (e.g. `#wrapper`). Returns the
/// index of the winning strategy along with its matches.
///
/// # Example
///
/// ```rust
/// use perflab_scrape::{dom, selector};
///
/// let doc = dom::parse(r#"<div id="w"><div role="row">a</div><div role="row">b</div></div>"#);
/// let strategies = vec![".ms-List-cell".to_string(), r#"[role="row"]"#.to_string()];
///
/// let (index, rows) = selector::first_non_empty(&doc, "w", &strategies).expect("rows");
/// assert_eq!(index, 1);
/// assert_eq!(rows.length(), 2);
/// ```
#[must_use]
pub fn first_non_empty<'a>(
    doc: &'a Document,
    scope: &str,
    strategies: &[String],
) -> Option<(usize, Selection<'a>)> {
    strategies.iter().enumerate().find_map(|(index, relative)| {
        dom::query_all(doc, &dom::scoped(scope, relative)).map(|sel| (index, sel))
    })
}

/// First element accepted by `rule` across the strategies, in order.
#[must_use]
pub fn first_matching<'a>(
    doc: &'a Document,
    scope: &str,
    strategies: &[String],
    rule: Rule,
) -> Option<Selection<'a>> {
    strategies.iter().find_map(|relative| {
        let matches = dom::query_all(doc, &dom::scoped(scope, relative))?;
        dom::elements(&matches)
            .into_iter()
            .find(|candidate| rule(candidate))
    })
}

/// Locate the page indicator of a region.
///
/// The primary structural path is trusted without looking at its text; the
/// fallbacks must contain a `<n> / <m>` indicator.
#[must_use]
pub fn page_indicator<'a>(
    doc: &'a Document,
    region_id: &str,
    selectors: &Selectors,
) -> Option<Selection<'a>> {
    if let Some(primary) = dom::query_first(doc, &dom::scoped(region_id, &selectors.page_indicator)) {
        return Some(primary);
    }
    let found = first_matching(
        doc,
        region_id,
        &selectors.page_indicator_fallbacks,
        has_page_indicator_text,
    );
    if found.is_some() {
        log::debug!("Found alternative page indicator for {region_id}");
    }
    found
}

/// Whether the region currently shows its busy/loading spinner.
#[must_use]
pub fn is_busy(doc: &Document, region_id: &str, selectors: &Selectors) -> bool {
    dom::query_first(doc, &dom::scoped(region_id, &selectors.busy_indicator)).is_some()
}

/// Visible row containers of a region.
#[must_use]
pub fn row_containers<'a>(
    doc: &'a Document,
    region_id: &str,
    selectors: &Selectors,
) -> Vec<Selection<'a>> {
    match first_non_empty(doc, region_id, &selectors.row_containers) {
        Some((index, rows)) => {
            if index > 0 {
                log::info!(
                    "Found {} cells using alternative selector: {}",
                    rows.length(),
                    selectors.row_containers[index]
                );
            }
            dom::elements(&rows)
        }
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REGION: &str = r#"
        <div id="wrap">
            <div><div class="ms-Spinner"></div></div>
            <div><div></div><div></div><div><button>&lt;</button><p>2 / 5</p><button>&gt;</button></div></div>
            <div class="ms-List"><div class="ms-List-page">
                <div class="ms-List-cell">a</div>
                <div class="ms-List-cell">b</div>
            </div></div>
        </div>
    "#;

    #[test]
    fn test_first_non_empty_prefers_earlier_strategy() {
        let doc = dom::parse(REGION);
        let strategies = vec![
            "div.ms-List-page div.ms-List-cell".to_string(),
            "div".to_string(),
        ];
        let (index, rows) = first_non_empty(&doc, "wrap", &strategies).expect("rows");
        assert_eq!(index, 0);
        assert_eq!(rows.length(), 2);
    }

    #[test]
    fn test_first_non_empty_none_when_all_empty() {
        let doc = dom::parse(REGION);
        let strategies = vec!["table".to_string(), "td".to_string()];
        assert!(first_non_empty(&doc, "wrap", &strategies).is_none());
    }

    #[test]
    fn test_primary_page_indicator() {
        let doc = dom::parse(REGION);
        let selectors = Selectors::default();
        let indicator = page_indicator(&doc, "wrap", &selectors).expect("indicator");
        assert_eq!(dom::text_content(&indicator).trim(), "2 / 5");
    }

    #[test]
    fn test_fallback_page_indicator_requires_text() {
        let doc = dom::parse(
            r#"<div id="wrap"><p>Showing results</p><span role="status">Page 1 / 3</span></div>"#,
        );
        let selectors = Selectors::default();
        let indicator = page_indicator(&doc, "wrap", &selectors).expect("indicator");
        assert_eq!(dom::text_content(&indicator).trim(), "Page 1 / 3");
    }

    #[test]
    fn test_no_page_indicator() {
        let doc = dom::parse(r#"<div id="wrap"><p>Nothing here</p></div>"#);
        assert!(page_indicator(&doc, "wrap", &Selectors::default()).is_none());
    }

    #[test]
    fn test_busy_detection() {
        let doc = dom::parse(REGION);
        assert!(is_busy(&doc, "wrap", &Selectors::default()));

        let idle = dom::parse(r#"<div id="wrap"><div></div></div>"#);
        assert!(!is_busy(&idle, "wrap", &Selectors::default()));
    }

    #[test]
    fn test_row_containers_fallback() {
        let doc = dom::parse(
            r#"<div id="wrap"><div role="row">1</div><div role="row">2</div><div role="row">3</div></div>"#,
        );
        assert_eq!(row_containers(&doc, "wrap", &Selectors::default()).len(), 3);
    }
}
