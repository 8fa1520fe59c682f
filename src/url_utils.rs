//! URL checks for the comparison page.
//!
//! The session only activates on perf-lab comparison detail pages.

use url::Url;

/// Parse an absolute `http(s)` URL with a host.
#[must_use]
pub fn parse_url(url_str: &str) -> Option<Url> {
    let url = Url::parse(url_str.trim()).ok()?;
    (matches!(url.scheme(), "http" | "https") && url.host().is_some()).then_some(url)
}

/// Whether `url_str` points at a comparison detail page.
///
/// The path must contain `page_path` (see [`Options::page_path`](crate::Options::page_path)).
///
/// ```rust
/// use perflab_scrape::url_utils::is_comparison_page;
///
/// let path = "/perf-lab/perf-comparison-requests/details/";
/// assert!(is_comparison_page("https://edgeteam.ms/perf-lab/perf-comparison-requests/details/1234", path));
/// assert!(!is_comparison_page("https://edgeteam.ms/perf-lab/", path));
/// ```
#[must_use]
pub fn is_comparison_page(url_str: &str, page_path: &str) -> bool {
    parse_url(url_str).is_some_and(|url| url.path().contains(page_path))
}

/// Comparison request id: the first path segment after `page_path`.
#[must_use]
pub fn comparison_id(url_str: &str, page_path: &str) -> Option<String> {
    let url = parse_url(url_str)?;
    let (_, rest) = url.path().split_once(page_path)?;
    rest.split('/')
        .find(|segment| !segment.is_empty())
        .map(str::to_string)
}
