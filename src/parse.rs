//! Text parsers for raw cell text.
//!
//! Pure functions turning the semi-structured strings of the comparison
//! table into typed fields. None of them fail: unparsable input maps to
//! documented defaults. Numbers are parsed locale-naively (period decimal
//! separator only, commas are thousands separators).

use std::num::IntErrorKind;

use crate::patterns::{METRIC_SEGMENT, PAGE_INDICATOR, VALUE_WITH_UNIT};
use crate::result::PageInfo;

/// The three parts of a composite metric name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricName {
    /// Benchmark (first segment, or the whole text when unsplittable).
    pub benchmark: String,
    /// Story (second segment).
    pub story: String,
    /// Metric (third segment).
    pub metric: String,
}

/// A measurement and its unit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Measurement {
    /// Numeric value, `0.0` when none was found.
    pub value: f64,
    /// Unit token directly after the number, possibly empty.
    pub unit: String,
}

/// Split a composite `benchmark/story/metric` text.
///
/// Segments start with a letter and run to the next `/`. With fewer than
/// three segments the whole input becomes the benchmark.
///
/// # Example
///
/// ```rust
/// use perflab_scrape::parse::parse_metric_name;
///
/// let name = parse_metric_name("speedometer3/TodoMVC-React/Score");
/// assert_eq!(name.benchmark, "speedometer3");
/// assert_eq!(name.story, "TodoMVC-React");
/// assert_eq!(name.metric, "Score");
/// ```
#[must_use]
pub fn parse_metric_name(text: &str) -> MetricName {
    let mut segments = METRIC_SEGMENT.find_iter(text).map(|m| m.as_str());
    match (segments.next(), segments.next(), segments.next()) {
        (Some(benchmark), Some(story), Some(metric)) => MetricName {
            benchmark: benchmark.to_string(),
            story: story.to_string(),
            metric: metric.to_string(),
        },
        _ => MetricName {
            benchmark: text.to_string(),
            ..MetricName::default()
        },
    }
}

/// Extract the first number and its unit from a value cell.
///
/// Thousands separators are stripped before conversion. A token that does
/// not convert (for example `1.2.3`) yields `0.0`.
///
/// # Example
///
/// ```rust
/// use perflab_scrape::parse::parse_value;
///
/// let m = parse_value("1,234.5 ms");
/// assert_eq!(m.value, 1234.5);
/// assert_eq!(m.unit, "ms");
/// ```
#[must_use]
pub fn parse_value(text: &str) -> Measurement {
    let Some(caps) = VALUE_WITH_UNIT.captures(text) else {
        return Measurement::default();
    };
    let number = caps.get(1).map_or("", |m| m.as_str()).replace(',', "");
    let value = number
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0);
    Measurement {
        value,
        unit: caps.get(2).map_or("", |m| m.as_str()).to_string(),
    }
}

/// Parse a bare signed percent-change cell.
///
/// Empty text is `0`. A trailing `%` is tolerated and thousands separators
/// are stripped, as in [`parse_value`]. Anything else that does not convert
/// to a finite number returns `None`.
#[must_use]
pub fn parse_percent_change(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let trimmed = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Whether the text contains a `<n> / <m>` page indicator.
#[must_use]
pub fn looks_like_page_indicator(text: &str) -> bool {
    PAGE_INDICATOR.is_match(text)
}

/// Read `{current, total}` from page-indicator text.
///
/// Unparsable text means a single page. Both values are at least 1.
///
/// # Example
///
/// ```rust
/// use perflab_scrape::parse::parse_page_indicator;
///
/// let info = parse_page_indicator("3 / 10");
/// assert_eq!((info.current_page, info.total_page), (3, 10));
/// assert_eq!(parse_page_indicator("loading").total_page, 1);
/// ```
#[must_use]
pub fn parse_page_indicator(text: &str) -> PageInfo {
    let parsed = PAGE_INDICATOR.captures(text).and_then(|caps| {
        let current = page_number(caps.get(1)?.as_str())?;
        let total = page_number(caps.get(2)?.as_str())?;
        Some(PageInfo {
            current_page: current.max(1),
            total_page: total.max(1),
        })
    });

    parsed.unwrap_or_else(|| {
        log::warn!("Could not parse page indicator: {:?}", text.trim());
        PageInfo::default()
    })
}

/// Page number of an indicator. Values beyond `u32` saturate.
fn page_number(digits: &str) -> Option<u32> {
    match digits.parse::<u32>() {
        Ok(n) => Some(n),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => {
            log::warn!("Page number {digits} out of range, using {}", u32::MAX);
            Some(u32::MAX)
        }
        Err(_) => None,
    }
}
