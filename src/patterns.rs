//! Compiled regex patterns for cell-text parsing.
//!
//! All patterns are compiled once at first use with `LazyLock`.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

/// One segment of a composite metric name: a letter followed by anything up
/// to the next `/`.
pub static METRIC_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z][^/]+").expect("METRIC_SEGMENT regex"));

/// Numeric token (digits, periods, thousands commas) and an optional adjoining unit.
pub static VALUE_WITH_UNIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9.,]+)\s*([a-zA-Z%]*)").expect("VALUE_WITH_UNIT regex")
});

/// `<current> / <total>` page indicator text.
pub static PAGE_INDICATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*/\s*(\d+)").expect("PAGE_INDICATOR regex"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_segment_skips_leading_digits() {
        let segs: Vec<_> = METRIC_SEGMENT
            .find_iter("2/speedometer/score")
            .map(|m| m.as_str())
            .collect();
        assert_eq!(segs, vec!["speedometer", "score"]);
    }

    #[test]
    fn page_indicator_tolerates_spacing() {
        let caps = PAGE_INDICATOR.captures("Page 3/12").expect("match");
        assert_eq!(&caps[1], "3");
        assert_eq!(&caps[2], "12");
    }
}
