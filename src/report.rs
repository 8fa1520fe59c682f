//! Table view helpers: column sorting, value formatting and run summaries.

use std::cmp::Ordering;

use serde::Serialize;

use crate::result::MetricRecord;

/// Sortable table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Benchmark,
    Story,
    Metric,
    Group,
    PercentChange,
    BaselineValue,
    ComparisonValue,
}

impl SortKey {
    /// Direction a column starts with when first selected.
    #[must_use]
    pub fn initial_direction(self) -> SortDirection {
        match self {
            Self::PercentChange => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }

    fn compare(self, a: &MetricRecord, b: &MetricRecord) -> Ordering {
        let text = |a: &str, b: &str| a.to_lowercase().cmp(&b.to_lowercase());
        match self {
            Self::Benchmark => text(&a.benchmark, &b.benchmark),
            Self::Story => text(&a.story, &b.story),
            Self::Metric => text(&a.metric, &b.metric),
            Self::Group => text(&a.group, &b.group),
            Self::PercentChange => a.percent_change.total_cmp(&b.percent_change),
            Self::BaselineValue => a.baseline_value.total_cmp(&b.baseline_value),
            Self::ComparisonValue => a.comparison_value.total_cmp(&b.comparison_value),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// The other direction.
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Arrow shown next to the column header.
    #[must_use]
    pub fn indicator(self) -> &'static str {
        match self {
            Self::Asc => "▲",
            Self::Desc => "▼",
        }
    }
}

/// Sort state of one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableSort {
    /// Column sorted by.
    pub key: SortKey,
    /// Direction of the sort.
    pub direction: SortDirection,
}

impl Default for TableSort {
    fn default() -> Self {
        Self {
            key: SortKey::PercentChange,
            direction: SortDirection::Desc,
        }
    }
}

impl TableSort {
    /// State after the user clicks the header of `key`.
    ///
    /// The current column flips direction; any other column starts in its
    /// initial direction.
    #[must_use]
    pub fn toggle(self, key: SortKey) -> Self {
        let direction = if self.key == key {
            self.direction.flipped()
        } else {
            key.initial_direction()
        };
        Self { key, direction }
    }
}

/// Sort records in place. Stable; text columns ignore case.
pub fn sort_records(records: &mut [MetricRecord], sort: TableSort) {
    records.sort_by(|a, b| {
        let ord = sort.key.compare(a, b);
        match sort.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
}

/// Order used when a table is first shown: largest absolute change first.
pub fn sort_by_magnitude(records: &mut [MetricRecord]) {
    records.sort_by(|a, b| b.percent_change.abs().total_cmp(&a.percent_change.abs()));
}

/// Format a measurement with a K/M suffix and two decimals.
///
/// ```rust
/// use perflab_scrape::report::format_value;
///
/// assert_eq!(format_value(1_234.5, "ms"), "1.23K ms");
/// assert_eq!(format_value(2_500_000.0, "B"), "2.50M B");
/// assert_eq!(format_value(12.0, "%"), "12.00 %");
/// ```
#[must_use]
pub fn format_value(value: f64, unit: &str) -> String {
    if value >= 1_000_000.0 {
        format!("{:.2}M {unit}", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{:.2}K {unit}", value / 1_000.0)
    } else {
        format!("{value:.2} {unit}")
    }
}

/// Percent change with an explicit `+` for positive values.
#[must_use]
pub fn format_percent_change(percent: f64) -> String {
    if percent > 0.0 {
        format!("+{percent}%")
    } else {
        format!("{percent}%")
    }
}

/// Record counts of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Summary {
    /// Number of improvement records.
    pub improvements: usize,
    /// Number of regression records.
    pub regressions: usize,
    /// Sum of both.
    pub total: usize,
}

impl Summary {
    /// Count both record lists.
    #[must_use]
    pub fn of(improvements: &[MetricRecord], regressions: &[MetricRecord]) -> Self {
        Self {
            improvements: improvements.len(),
            regressions: regressions.len(),
            total: improvements.len() + regressions.len(),
        }
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} improvements, {} regressions ({} total)",
            self.improvements, self.regressions, self.total
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(benchmark: &str, percent_change: f64) -> MetricRecord {
        MetricRecord {
            benchmark: benchmark.to_string(),
            percent_change,
            ..MetricRecord::default()
        }
    }

    #[test]
    fn toggle_rules() {
        let sort = TableSort::default();
        assert_eq!(sort.direction, SortDirection::Desc);

        let flipped = sort.toggle(SortKey::PercentChange);
        assert_eq!(flipped.direction, SortDirection::Asc);

        let by_name = flipped.toggle(SortKey::Benchmark);
        assert_eq!(by_name, TableSort { key: SortKey::Benchmark, direction: SortDirection::Asc });

        let back = by_name.toggle(SortKey::PercentChange);
        assert_eq!(back.direction, SortDirection::Desc);
    }

    #[test]
    fn text_sort_ignores_case() {
        let mut records = vec![record("beta", 0.0), record("Alpha", 0.0), record("gamma", 0.0)];
        sort_records(&mut records, TableSort { key: SortKey::Benchmark, direction: SortDirection::Asc });
        let names: Vec<_> = records.iter().map(|r| r.benchmark.as_str()).collect();
        assert_eq!(names, ["Alpha", "beta", "gamma"]);
    }

    #[test]
    fn magnitude_order() {
        let mut records = vec![record("a", 2.0), record("b", -9.5), record("c", 4.0)];
        sort_by_magnitude(&mut records);
        let names: Vec<_> = records.iter().map(|r| r.benchmark.as_str()).collect();
        assert_eq!(names, ["b", "c", "a"]);
    }

    #[test]
    fn percent_formatting() {
        assert_eq!(format_percent_change(3.5), "+3.5%");
        assert_eq!(format_percent_change(-12.0), "-12%");
        assert_eq!(format_percent_change(0.0), "0%");
    }

    #[test]
    fn summary_counts() {
        let summary = Summary::of(&[record("a", 1.0)], &[record("b", 1.0), record("c", 1.0)]);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.to_string(), "1 improvements, 2 regressions (3 total)");
    }
}
