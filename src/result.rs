//! Result types for extraction output.
//!
//! This module defines the typed records pulled out of the comparison tables
//! and the outcome of a full extraction run.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One extracted comparison row.
///
/// All fields are always present; a row either yields a complete record or
/// none at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricRecord {
    /// First segment of the composite metric name.
    pub benchmark: String,

    /// Second segment of the composite metric name.
    pub story: String,

    /// Third segment of the composite metric name.
    pub metric: String,

    /// Group column text.
    pub group: String,

    /// Signed percent change.
    pub percent_change: f64,

    /// Baseline measurement.
    pub baseline_value: f64,

    /// Comparison measurement.
    pub comparison_value: f64,

    /// Unit of both measurements. The comparison unit wins on mismatch.
    pub unit: String,
}

/// Current pagination position of a region, as shown by its page indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// 1-based current page.
    pub current_page: u32,

    /// Total number of pages.
    pub total_page: u32,
}

impl Default for PageInfo {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_page: 1,
        }
    }
}

/// Outcome of one full extraction run.
///
/// When `success` is false both record lists are empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Whether both regions were walked to completion.
    pub success: bool,

    /// Records from the improvements region, in page order.
    pub improvements: Vec<MetricRecord>,

    /// Records from the regressions region, in page order.
    pub regressions: Vec<MetricRecord>,

    /// Human-readable summary or failure reason.
    pub message: String,

    /// Non-fatal issues seen during the run (label or unit mismatches).
    pub warnings: Vec<String>,
}

impl ExtractionResult {
    /// Successful result with a count summary message.
    #[must_use]
    pub fn success(
        improvements: Vec<MetricRecord>,
        regressions: Vec<MetricRecord>,
        warnings: Vec<String>,
    ) -> Self {
        let message = format!(
            "Found {} improvements and {} regressions",
            improvements.len(),
            regressions.len()
        );
        Self {
            success: true,
            improvements,
            regressions,
            message,
            warnings,
        }
    }

    /// Failed result. Record lists are always empty.
    #[must_use]
    pub fn failure(message: impl Into<String>, warnings: Vec<String>) -> Self {
        Self {
            success: false,
            improvements: Vec::new(),
            regressions: Vec::new(),
            message: message.into(),
            warnings,
        }
    }

    /// Total number of records across both regions.
    #[must_use]
    pub fn total(&self) -> usize {
        self.improvements.len() + self.regressions.len()
    }
}

/// Cached record lists of a successful run.
///
/// Lists are shared so that a cache hit hands out the very same records.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    /// Improvement records.
    pub improvements: Arc<[MetricRecord]>,

    /// Regression records.
    pub regressions: Arc<[MetricRecord]>,

    /// When the run that produced these lists finished.
    pub extracted_at: DateTime<Utc>,
}

impl Snapshot {
    /// Take the record lists out of a successful result.
    #[must_use]
    pub fn from_result(result: ExtractionResult) -> Self {
        Self {
            improvements: result.improvements.into(),
            regressions: result.regressions.into(),
            extracted_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_has_no_records() {
        let result = ExtractionResult::failure("boom", vec!["w".into()]);
        assert!(!result.success);
        assert_eq!(result.total(), 0);
        assert_eq!(result.warnings, vec!["w".to_string()]);
    }

    #[test]
    fn success_message_counts_both_lists() {
        let rec = MetricRecord::default();
        let result = ExtractionResult::success(vec![rec.clone()], vec![rec.clone(), rec], vec![]);
        assert_eq!(result.message, "Found 1 improvements and 2 regressions");
        assert_eq!(result.total(), 3);
    }

    #[test]
    fn record_serializes_camel_case() {
        let rec = MetricRecord {
            percent_change: -1.5,
            ..MetricRecord::default()
        };
        let json = serde_json::to_string(&rec).unwrap_or_default();
        assert!(json.contains("\"percentChange\":-1.5"));
        assert!(json.contains("\"baselineValue\""));
    }

    #[test]
    fn snapshot_serializes_shared_lists() {
        let rec = MetricRecord {
            benchmark: "speedometer3".to_string(),
            ..MetricRecord::default()
        };
        let snapshot = Snapshot::from_result(ExtractionResult::success(vec![rec], vec![], vec![]));
        let json = serde_json::to_value(&snapshot).expect("json");
        assert_eq!(json["improvements"][0]["benchmark"], "speedometer3");
        assert_eq!(json["regressions"].as_array().map(Vec::len), Some(0));
        assert!(json["extracted_at"].is_string());
    }
}
