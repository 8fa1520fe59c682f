//! Row extraction.
//!
//! Turns one visible row container into a [`MetricRecord`]. Cells are found
//! by marking the row with a temporary id and running the row-cell cascade
//! against it, so nested lists never leak cells into the wrong row.

use dom_query::{Document, Selection};

use crate::dom;
use crate::options::Options;
use crate::parse::{parse_metric_name, parse_percent_change, parse_value};
use crate::result::MetricRecord;
use crate::selector;

/// Why a row produced no record.
#[derive(Debug, Clone, PartialEq)]
pub enum RowSkip {
    /// Fewer cells than the minimum were found.
    TooFewCells(usize),
    /// The percent-change cell is not a number.
    BadPercentChange(String),
}

impl std::fmt::Display for RowSkip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooFewCells(found) => write!(f, "Found only {found} cells, expected at least 5"),
            Self::BadPercentChange(text) => write!(f, "Unparsable percent change: {text:?}"),
        }
    }
}

/// Outcome of parsing one row, with any unit mismatch warning.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRow {
    /// The record built from the row.
    pub record: MetricRecord,
    /// Set when baseline and comparison both carry a unit and they differ.
    pub unit_mismatch: Option<String>,
}

/// Collect the cell texts of a row in column order.
///
/// The row gets `options.row_marker` as its id while the cascade runs, and
/// its previous id (or lack of one) is restored afterwards.
#[must_use]
pub fn row_cell_texts(doc: &Document, row: &Selection, options: &Options) -> Vec<String> {
    let previous = dom::mark(row, &options.row_marker);
    let cells = selector::first_non_empty(doc, &options.row_marker, &options.selectors.row_cells)
        .map(|(_, cells)| {
            dom::elements(&cells)
                .iter()
                .map(|cell| dom::text_content(cell).trim().to_string())
                .collect()
        })
        .unwrap_or_default();
    dom::restore_id(row, previous.as_deref());
    cells
}

/// Build a record from cell texts.
///
/// Column order: metric name, group, percent change, baseline, comparison.
///
/// # Errors
///
/// Returns a [`RowSkip`] when the row cannot yield a complete record.
pub fn parse_cells(texts: &[String], min_cells: usize) -> Result<ParsedRow, RowSkip> {
    let min_cells = min_cells.max(5);
    if texts.len() < min_cells {
        return Err(RowSkip::TooFewCells(texts.len()));
    }

    let name = parse_metric_name(&texts[0]);
    let percent_change =
        parse_percent_change(&texts[2]).ok_or_else(|| RowSkip::BadPercentChange(texts[2].clone()))?;
    let baseline = parse_value(&texts[3]);
    let comparison = parse_value(&texts[4]);

    let units_differ =
        !baseline.unit.is_empty() && !comparison.unit.is_empty() && baseline.unit != comparison.unit;
    let unit_mismatch = units_differ
        .then(|| format!("Unmatched unit: {:?} vs. {:?}", baseline.unit, comparison.unit));
    let unit = if comparison.unit.is_empty() {
        baseline.unit
    } else {
        comparison.unit
    };

    Ok(ParsedRow {
        record: MetricRecord {
            benchmark: name.benchmark,
            story: name.story,
            metric: name.metric,
            group: texts[1].clone(),
            percent_change,
            baseline_value: baseline.value,
            comparison_value: comparison.value,
            unit,
        },
        unit_mismatch,
    })
}

/// Extract one row container.
///
/// Returns `None` (after logging a warning) when the row is skipped.
#[must_use]
pub fn extract_row(doc: &Document, row: &Selection, options: &Options) -> Option<ParsedRow> {
    let texts = row_cell_texts(doc, row, options);
    match parse_cells(&texts, options.min_row_cells) {
        Ok(parsed) => {
            if let Some(warning) = &parsed.unit_mismatch {
                log::warn!("{warning}");
            }
            Some(parsed)
        }
        Err(skip) => {
            log::warn!("Skipping row: {skip}");
            None
        }
    }
}
