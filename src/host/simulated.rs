//! A deterministic, in-memory comparison page.
//!
//! `SimulatedPage` renders the same structure as the live perf-lab page: two
//! regions under `#main-content`, each with a label text node, a spinner
//! slot, a `<n> / <m>` page indicator between previous/next buttons and a
//! list of detail rows. Clicking a navigation button moves the region to the
//! adjacent page and keeps it busy for a configurable number of snapshots.

use std::cell::RefCell;
use std::fmt::Write as _;

use dom_query::Document;

use super::HostPage;
use crate::dom;
use crate::error::Result;

/// How a region misbehaves, if at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stall {
    /// Normal pagination.
    #[default]
    None,
    /// The spinner never goes away.
    AlwaysBusy,
    /// Clicks are swallowed; the page indicator never advances.
    Frozen,
}

/// One detail row, as the cell texts shown on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatedRow {
    cells: Vec<String>,
}

impl SimulatedRow {
    /// A well-formed five-cell row.
    #[must_use]
    pub fn new(metric_name: &str, group: &str, percent: &str, baseline: &str, comparison: &str) -> Self {
        Self::raw(&[metric_name, group, percent, baseline, comparison])
    }

    /// A row with arbitrary cells, e.g. too few to parse.
    #[must_use]
    pub fn raw(cells: &[&str]) -> Self {
        Self {
            cells: cells.iter().map(|c| (*c).to_string()).collect(),
        }
    }

    /// Cell texts in column order.
    #[must_use]
    pub fn cells(&self) -> &[String] {
        &self.cells
    }
}

/// One paged data region.
#[derive(Debug, Clone)]
pub struct SimulatedRegion {
    label: String,
    pages: Vec<Vec<SimulatedRow>>,
    start_page: usize,
    show_indicator: bool,
    stall: Stall,
}

impl SimulatedRegion {
    /// Empty region with the given label text.
    #[must_use]
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            pages: Vec::new(),
            start_page: 0,
            show_indicator: true,
            stall: Stall::None,
        }
    }

    /// Append a page of rows.
    #[must_use]
    pub fn page(mut self, rows: Vec<SimulatedRow>) -> Self {
        self.pages.push(rows);
        self
    }

    /// Page (1-based) the region shows before any navigation.
    #[must_use]
    pub fn starting_at(mut self, page: usize) -> Self {
        self.start_page = page.saturating_sub(1);
        self
    }

    /// Render no page indicator and no navigation controls.
    #[must_use]
    pub fn without_indicator(mut self) -> Self {
        self.show_indicator = false;
        self
    }

    /// Make the region misbehave.
    #[must_use]
    pub fn stalled(mut self, stall: Stall) -> Self {
        self.stall = stall;
        self
    }

    /// Total number of rows over all pages.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.pages.iter().map(Vec::len).sum()
    }
}

#[derive(Debug)]
struct RegionState {
    shape: SimulatedRegion,
    current: usize,
    busy_left: usize,
    id: Option<String>,
    clicks: usize,
    visited: Vec<u32>,
}

impl RegionState {
    fn new(shape: SimulatedRegion) -> Self {
        let current = shape.start_page.min(shape.pages.len().saturating_sub(1));
        Self {
            shape,
            current,
            busy_left: 0,
            id: None,
            clicks: 0,
            visited: vec![u32::try_from(current + 1).unwrap_or(u32::MAX)],
        }
    }

    fn total(&self) -> usize {
        self.shape.pages.len().max(1)
    }

    fn is_busy(&self) -> bool {
        self.shape.stall == Stall::AlwaysBusy || self.busy_left > 0
    }
}

#[derive(Debug)]
struct State {
    // Layout order: regressions render before improvements.
    regions: Vec<RegionState>,
    busy_polls: usize,
}

/// In-memory comparison page.
///
/// # Example
///
/// ```rust
/// use perflab_scrape::host::{HostPage, SimulatedPage, SimulatedRegion, SimulatedRow};
///
/// let page = SimulatedPage::new(
///     Some(SimulatedRegion::new("P0 Improvements").page(vec![
///         SimulatedRow::new("bench/story/metric", "desktop", "-4.2", "10 ms", "9.6 ms"),
///     ])),
///     Some(SimulatedRegion::new("P0 Regressions").page(vec![])),
/// );
/// let snap = page.snapshot().expect("snapshot");
/// assert!(snap.select("#main-content").exists());
/// ```
#[derive(Debug)]
pub struct SimulatedPage {
    state: RefCell<State>,
}

impl SimulatedPage {
    /// Build a page; `None` leaves a region out of the layout entirely.
    #[must_use]
    pub fn new(improvements: Option<SimulatedRegion>, regressions: Option<SimulatedRegion>) -> Self {
        // Absent regions drop out of the column, shifting later ones up.
        let regions = [regressions, improvements]
            .into_iter()
            .flatten()
            .map(RegionState::new)
            .collect();
        Self {
            state: RefCell::new(State {
                regions,
                busy_polls: 0,
            }),
        }
    }

    /// Keep a region busy for `polls` snapshots after each navigation click.
    #[must_use]
    pub fn with_busy_polls(self, polls: usize) -> Self {
        self.state.borrow_mut().busy_polls = polls;
        self
    }

    /// Total navigation clicks over all regions.
    #[must_use]
    pub fn clicks(&self) -> usize {
        self.state.borrow().regions.iter().map(|r| r.clicks).sum()
    }

    /// Pages shown by the region carrying `label`, in the order they appeared.
    #[must_use]
    pub fn visited(&self, label: &str) -> Vec<u32> {
        self.state
            .borrow()
            .regions
            .iter()
            .find(|r| r.shape.label == label)
            .map(|r| r.visited.clone())
            .unwrap_or_default()
    }

    /// Id assigned to the region carrying `label`, if any.
    #[must_use]
    pub fn assigned_id(&self, label: &str) -> Option<String> {
        self.state
            .borrow()
            .regions
            .iter()
            .find(|r| r.shape.label == label)
            .and_then(|r| r.id.clone())
    }

    /// Render the current page as HTML.
    #[must_use]
    pub fn render(&self) -> String {
        let state = self.state.borrow();
        let mut html = String::from(r#"<html><body><div id="main-content"><div><div><div>"#);
        for n in 1..14 {
            let _ = write!(html, r#"<div class="section-{n}"></div>"#);
        }
        html.push_str(r#"<div class="comparison"><div class="comparison-header">Comparison results</div>"#);
        for (index, region) in state.regions.iter().enumerate() {
            render_region(&mut html, index, region);
        }
        html.push_str("</div></div></div></div></div></body></html>");
        html
    }

    fn region_of(doc: &Document, selector: &str, index: usize) -> Option<(usize, Option<String>)> {
        let matches = dom::query_all(doc, selector)?;
        let element = dom::elements(&matches).into_iter().nth(index)?;
        let region = dom::get_attribute(&element, "data-region")?.parse().ok()?;
        Some((region, dom::get_attribute(&element, "data-nav")))
    }
}

impl HostPage for SimulatedPage {
    fn snapshot(&self) -> Result<Document> {
        let doc = dom::parse(&self.render());
        for region in &mut self.state.borrow_mut().regions {
            region.busy_left = region.busy_left.saturating_sub(1);
        }
        Ok(doc)
    }

    fn assign_id(&self, selector: &str, id: &str) -> Result<bool> {
        let doc = dom::parse(&self.render());
        let Some((region, _)) = Self::region_of(&doc, selector, 0) else {
            return Ok(false);
        };
        if let Some(state) = self.state.borrow_mut().regions.get_mut(region) {
            state.id = Some(id.to_string());
        }
        Ok(true)
    }

    fn click(&self, selector: &str, index: usize) -> Result<bool> {
        let doc = dom::parse(&self.render());
        let Some((region, nav)) = Self::region_of(&doc, selector, index) else {
            return Ok(false);
        };
        let mut state = self.state.borrow_mut();
        let busy_polls = state.busy_polls;
        let Some(region) = state.regions.get_mut(region) else {
            return Ok(false);
        };
        region.clicks += 1;
        if region.shape.stall == Stall::Frozen {
            return Ok(true);
        }
        let target = match nav.as_deref() {
            Some("prev") => region.current.checked_sub(1),
            Some("next") if region.current + 1 < region.total() => Some(region.current + 1),
            _ => None,
        };
        if let Some(target) = target {
            region.current = target;
            region.busy_left = busy_polls;
            region.visited.push(u32::try_from(target + 1).unwrap_or(u32::MAX));
        }
        Ok(true)
    }
}

fn render_region(html: &mut String, index: usize, region: &RegionState) {
    let id_attr = region
        .id
        .as_ref()
        .map(|id| format!(r#" id="{}""#, escape(id)))
        .unwrap_or_default();
    let _ = write!(html, r#"<div class="region" data-region="{index}"{id_attr}>{}"#, escape(&region.shape.label));

    html.push_str("<div>");
    if region.is_busy() {
        html.push_str(r#"<div class="ms-Spinner"></div>"#);
    }
    html.push_str("</div>");

    html.push_str(r#"<div class="pager"><div></div><div></div><div>"#);
    if region.shape.show_indicator {
        let _ = write!(
            html,
            r#"<button data-region="{index}" data-nav="prev">Previous</button><p>{} / {}</p><button data-region="{index}" data-nav="next">Next</button>"#,
            region.current + 1,
            region.total()
        );
    }
    html.push_str("</div></div>");

    html.push_str(r#"<div class="ms-List"><div class="ms-List-page">"#);
    for row in region.shape.pages.get(region.current).into_iter().flatten() {
        html.push_str(r#"<div class="ms-List-cell"><div class="ms-DetailsRow">"#);
        for cell in row.cells() {
            let _ = write!(html, r#"<div class="ms-DetailsRow-cell">{}</div>"#, escape(cell));
        }
        html.push_str("</div></div>");
    }
    html.push_str("</div></div></div>");
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
