//! Pagination controller.
//!
//! Drives one region to a target page by polling the live page: while the
//! region shows its spinner it waits, otherwise it reads the page indicator
//! and clicks previous/next until the indicator shows the target. Every poll
//! works on a fresh snapshot because the host re-renders on its own schedule.

use dom_query::Document;

use crate::dom;
use crate::error::{Error, Result};
use crate::host::HostPage;
use crate::options::Options;
use crate::parse::parse_page_indicator;
use crate::result::PageInfo;
use crate::selector;

/// Index of the "previous" control among the region's navigation buttons.
const PREV_BUTTON: usize = 0;
/// Index of the "next" control.
const NEXT_BUTTON: usize = 1;

/// Controller state after one polling step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    /// The region shows its loading indicator.
    Busy,
    /// A navigation control was just activated.
    Navigating,
    /// The page indicator shows the target page.
    AtTarget(PageInfo),
    /// The step budget ran out.
    Failed,
}

/// Read the region's current position from a snapshot.
///
/// A region without any page indicator reads as a single page.
#[must_use]
pub fn read_page_info(doc: &Document, region_id: &str, options: &Options) -> PageInfo {
    selector::page_indicator(doc, region_id, &options.selectors)
        .map(|indicator| parse_page_indicator(&dom::text_content(&indicator)))
        .unwrap_or_default()
}

/// Polling state machine for one region.
pub struct Navigator<'a, P: HostPage> {
    page: &'a P,
    region_id: &'a str,
    options: &'a Options,
}

impl<'a, P: HostPage> Navigator<'a, P> {
    /// Controller for the region carrying `region_id`.
    pub fn new(page: &'a P, region_id: &'a str, options: &'a Options) -> Self {
        Self {
            page,
            region_id,
            options,
        }
    }

    /// Perform one polling step towards `target`.
    ///
    /// # Errors
    ///
    /// Fails if the host cannot be read or the needed control is missing.
    pub fn step(&self, target: u32) -> Result<NavState> {
        let doc = self.page.snapshot()?;
        if selector::is_busy(&doc, self.region_id, &self.options.selectors) {
            return Ok(NavState::Busy);
        }

        let info = read_page_info(&doc, self.region_id, self.options);
        if info.current_page == target {
            return Ok(NavState::AtTarget(info));
        }
        if target < 1 || target > info.total_page {
            log::warn!(
                "Unexpected target page {target} in total {} pages ({})",
                info.total_page,
                self.region_id
            );
        }

        let (index, control) = if info.current_page > target {
            (PREV_BUTTON, "previous")
        } else {
            (NEXT_BUTTON, "next")
        };
        let buttons = dom::scoped(self.region_id, &self.options.selectors.nav_buttons);
        if !self.page.click(&buttons, index)? {
            return Err(Error::MissingControl {
                region: self.region_id.to_string(),
                control,
            });
        }
        log::debug!(
            "{}: page {} -> {target}, clicked {control}",
            self.region_id,
            info.current_page
        );
        Ok(NavState::Navigating)
    }

    /// Poll until the region shows `target`.
    ///
    /// Sleeps `poll_interval` after every busy or navigating step. The run
    /// ends in [`NavState::Failed`] once `max_navigation_steps` polls have
    /// been spent, reported as [`Error::PaginationStalled`].
    ///
    /// # Errors
    ///
    /// Returns the step error, or `PaginationStalled` on budget exhaustion.
    pub async fn navigate_to(&self, target: u32) -> Result<PageInfo> {
        let budget = self.options.max_navigation_steps.max(1);
        let mut steps = 0usize;
        loop {
            let state = if steps >= budget {
                NavState::Failed
            } else {
                self.step(target)?
            };
            match state {
                NavState::AtTarget(info) => return Ok(info),
                NavState::Failed => {
                    log::warn!("{}: giving up on page {target} after {steps} steps", self.region_id);
                    return Err(Error::PaginationStalled {
                        region: self.region_id.to_string(),
                        target,
                        steps,
                    });
                }
                NavState::Busy | NavState::Navigating => {
                    steps += 1;
                    tokio::time::sleep(self.options.poll_interval).await;
                }
            }
        }
    }
}
