//! Region walker.
//!
//! Visits every page of one region in ascending order, extracting the rows
//! visible on each page before moving on. Row-level failures are dropped
//! silently from the accumulator; only pagination failures end the walk.

use crate::error::Result;
use crate::extractor::pagination::{read_page_info, Navigator};
use crate::extractor::row::extract_row;
use crate::host::HostPage;
use crate::options::Options;
use crate::progress::{Progress, ProgressSpan};
use crate::result::MetricRecord;
use crate::selector;

/// One located data region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    /// Display name used in progress phases and logs ("improvements").
    pub name: String,
    /// Id assigned to the region on the host page.
    pub id: String,
}

/// Records gathered from one region.
#[derive(Debug, Clone, Default)]
pub struct RegionHarvest {
    /// Extracted records, in page then row order.
    pub records: Vec<MetricRecord>,
    /// Unit-mismatch warnings raised by individual rows.
    pub warnings: Vec<String>,
    /// Pages visited (1 for a region without page indicator).
    pub pages: u32,
}

/// Walks one region page by page.
pub struct RegionWalker<'a, P: HostPage> {
    page: &'a P,
    region: &'a Region,
    options: &'a Options,
    progress: &'a dyn Progress,
    span: ProgressSpan,
}

impl<'a, P: HostPage> RegionWalker<'a, P> {
    /// Walker reporting progress over `span`.
    pub fn new(
        page: &'a P,
        region: &'a Region,
        options: &'a Options,
        progress: &'a dyn Progress,
        span: ProgressSpan,
    ) -> Self {
        Self {
            page,
            region,
            options,
            progress,
            span,
        }
    }

    /// Extract the rows visible right now into `harvest`.
    ///
    /// # Errors
    ///
    /// Fails only if the host cannot produce a snapshot.
    pub fn harvest_visible(&self, harvest: &mut RegionHarvest) -> Result<()> {
        let doc = self.page.snapshot()?;
        let rows = selector::row_containers(&doc, &self.region.id, &self.options.selectors);
        log::debug!("Processing {} cells from {}", rows.len(), self.region.id);
        for row in &rows {
            if let Some(parsed) = extract_row(&doc, row, self.options) {
                harvest.records.push(parsed.record);
                harvest.warnings.extend(parsed.unit_mismatch);
            }
        }
        Ok(())
    }

    /// Visit pages `1..=total` and return everything extracted.
    ///
    /// A region without a page indicator is treated as a single page and
    /// extracted as shown, without any navigation.
    ///
    /// # Errors
    ///
    /// Returns host errors and pagination failures (stalled or missing controls).
    pub async fn walk(&self) -> Result<RegionHarvest> {
        let name = &self.region.name;
        log::info!("Starting extraction for {name}...");
        let mut harvest = RegionHarvest::default();

        let total = {
            let doc = self.page.snapshot()?;
            selector::page_indicator(&doc, &self.region.id, &self.options.selectors)
                .is_some()
                .then(|| read_page_info(&doc, &self.region.id, self.options).total_page)
        };

        let Some(total) = total else {
            log::warn!("No page indicator found for {name}, extracting current page only");
            self.progress.update(self.span.midpoint(), &format!("Processing {name}"));
            self.harvest_visible(&mut harvest)?;
            harvest.pages = 1;
            self.progress.update(self.span.end(), &format!("Completed {name}"));
            return Ok(harvest);
        };

        log::info!("{name}: Processing {total} pages");
        let navigator = Navigator::new(self.page, &self.region.id, self.options);
        for target in 1..=total {
            self.progress.update(
                self.span.at_page(target, total),
                &format!("Processing {name} ({target}/{total})"),
            );
            navigator.navigate_to(target).await?;
            self.harvest_visible(&mut harvest)?;
            harvest.pages = target;
            if target < total {
                tokio::time::sleep(self.options.page_advance_delay).await;
            }
        }

        log::info!(
            "{name}: Extracted {} items from {total} pages",
            harvest.records.len()
        );
        self.progress.update(self.span.end(), &format!("Completed {name}"));
        Ok(harvest)
    }
}
