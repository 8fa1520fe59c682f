//! Extraction pipeline.
//!
//! Orchestrates one run over the comparison page: warm-up, region lookup,
//! label validation, id assignment and the two concurrent region walks.
//! Every error raised along the way is folded into a failed
//! [`ExtractionResult`]; nothing escapes to the caller.

use dom_query::Selection;

use crate::diagnostics::{self, PageDiagnostics};
use crate::dom;
use crate::error::{Error, Result};
use crate::host::HostPage;
use crate::options::Options;
use crate::progress::{Progress, ProgressSpan};
use crate::result::ExtractionResult;

use super::walker::{Region, RegionHarvest, RegionWalker};

/// Progress sub-range of the improvements walk.
pub const IMPROVEMENTS_SPAN: ProgressSpan = ProgressSpan::new(50, 75);
/// Progress sub-range of the regressions walk.
pub const REGRESSIONS_SPAN: ProgressSpan = ProgressSpan::new(75, 95);

/// Runs extractions against one host page.
pub struct Extractor<'a, P: HostPage> {
    page: &'a P,
    options: &'a Options,
}

impl<'a, P: HostPage> Extractor<'a, P> {
    /// Extractor over `page` using `options`.
    pub fn new(page: &'a P, options: &'a Options) -> Self {
        Self { page, options }
    }

    /// Run a full extraction.
    ///
    /// Always returns a result. On failure `success` is `false`, both record
    /// lists are empty and `message` carries the error text.
    pub async fn extract(&self, progress: &dyn Progress) -> ExtractionResult {
        log::info!("Starting data extraction...");
        let mut warnings = Vec::new();
        match self.run(progress, &mut warnings).await {
            Ok((improvements, regressions)) => {
                warnings.extend(improvements.warnings);
                warnings.extend(regressions.warnings);
                progress.update(100, "Complete");
                let result = ExtractionResult::success(improvements.records, regressions.records, warnings);
                log::info!("{}", result.message);
                result
            }
            Err(e) => {
                log::error!("Error in extraction: {e}");
                match self.diagnose() {
                    Ok(report) => log::warn!("Page diagnostics: {report}"),
                    Err(err) => log::warn!("Page diagnostics unavailable: {err}"),
                }
                ExtractionResult::failure(e.to_string(), warnings)
            }
        }
    }

    /// Describe the page as it is right now.
    ///
    /// # Errors
    ///
    /// Returns the host error if the page cannot be snapshotted.
    pub fn diagnose(&self) -> Result<PageDiagnostics> {
        let doc = self.page.snapshot()?;
        Ok(diagnostics::diagnose(&doc, self.options))
    }

    async fn run(
        &self,
        progress: &dyn Progress,
        warnings: &mut Vec<String>,
    ) -> Result<(RegionHarvest, RegionHarvest)> {
        let options = self.options;
        let selectors = &options.selectors;

        progress.update(10, "Loading page");
        if !options.warmup.is_zero() {
            tokio::time::sleep(options.warmup).await;
        }

        progress.update(25, "Finding elements");
        {
            let doc = self.page.snapshot()?;
            let improvements = dom::query_first(&doc, &selectors.improvements_region);
            let regressions = dom::query_first(&doc, &selectors.regressions_region);
            let (Some(improvements), Some(regressions)) = (improvements, regressions) else {
                return Err(Error::RegionNotFound(missing_regions(options, &doc)));
            };
            log::info!("Found P0 wrapper elements");

            progress.update(40, "Validating elements");
            warnings.extend(check_label(&improvements, &options.improvements_label));
            warnings.extend(check_label(&regressions, &options.regressions_label));
        }

        self.tag(&selectors.improvements_region, &options.improvements_id)?;
        self.tag(&selectors.regressions_region, &options.regressions_id)?;

        progress.update(50, "Extracting data");
        let improvements = Region {
            name: "improvements".to_string(),
            id: options.improvements_id.clone(),
        };
        let regressions = Region {
            name: "regressions".to_string(),
            id: options.regressions_id.clone(),
        };
        let improvements_walk = RegionWalker::new(self.page, &improvements, options, progress, IMPROVEMENTS_SPAN);
        let regressions_walk = RegionWalker::new(self.page, &regressions, options, progress, REGRESSIONS_SPAN);

        let (improvements, regressions) = tokio::join!(improvements_walk.walk(), regressions_walk.walk());
        Ok((improvements?, regressions?))
    }

    fn tag(&self, selector: &str, id: &str) -> Result<()> {
        if self.page.assign_id(selector, id)? {
            Ok(())
        } else {
            Err(Error::RegionNotFound(id.to_string()))
        }
    }
}

/// Compare a region's leading label with the expected prefix.
///
/// Returns the warning to record on mismatch.
fn check_label(region: &Selection, expected: &str) -> Option<String> {
    let label = dom::first_child_text(region).unwrap_or_default();
    if label.trim_start().starts_with(expected) {
        return None;
    }
    let warning = format!("Unexpected region label: expected {expected:?}, found {:?}", label.trim());
    log::warn!("{warning}");
    Some(warning)
}

fn missing_regions(options: &Options, doc: &dom_query::Document) -> String {
    let selectors = &options.selectors;
    [
        (&options.improvements_label, &selectors.improvements_region),
        (&options.regressions_label, &selectors.regressions_region),
    ]
    .into_iter()
    .filter(|(_, selector)| dom::query_first(doc, selector).is_none())
    .map(|(label, _)| label.as_str())
    .collect::<Vec<_>>()
    .join(", ")
}
