//! Extraction of metric records from the comparison page.
//!
//! # Module Structure
//!
//! - `row`: Row cell collection and record parsing
//! - `pagination`: Polling state machine driving one region to a page
//! - `walker`: Page-by-page walk over one region
//! - `pipeline`: Run orchestration over both regions
//!
//! # Usage
//!
//! ```rust
//! use perflab_scrape::extractor::Extractor;
//! use perflab_scrape::host::{SimulatedPage, SimulatedRegion, SimulatedRow};
//! use perflab_scrape::{NullProgress, Options};
//!
//! let page = SimulatedPage::new(
//!     Some(SimulatedRegion::new("P0 Improvements").page(vec![
//!         SimulatedRow::new("speedometer3/TodoMVC/Score", "desktop", "-3.1", "120 ms", "116.3 ms"),
//!     ])),
//!     Some(SimulatedRegion::new("P0 Regressions").page(vec![])),
//! );
//! let options = Options::immediate();
//! let runtime = tokio::runtime::Builder::new_current_thread()
//!     .enable_time()
//!     .build()
//!     .expect("runtime");
//!
//! let result = runtime.block_on(Extractor::new(&page, &options).extract(&NullProgress));
//! assert!(result.success);
//! assert_eq!(result.improvements[0].story, "TodoMVC");
//! ```

pub mod pagination;
pub mod pipeline;
pub mod row;
pub mod walker;

pub use pagination::{read_page_info, NavState, Navigator};
pub use pipeline::Extractor;
pub use row::{extract_row, parse_cells, ParsedRow, RowSkip};
pub use walker::{Region, RegionHarvest, RegionWalker};
