//! Host page abstraction.
//!
//! The extractor never owns the page it scrapes. It reads parsed snapshots
//! of the live DOM and asks the host to perform the few mutations it needs:
//! tagging a region with an id and activating navigation buttons. The host
//! re-renders asynchronously; the extractor only observes the result through
//! later snapshots.

use dom_query::Document;

use crate::error::Result;

pub mod simulated;
pub mod static_page;

pub use simulated::{SimulatedPage, SimulatedRegion, SimulatedRow, Stall};
pub use static_page::StaticPage;

/// A page the extractor can observe and drive.
///
/// Implementations are single-threaded: every method takes `&self` and the
/// extractor interleaves calls from both region walkers on one task.
pub trait HostPage {
    /// Parse the page's current DOM.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Host`](crate::Error::Host) when the page cannot be read.
    fn snapshot(&self) -> Result<Document>;

    /// Set `id` on the first element matching `selector`.
    ///
    /// Returns `false` when nothing matched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Host`](crate::Error::Host) when the page cannot be modified.
    fn assign_id(&self, selector: &str, id: &str) -> Result<bool>;

    /// Activate the `index`-th element matching `selector`.
    ///
    /// Returns `false` when there is no such element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Host`](crate::Error::Host) when the page cannot be driven.
    fn click(&self, selector: &str, index: usize) -> Result<bool>;
}

impl<P: HostPage + ?Sized> HostPage for &P {
    fn snapshot(&self) -> Result<Document> {
        (**self).snapshot()
    }

    fn assign_id(&self, selector: &str, id: &str) -> Result<bool> {
        (**self).assign_id(selector, id)
    }

    fn click(&self, selector: &str, index: usize) -> Result<bool> {
        (**self).click(selector, index)
    }
}
