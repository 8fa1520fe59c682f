//! Error types for perflab-scrape.
//!
//! This module defines the error types returned by host-page access,
//! pagination and session operations. The extraction pipeline itself never
//! returns these to its caller: they are folded into a failed
//! [`ExtractionResult`](crate::ExtractionResult).

/// Error type for scraping operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// One of the two data regions could not be located on the page.
    #[error("Could not find P0 wrapper elements using the expected selectors. Please ensure the page has fully loaded. (missing: {0})")]
    RegionNotFound(String),

    /// The host page could not produce a DOM snapshot or perform an action.
    #[error("Host page error: {0}")]
    Host(String),

    /// A navigation control (previous/next) is missing from a region.
    #[error("Navigation control '{control}' not found in region {region}")]
    MissingControl {
        /// Region id the control was looked up in.
        region: String,
        /// Which control was missing.
        control: &'static str,
    },

    /// Pagination did not reach the target page within the step budget.
    #[error("Pagination stalled in region {region}: page {target} not reached after {steps} steps")]
    PaginationStalled {
        /// Region id that stalled.
        region: String,
        /// Page the controller was driving towards.
        target: u32,
        /// Number of polling steps spent.
        steps: usize,
    },

    /// A run was requested while another one is still in flight.
    #[error("Data extraction already in progress")]
    AlreadyRunning,

    /// The extraction run finished unsuccessfully.
    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    /// Reading a saved page from disk failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error means the page layout was not (yet) present.
    ///
    /// The UI shell treats this as "still loading" rather than a hard failure.
    #[must_use]
    pub fn is_region_missing(&self) -> bool {
        match self {
            Self::RegionNotFound(_) => true,
            Self::ExtractionFailed(message) => message.contains("Could not find P0 wrapper elements"),
            _ => false,
        }
    }
}

/// Result type alias for scraping operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_missing_is_detected_through_failed_message() {
        let err = Error::RegionNotFound("improvements".into());
        let wrapped = Error::ExtractionFailed(err.to_string());

        assert!(err.is_region_missing());
        assert!(wrapped.is_region_missing());
        assert!(!Error::AlreadyRunning.is_region_missing());
    }
}
