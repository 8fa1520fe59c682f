//! Progress reporting for extraction runs.
//!
//! Frontends implement [`Progress`] to drive a status indicator. Updates come
//! from both region walkers interleaved, so the percentage is not monotonic
//! across the whole run, only within one region's sub-range.

/// Receives `(percent, phase)` updates during an extraction run.
pub trait Progress {
    /// Called whenever the run enters a new phase or page.
    fn update(&self, percent: u8, phase: &str);
}

impl<F> Progress for F
where
    F: Fn(u8, &str),
{
    fn update(&self, percent: u8, phase: &str) {
        self(percent, phase);
    }
}

/// A no-op progress sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProgress;

impl Progress for NullProgress {
    fn update(&self, _percent: u8, _phase: &str) {}
}

/// A `[start, end]` slice of the overall 0–100 range.
///
/// Always satisfies `start <= end <= 100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSpan {
    start: u8,
    end: u8,
}

impl ProgressSpan {
    /// New span; `end` is clamped to at least `start` and at most 100.
    #[must_use]
    pub const fn new(start: u8, end: u8) -> Self {
        let start = if start > 100 { 100 } else { start };
        let end = if end < start {
            start
        } else if end > 100 {
            100
        } else {
            end
        };
        Self { start, end }
    }

    /// Percentage reported when the span begins.
    #[must_use]
    pub fn start(self) -> u8 {
        self.start
    }

    /// Percentage reported when the span completes.
    #[must_use]
    pub fn end(self) -> u8 {
        self.end
    }

    /// Percentage for being about to process `page` of `total` (1-based).
    ///
    /// Proportional to `(page - 1) / total`.
    #[must_use]
    pub fn at_page(self, page: u32, total: u32) -> u8 {
        let total = f64::from(total.max(1));
        let done = f64::from(page.saturating_sub(1)).min(total);
        let width = f64::from(self.end.saturating_sub(self.start));
        (f64::from(self.start) + done / total * width).round() as u8
    }

    /// Midpoint of the span.
    #[must_use]
    pub fn midpoint(self) -> u8 {
        ((u16::from(self.start) + u16::from(self.end) + 1) / 2) as u8
    }
}
