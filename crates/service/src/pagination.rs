//! Listing window derived from the `_start` / `_end` query parameters.
//!
//! `_end` is passed through as the row limit rather than converted into an end
//! index, so `_start=10&_end=20` yields up to 20 rows starting at row 10.

// Largest limit every supported backend accepts as a bind parameter.
const UNBOUNDED: u64 = i64::MAX as u64;

/// Window parameters
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Window {
    /// rows to skip
    pub start: Option<u64>,
    /// row limit; `None` or `0` means no limit
    pub end: Option<u64>,
}

impl Window {
    pub fn new(start: Option<u64>, end: Option<u64>) -> Self { Self { start, end } }

    /// Rows to skip, capped at what the backends accept.
    pub fn offset(self) -> u64 { self.start.unwrap_or(0).min(UNBOUNDED) }

    /// Row limit, if any.
    pub fn limit(self) -> Option<u64> {
        match self.end {
            None | Some(0) => None,
            Some(end) => Some(end.min(UNBOUNDED)),
        }
    }

    /// Limit to hand to the query builder; an absent limit becomes unbounded.
    pub fn effective_limit(self) -> u64 { self.limit().unwrap_or(UNBOUNDED) }
}
