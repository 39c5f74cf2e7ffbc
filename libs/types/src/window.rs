//! Open-window time type
//!
//! A pack may be opened only while the current time lies inside its open
//! window. The end of the window is an explicit `Option`: `None` means the
//! window never closes. No max-integer sentinel values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive `[start, end]` time window in unix seconds.
///
/// Both boundaries are inclusive: opening exactly at `start` or exactly at
/// `end` is allowed. `end = None` marks an unbounded window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenWindow {
    start: i64,
    end: Option<i64>,
}

impl OpenWindow {
    /// Create a new window.
    ///
    /// # Panics
    /// Panics if `end` is before `start`.
    pub fn new(start: i64, end: Option<i64>) -> Self {
        assert!(
            end.map_or(true, |e| start <= e),
            "OpenWindow start must not exceed end"
        );
        Self { start, end }
    }

    /// Try to create a window, returning None if `end` is before `start`
    pub fn try_new(start: i64, end: Option<i64>) -> Option<Self> {
        if end.map_or(true, |e| start <= e) {
            Some(Self { start, end })
        } else {
            None
        }
    }

    /// Create a window that never closes
    pub fn unbounded(start: i64) -> Self {
        Self { start, end: None }
    }

    /// Window start, unix seconds
    pub fn start(&self) -> i64 {
        self.start
    }

    /// Window end, unix seconds; None if the window never closes
    pub fn end(&self) -> Option<i64> {
        self.end
    }

    /// Check whether `time` lies inside the window (boundaries inclusive)
    pub fn contains(&self, time: i64) -> bool {
        time >= self.start && self.end.map_or(true, |e| time <= e)
    }
}

impl fmt::Display for OpenWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end {
            Some(end) => write!(f, "[{}, {}]", self.start, end),
            None => write!(f, "[{}, ∞)", self.start),
        }
    }
}
