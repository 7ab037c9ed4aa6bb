//! Canonical time-interval representation and comparison primitives.
//!
//! All other modules build on [`TimeInterval`]: events occupy intervals,
//! working hours and blackout windows materialize into intervals per day,
//! and free slots are the intervals left over after subtraction.
//!
//! Intervals are half-open in spirit: two intervals that merely touch at
//! an endpoint do not overlap.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::IntervalError;

/// An immutable span of time with `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeInterval {
    /// Create a new interval, rejecting `end <= start`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, IntervalError> {
        if end <= start {
            return Err(IntervalError::EndNotAfterStart { start, end });
        }
        Ok(Self { start, end })
    }

    /// Whether the invariant `start < end` holds.
    ///
    /// Deserialized intervals bypass [`TimeInterval::new`], so boundary
    /// validation re-checks them with this.
    pub fn is_well_formed(&self) -> bool {
        self.start < self.end
    }

    /// Duration in whole minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Whether two intervals share any instant strictly between their
    /// endpoints. Touching at an endpoint is not an overlap.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether `inner` lies entirely within this interval.
    pub fn contains(&self, inner: &TimeInterval) -> bool {
        self.start <= inner.start && inner.end <= self.end
    }

    /// The common portion of two intervals, if any.
    pub fn intersect(&self, other: &TimeInterval) -> Option<TimeInterval> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if start < end {
            Some(TimeInterval { start, end })
        } else {
            None
        }
    }

    /// The portion of this interval not covered by `other`: zero, one or
    /// two pieces depending on where `other` cuts.
    pub fn subtract(&self, other: &TimeInterval) -> Vec<TimeInterval> {
        if !self.overlaps(other) {
            return vec![*self];
        }

        let mut pieces = Vec::with_capacity(2);
        if self.start < other.start {
            pieces.push(TimeInterval {
                start: self.start,
                end: other.start,
            });
        }
        if other.end < self.end {
            pieces.push(TimeInterval {
                start: other.end,
                end: self.end,
            });
        }
        pieces
    }

    /// Grow the interval by `minutes` on both sides. Used to apply the
    /// buffer padding around occupied time before slot subtraction.
    pub fn pad(&self, minutes: i64) -> TimeInterval {
        if minutes <= 0 {
            return *self;
        }
        TimeInterval {
            start: self.start - Duration::minutes(minutes),
            end: self.end + Duration::minutes(minutes),
        }
    }
}
