//! Calendar event entity: fixed, already-placed occupied time.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, IntervalError};
use crate::interval::TimeInterval;

/// A calendar event with a concrete interval. Created by the caller from
/// persisted tasks or imported calendar data; read-only to the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub interval: TimeInterval,
    #[serde(default)]
    pub location: Option<String>,
}

impl Event {
    pub fn new(id: impl Into<String>, title: impl Into<String>, interval: TimeInterval) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            interval,
            location: None,
        }
    }

    /// Re-check the interval invariant for deserialized events.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.interval.is_well_formed() {
            return Err(CoreError::Interval(IntervalError::EndNotAfterStart {
                start: self.interval.start,
                end: self.interval.end,
            }));
        }
        Ok(())
    }
}
