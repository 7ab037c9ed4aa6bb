//! User scheduling preferences: working hours, blackout windows, focus
//! limits, buffers, and the priority policy.
//!
//! Daily windows use "HH:mm" clock strings applied per calendar day, the
//! same shape the caller's stored preferences and imported templates use;
//! `validate()` parses every window once up front so the slot finder can
//! rely on them.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::policy::PriorityPolicy;

pub(crate) const MINUTES_PER_DAY: u32 = 24 * 60;

/// A daily clock window, e.g. working hours 09:00-18:00. The end may be
/// "24:00" to reach the end of the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyWindow {
    pub start: String,
    pub end: String,
}

impl DailyWindow {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Parse into minutes-of-day, rejecting inverted or malformed windows.
    pub fn minute_range(&self) -> Result<(u32, u32), ConfigError> {
        let start = parse_clock_minute(&self.start)?;
        let end = parse_clock_minute(&self.end)?;
        if end <= start {
            return Err(ConfigError::InvalidValue {
                field: "daily window".to_string(),
                message: format!("end ({}) must be after start ({})", self.end, self.start),
            });
        }
        Ok((start, end))
    }
}

fn parse_clock_minute(value: &str) -> Result<u32, ConfigError> {
    if value == "24:00" {
        return Ok(MINUTES_PER_DAY);
    }
    let bad = || ConfigError::BadClockTime {
        value: value.to_string(),
    };
    let (hour, minute) = value.split_once(':').ok_or_else(bad)?;
    let hour: u32 = hour.parse().map_err(|_| bad())?;
    let minute: u32 = minute.parse().map_err(|_| bad())?;
    if hour > 23 || minute > 59 {
        return Err(bad());
    }
    Ok(hour * 60 + minute)
}

/// Configurable clock boundaries for morning/afternoon/evening hints.
///
/// Morning runs from midnight to `morning_end`, afternoon from there to
/// `afternoon_end`, evening from there to midnight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintWindows {
    pub morning_end: String,
    pub afternoon_end: String,
}

impl Default for HintWindows {
    fn default() -> Self {
        Self {
            morning_end: "12:00".to_string(),
            afternoon_end: "18:00".to_string(),
        }
    }
}

impl HintWindows {
    /// Minutes-of-day range for a hint window.
    pub fn minute_range(
        &self,
        hint: crate::model::WindowHint,
    ) -> Result<(u32, u32), ConfigError> {
        let morning_end = parse_clock_minute(&self.morning_end)?;
        let afternoon_end = parse_clock_minute(&self.afternoon_end)?;
        Ok(match hint {
            crate::model::WindowHint::Morning => (0, morning_end),
            crate::model::WindowHint::Afternoon => (morning_end, afternoon_end),
            crate::model::WindowHint::Evening => (afternoon_end, MINUTES_PER_DAY),
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let morning_end = parse_clock_minute(&self.morning_end)?;
        let afternoon_end = parse_clock_minute(&self.afternoon_end)?;
        if morning_end == 0 || afternoon_end <= morning_end || afternoon_end >= MINUTES_PER_DAY {
            return Err(ConfigError::InvalidValue {
                field: "hint_windows".to_string(),
                message: "boundaries must satisfy 00:00 < morning_end < afternoon_end < 24:00"
                    .to_string(),
            });
        }
        Ok(())
    }
}

/// User constraint profile consulted on every planning call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preference {
    #[serde(default = "default_working_hours")]
    pub working_hours: Vec<DailyWindow>,
    #[serde(default)]
    pub no_disturb: Vec<DailyWindow>,
    #[serde(default = "default_max_focus")]
    pub max_focus_minutes: i64,
    #[serde(default = "default_min_block")]
    pub min_block_minutes: i64,
    #[serde(default = "default_buffer")]
    pub buffer_minutes: i64,
    #[serde(default)]
    pub priority_policy: PriorityPolicy,
    #[serde(default)]
    pub hint_windows: HintWindows,
}

fn default_working_hours() -> Vec<DailyWindow> {
    vec![DailyWindow::new("09:00", "18:00")]
}

fn default_max_focus() -> i64 {
    120
}

fn default_min_block() -> i64 {
    30
}

fn default_buffer() -> i64 {
    15
}

impl Default for Preference {
    fn default() -> Self {
        Self {
            working_hours: default_working_hours(),
            no_disturb: Vec::new(),
            max_focus_minutes: default_max_focus(),
            min_block_minutes: default_min_block(),
            buffer_minutes: default_buffer(),
            priority_policy: PriorityPolicy::default(),
            hint_windows: HintWindows::default(),
        }
    }
}

impl Preference {
    /// Check all preference invariants. Planning refuses to start on any
    /// violation, with no partial result. Minute fields are capped at one
    /// day so they stay safe for interval arithmetic downstream.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.working_hours.is_empty() {
            return Err(ConfigError::EmptyWorkingHours);
        }
        for window in self.working_hours.iter().chain(self.no_disturb.iter()) {
            window.minute_range()?;
        }
        let day = MINUTES_PER_DAY as i64;
        if self.max_focus_minutes <= 0 || self.max_focus_minutes > day {
            return Err(ConfigError::InvalidValue {
                field: "max_focus_minutes".to_string(),
                message: format!("must be between 1 and {day}"),
            });
        }
        if self.min_block_minutes <= 0 || self.min_block_minutes > day {
            return Err(ConfigError::InvalidValue {
                field: "min_block_minutes".to_string(),
                message: format!("must be between 1 and {day}"),
            });
        }
        if self.buffer_minutes < 0 || self.buffer_minutes > day {
            return Err(ConfigError::InvalidValue {
                field: "buffer_minutes".to_string(),
                message: format!("must be between 0 and {day}"),
            });
        }
        if self.min_block_minutes > self.max_focus_minutes {
            return Err(ConfigError::BlockExceedsFocus {
                min_block: self.min_block_minutes,
                max_focus: self.max_focus_minutes,
            });
        }
        self.hint_windows.validate()
    }
}
