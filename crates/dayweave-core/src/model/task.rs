//! Task entity: a fixed commitment or a flexible, duration-only work item.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, CoreError, IntervalError};
use crate::interval::TimeInterval;

/// Upper bound on a flexible task's estimated duration (one year), so
/// schema-valid extremes never reach interval arithmetic.
const MAX_ESTIMATED_MINUTES: i64 = 366 * 24 * 60;

/// Task priority levels (P0 = highest, P3 = lowest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    P0,
    P1,
    P2,
    P3,
}

impl Priority {
    /// Importance score on the 0-100 scale used by Eisenhower ordering.
    pub fn rank_score(&self) -> f32 {
        match self {
            Priority::P0 => 100.0,
            Priority::P1 => 75.0,
            Priority::P2 => 50.0,
            Priority::P3 => 25.0,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::P2
    }
}

/// Scheduling semantics of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    /// Occupies a concrete interval; never moved by the planner.
    Fixed,
    /// Carries only an estimated duration; awaits placement.
    Flexible,
}

impl Default for TaskKind {
    fn default() -> Self {
        TaskKind::Flexible
    }
}

/// Preferred time of day for placing a flexible task.
///
/// The clock boundaries of each window come from
/// [`HintWindows`](crate::model::HintWindows), not from this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowHint {
    Morning,
    Afternoon,
    Evening,
}

impl WindowHint {
    /// Human-readable label for plan explanations.
    pub fn label(&self) -> &'static str {
        match self {
            WindowHint::Morning => "morning",
            WindowHint::Afternoon => "afternoon",
            WindowHint::Evening => "evening",
        }
    }
}

/// A work item supplied by the caller.
///
/// Exactly one of `interval` (Fixed) or `estimated_minutes` (Flexible) is
/// populated, consistent with `kind`; `validate()` enforces this. The
/// planner never mutates a task, it emits placements referencing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub kind: TaskKind,
    #[serde(default)]
    pub interval: Option<TimeInterval>,
    #[serde(default)]
    pub estimated_minutes: Option<i64>,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub window_hint: Option<WindowHint>,
    #[serde(default)]
    pub location: Option<String>,
}

impl Task {
    /// Create a fixed-time task occupying `interval`.
    pub fn fixed(id: impl Into<String>, title: impl Into<String>, interval: TimeInterval) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            kind: TaskKind::Fixed,
            interval: Some(interval),
            estimated_minutes: None,
            deadline: None,
            priority: Priority::default(),
            window_hint: None,
            location: None,
        }
    }

    /// Create a flexible task with an estimated duration in minutes.
    pub fn flexible(id: impl Into<String>, title: impl Into<String>, minutes: i64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            kind: TaskKind::Flexible,
            interval: None,
            estimated_minutes: Some(minutes),
            deadline: None,
            priority: Priority::default(),
            window_hint: None,
            location: None,
        }
    }

    pub fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_window_hint(mut self, hint: WindowHint) -> Self {
        self.window_hint = Some(hint);
        self
    }

    /// Check the kind/field invariant and interval well-formedness.
    pub fn validate(&self) -> Result<(), CoreError> {
        match self.kind {
            TaskKind::Fixed => {
                let interval = self.interval.ok_or_else(|| {
                    CoreError::Config(ConfigError::InvalidValue {
                        field: format!("task '{}'", self.id),
                        message: "fixed tasks must have an interval".to_string(),
                    })
                })?;
                if !interval.is_well_formed() {
                    return Err(CoreError::Interval(IntervalError::EndNotAfterStart {
                        start: interval.start,
                        end: interval.end,
                    }));
                }
                if self.estimated_minutes.is_some() {
                    return Err(CoreError::Config(ConfigError::InvalidValue {
                        field: format!("task '{}'", self.id),
                        message: "fixed tasks must not carry an estimated duration".to_string(),
                    }));
                }
            }
            TaskKind::Flexible => {
                let minutes = self.estimated_minutes.ok_or_else(|| {
                    CoreError::Config(ConfigError::InvalidValue {
                        field: format!("task '{}'", self.id),
                        message: "flexible tasks must have an estimated duration".to_string(),
                    })
                })?;
                if minutes <= 0 || minutes > MAX_ESTIMATED_MINUTES {
                    return Err(CoreError::Config(ConfigError::InvalidValue {
                        field: format!("task '{}'", self.id),
                        message: format!(
                            "estimated duration must be between 1 and {MAX_ESTIMATED_MINUTES} minutes"
                        ),
                    }));
                }
                if self.interval.is_some() {
                    return Err(CoreError::Config(ConfigError::InvalidValue {
                        field: format!("task '{}'", self.id),
                        message: "flexible tasks must not carry a fixed interval".to_string(),
                    }));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn morning_meeting() -> TimeInterval {
        let start = Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 3, 2, 11, 0, 0).unwrap();
        TimeInterval::new(start, end).unwrap()
    }

    #[test]
    fn fixed_task_requires_interval() {
        let mut task = Task::fixed("t1", "Standup", morning_meeting());
        assert!(task.validate().is_ok());

        task.interval = None;
        assert!(task.validate().is_err());
    }

    #[test]
    fn flexible_task_requires_positive_duration() {
        assert!(Task::flexible("t1", "Write report", 90).validate().is_ok());
        assert!(Task::flexible("t2", "Nothing", 0).validate().is_err());
        assert!(Task::flexible("t3", "Negative", -5).validate().is_err());
    }

    #[test]
    fn absurd_duration_is_rejected() {
        assert!(Task::flexible("t1", "Endless", i64::MAX).validate().is_err());
        assert!(Task::flexible("t2", "Year-long", 366 * 24 * 60)
            .validate()
            .is_ok());
    }

    #[test]
    fn mixed_fields_rejected() {
        let mut task = Task::flexible("t1", "Write report", 90);
        task.interval = Some(morning_meeting());
        assert!(task.validate().is_err());

        let mut task = Task::fixed("t2", "Standup", morning_meeting());
        task.estimated_minutes = Some(60);
        assert!(task.validate().is_err());
    }

    #[test]
    fn priority_serializes_as_labels() {
        let json = serde_json::to_string(&Priority::P0).unwrap();
        assert_eq!(json, "\"P0\"");
    }

    #[test]
    fn task_round_trips_through_json() {
        let task = Task::flexible("t1", "Write report", 120)
            .with_priority(Priority::P1)
            .with_window_hint(WindowHint::Afternoon);
        let json = serde_json::to_string(&task).unwrap();
        let decoded: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, task);
    }
}
