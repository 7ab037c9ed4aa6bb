//! # Dayweave Core Library
//!
//! Scheduling and conflict-resolution engine for the Dayweave personal
//! scheduler. The core is a pure, synchronous computation: a caller
//! supplies already-parsed tasks, events, a preference profile and a
//! user status, and receives a deterministic, explainable placement of
//! every flexible task into free time. Language understanding, ICS
//! import/export, persistence and transport live in external
//! collaborators; the core neither parses text nor performs I/O.
//!
//! ## Key components
//!
//! - [`TimeInterval`]: canonical interval algebra (overlap, subtract,
//!   intersect, buffer padding)
//! - [`find_all_conflicts`]: pairwise overlap reporting among fixed items
//! - [`find_free_slots`]: available capacity within a horizon
//! - [`split_task`]: oversized-task decomposition into balanced chunks
//! - [`Planner`]: the one-pass scheduler producing a [`PlanResult`]
//!
//! Plans are idempotent: re-running with identical inputs and the same
//! anchor instant yields the same result.

pub mod conflict;
pub mod error;
pub mod interval;
pub mod model;
pub mod planner;
pub mod policy;
pub mod slots;
pub mod split;

pub use conflict::{find_all_conflicts, find_conflicts, Commitment, Conflict};
pub use error::{ConfigError, CoreError, IntervalError, Result, SplitError};
pub use interval::TimeInterval;
pub use model::{
    DailyWindow, Event, HintWindows, Preference, Priority, Status, Task, TaskKind, UserState,
    WindowHint,
};
pub use planner::{ChunkRef, PlanResult, Planner, ScheduledTask, UnplacedTask};
pub use policy::{EisenhowerWeights, PriorityPolicy};
pub use split::{split_task, SubTask};

/// Report every conflicting pair among a set of calendar events.
pub fn detect_conflicts(events: &[Event]) -> Vec<Conflict> {
    let commitments: Vec<Commitment> = events.iter().map(Commitment::from_event).collect();
    conflict::find_all_conflicts(&commitments)
}

/// Compute the free slots left by `events` within `horizon` under the
/// given preference profile.
pub fn find_free_slots(
    events: &[Event],
    preference: &Preference,
    horizon: TimeInterval,
) -> Result<Vec<TimeInterval>> {
    let commitments: Vec<Commitment> = events.iter().map(Commitment::from_event).collect();
    slots::find_free_slots(&commitments, preference, horizon)
}

/// Run one planning pass anchored at the current instant with the
/// default 7-day horizon. Use [`Planner`] directly for a fixed anchor.
pub fn plan(
    tasks: &[Task],
    events: &[Event],
    preference: &Preference,
    status: &Status,
) -> Result<PlanResult> {
    Planner::new().plan(tasks, events, preference, status)
}
