//! The planning pass: orders flexible tasks by policy, allocates them
//! into free slots (splitting as needed), and assembles the final plan
//! with conflicts and unplaced tasks.
//!
//! One call is one terminal pass. All working state (the shrinking slot
//! list, ordering buffers) is local to the call; nothing is retained
//! between invocations, so concurrent independent calls are safe.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::conflict::{find_all_conflicts, Commitment, Conflict};
use crate::error::{ConfigError, CoreError, Result, SplitError};
use crate::interval::TimeInterval;
use crate::model::{Event, Preference, Status, Task, TaskKind};
use crate::policy::order_tasks;
use crate::slots::{clip_to_hint, find_free_slots};
use crate::split::{split_task, SubTask};

/// Identifies one chunk of a split task within the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkRef {
    pub index: usize,
    pub total: usize,
}

/// A placement decision: the task (or one chunk of it), where it landed,
/// and why that slot was chosen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledTask {
    pub task: Task,
    #[serde(default)]
    pub part: Option<ChunkRef>,
    pub interval: TimeInterval,
    pub reason: String,
}

/// A task the pass could not place, with a human-readable reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnplacedTask {
    pub task: Task,
    pub reason: String,
}

/// Output of one planning pass. Entirely derived; the core retains none
/// of it between calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanResult {
    pub scheduled: Vec<ScheduledTask>,
    pub conflicts: Vec<Conflict>,
    pub unplaced: Vec<UnplacedTask>,
    /// True when the user is busy or resting: the plan is advisory and
    /// the caller must not persist it.
    pub draft: bool,
    pub explanation: String,
}

impl PlanResult {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// The scheduling planner. Holds only the reference instant and horizon
/// length; every `plan` call takes its full input as arguments.
#[derive(Debug, Clone)]
pub struct Planner {
    now: DateTime<Utc>,
    horizon_days: i64,
}

impl Planner {
    /// Planner anchored at the current instant with a 7-day horizon.
    pub fn new() -> Self {
        Self {
            now: Utc::now(),
            horizon_days: 7,
        }
    }

    /// Anchor the pass at a fixed instant. Plans are deterministic given
    /// identical inputs and the same anchor.
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    /// Bound the free-slot search to this many days ahead, clamped to
    /// 1..=365 so the horizon stays safe for date arithmetic.
    pub fn with_horizon_days(mut self, days: i64) -> Self {
        self.horizon_days = days.clamp(1, 365);
        self
    }

    /// Run one planning pass.
    ///
    /// Invalid preference or task inputs abort the call with no partial
    /// result. A single task's unschedulability never aborts the batch.
    pub fn plan(
        &self,
        tasks: &[Task],
        events: &[Event],
        preference: &Preference,
        status: &Status,
    ) -> Result<PlanResult> {
        preference.validate()?;
        for task in tasks {
            task.validate()?;
        }
        for event in events {
            event.validate()?;
        }

        let horizon_end = self
            .now
            .checked_add_signed(Duration::days(self.horizon_days))
            .ok_or_else(|| {
                CoreError::Config(ConfigError::InvalidValue {
                    field: "horizon".to_string(),
                    message: "horizon end is outside the representable time range".to_string(),
                })
            })?;
        let horizon = TimeInterval::new(self.now, horizon_end)?;

        // Every fixed item blocks time, conflicting or not.
        let mut commitments: Vec<Commitment> =
            events.iter().map(Commitment::from_event).collect();
        commitments.extend(tasks.iter().filter_map(Commitment::from_task));

        let conflicts = find_all_conflicts(&commitments);

        let mut scheduled = Vec::new();
        let mut unplaced = Vec::new();

        for task in tasks.iter().filter(|t| t.kind == TaskKind::Fixed) {
            let Some(interval) = task.interval else {
                continue; // validate() already rejected this shape
            };
            let in_conflict = conflicts
                .iter()
                .any(|c| c.subject_id == task.id || c.other_id == task.id);
            if in_conflict {
                unplaced.push(UnplacedTask {
                    task: task.clone(),
                    reason: "fixed interval overlaps another commitment; see conflicts"
                        .to_string(),
                });
            } else {
                scheduled.push(ScheduledTask {
                    task: task.clone(),
                    part: None,
                    interval,
                    reason: "fixed-time commitment".to_string(),
                });
            }
        }

        let draft = !status.allows_commit();

        let flexible: Vec<Task> = tasks
            .iter()
            .filter(|t| t.kind == TaskKind::Flexible)
            .cloned()
            .collect();
        let ordered = order_tasks(&flexible, preference.priority_policy, self.now);

        let mut slots = find_free_slots(&commitments, preference, horizon)?;

        for task in ordered {
            match build_chunks(task, preference) {
                Ok(chunks) => {
                    match allocate(&slots, &chunks, preference, horizon) {
                        Ok((placements, remaining)) => {
                            slots = remaining;
                            let total = chunks.len();
                            for (chunk, (interval, reason)) in
                                chunks.iter().zip(placements.into_iter())
                            {
                                scheduled.push(ScheduledTask {
                                    task: task.clone(),
                                    part: (total > 1).then_some(ChunkRef {
                                        index: chunk.part_index,
                                        total: chunk.total_parts,
                                    }),
                                    interval,
                                    reason,
                                });
                            }
                        }
                        Err(reason) => unplaced.push(UnplacedTask {
                            task: task.clone(),
                            reason,
                        }),
                    }
                }
                Err(reason) => unplaced.push(UnplacedTask {
                    task: task.clone(),
                    reason,
                }),
            }
        }

        let explanation = explain(&scheduled, &conflicts, &unplaced, preference, draft);

        Ok(PlanResult {
            scheduled,
            conflicts,
            unplaced,
            draft,
            explanation,
        })
    }
}

impl Default for Planner {
    fn default() -> Self {
        Self::new()
    }
}

/// Decompose a flexible task into the chunks the allocator will place.
///
/// A task smaller than the block unit is scheduled as-is rather than
/// rejected; only an impossible balanced partition makes it unplaceable.
/// Configuration contradictions were already caught by `validate()`.
fn build_chunks(task: &Task, preference: &Preference) -> Result<Vec<SubTask>, String> {
    match split_task(task, preference) {
        Ok(chunks) => Ok(chunks),
        Err(SplitError::BelowMinimumBlock { .. }) => {
            let shrunk = Preference {
                min_block_minutes: 1,
                ..preference.clone()
            };
            split_task(task, &shrunk).map_err(|e| e.to_string())
        }
        Err(err) => Err(err.to_string()),
    }
}

type Placement = (TimeInterval, String);

/// Place every chunk of one task against a working copy of the slot list.
///
/// All-or-nothing: the shrunk slot list is returned only when every chunk
/// found a home, so a failed task leaves the slots untouched for the next
/// task in the ordering.
fn allocate(
    slots: &[TimeInterval],
    chunks: &[SubTask],
    preference: &Preference,
    horizon: TimeInterval,
) -> Result<(Vec<Placement>, Vec<TimeInterval>), String> {
    let mut trial = slots.to_vec();
    let mut placements = Vec::with_capacity(chunks.len());
    let mut prev_end: Option<DateTime<Utc>> = None;

    for chunk in chunks {
        let placement = place_chunk(&mut trial, chunk, preference, prev_end)
            .map_err(|e| e.to_string())?
            .ok_or_else(|| no_slot_reason(chunk, horizon))?;
        prev_end = Some(placement.0.end);
        placements.push(placement);
    }

    Ok((placements, trial))
}

fn no_slot_reason(chunk: &SubTask, horizon: TimeInterval) -> String {
    match chunk.deadline {
        Some(deadline) if deadline < horizon.end => format!(
            "no free slot of {} min before the deadline ({})",
            chunk.duration_minutes, deadline
        ),
        _ => format!(
            "no free slot of {} min within the horizon ending {}",
            chunk.duration_minutes, horizon.end
        ),
    }
}

/// Scan the slot list for the earliest compatible placement of one chunk
/// and shrink the consumed slot in place.
///
/// Compatibility: the chunk fits the slot's remaining span, lies inside
/// its window hint for that day, ends by its deadline, and starts at
/// least `buffer_minutes` after the previous sibling chunk.
fn place_chunk(
    slots: &mut Vec<TimeInterval>,
    chunk: &SubTask,
    preference: &Preference,
    prev_end: Option<DateTime<Utc>>,
) -> Result<Option<Placement>> {
    let earliest = prev_end.map(|end| end + Duration::minutes(preference.buffer_minutes));

    for index in 0..slots.len() {
        let slot = slots[index];

        let candidate = match chunk.window_hint {
            Some(hint) => match clip_to_hint(&slot, hint, preference)? {
                Some(clipped) => clipped,
                None => continue,
            },
            None => slot,
        };

        let mut start = candidate.start;
        if let Some(earliest) = earliest {
            start = start.max(earliest);
        }
        let end = start + Duration::minutes(chunk.duration_minutes);
        if end > candidate.end {
            continue;
        }
        if let Some(deadline) = chunk.deadline {
            if end > deadline {
                continue;
            }
        }

        let placed = TimeInterval::new(start, end)?;
        let padded = placed.pad(preference.buffer_minutes);
        let fragments: Vec<TimeInterval> = slot
            .subtract(&padded)
            .into_iter()
            .filter(|f| f.duration_minutes() >= preference.min_block_minutes)
            .collect();
        slots.splice(index..=index, fragments);

        let reason = match chunk.window_hint {
            Some(hint) => format!(
                "earliest available {} slot respecting {}-min buffer",
                hint.label(),
                preference.buffer_minutes
            ),
            None => format!(
                "earliest available slot respecting {}-min buffer",
                preference.buffer_minutes
            ),
        };
        return Ok(Some((placed, reason)));
    }

    Ok(None)
}

fn explain(
    scheduled: &[ScheduledTask],
    conflicts: &[Conflict],
    unplaced: &[UnplacedTask],
    preference: &Preference,
    draft: bool,
) -> String {
    let policy = match preference.priority_policy {
        crate::policy::PriorityPolicy::Eisenhower => "eisenhower",
        crate::policy::PriorityPolicy::Fifo => "fifo",
    };

    let mut parts = vec![format!(
        "Scheduled {} placements under the {} policy",
        scheduled.len(),
        policy
    )];
    if !conflicts.is_empty() {
        parts.push(format!(
            "{} conflicts among fixed items",
            conflicts.len()
        ));
    }
    if !unplaced.is_empty() {
        parts.push(format!("{} tasks could not be placed", unplaced.len()));
    }
    if draft {
        parts.push(
            "draft only: user is busy or in rest mode, do not commit this plan".to_string(),
        );
    }
    let mut explanation = parts.join("; ");
    explanation.push('.');
    explanation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Priority, UserState, WindowHint};
    use chrono::TimeZone;

    fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, day, hour, minute, 0).unwrap()
    }

    fn span(day: u32, sh: u32, sm: u32, eh: u32, em: u32) -> TimeInterval {
        TimeInterval::new(at(day, sh, sm), at(day, eh, em)).unwrap()
    }

    fn planner() -> Planner {
        // Anchor before working hours on day 2.
        Planner::new().with_now(at(2, 8, 0)).with_horizon_days(7)
    }

    #[test]
    fn fixed_tasks_pass_through_as_scheduled() {
        let task = Task::fixed("t1", "Standup", span(2, 9, 30, 10, 0));
        let result = planner()
            .plan(&[task], &[], &Preference::default(), &Status::default())
            .unwrap();
        assert_eq!(result.scheduled.len(), 1);
        assert_eq!(result.scheduled[0].interval, span(2, 9, 30, 10, 0));
        assert!(result.conflicts.is_empty());
    }

    #[test]
    fn conflicting_fixed_task_is_reported_and_still_blocks_time() {
        let event = Event::new("e1", "Meeting", span(2, 10, 0, 11, 0));
        let fixed = Task::fixed("t1", "Interview", span(2, 10, 30, 11, 30));
        let flexible = Task::flexible("t2", "Focus work", 60);

        let result = planner()
            .plan(
                &[fixed, flexible],
                &[event],
                &Preference::default(),
                &Status::default(),
            )
            .unwrap();

        assert_eq!(result.conflicts.len(), 1);
        assert_eq!(result.unplaced.len(), 1);
        assert_eq!(result.unplaced[0].task.id, "t1");

        // The flexible task must avoid both conflicting intervals plus
        // their buffers.
        let focus = result
            .scheduled
            .iter()
            .find(|s| s.task.id == "t2")
            .unwrap();
        assert!(!focus.interval.overlaps(&span(2, 10, 0, 11, 0)));
        assert!(!focus.interval.overlaps(&span(2, 10, 30, 11, 30)));
    }

    #[test]
    fn flexible_task_lands_in_first_gap() {
        let task = Task::flexible("t1", "Deep work", 120)
            .with_priority(Priority::P1)
            .with_deadline(at(3, 18, 0));
        let result = planner()
            .plan(&[task], &[], &Preference::default(), &Status::default())
            .unwrap();
        assert!(result.unplaced.is_empty());
        assert_eq!(result.scheduled[0].interval, span(2, 9, 0, 11, 0));
    }

    #[test]
    fn oversized_task_splits_with_rest_between_chunks() {
        let task = Task::flexible("t1", "Thesis", 180);
        let result = planner()
            .plan(&[task], &[], &Preference::default(), &Status::default())
            .unwrap();

        assert_eq!(result.scheduled.len(), 2);
        let first = &result.scheduled[0];
        let second = &result.scheduled[1];
        assert_eq!(first.part, Some(ChunkRef { index: 1, total: 2 }));
        assert_eq!(second.part, Some(ChunkRef { index: 2, total: 2 }));
        assert_eq!(first.interval.duration_minutes(), 90);
        assert_eq!(second.interval.duration_minutes(), 90);
        let gap = second.interval.start - first.interval.end;
        assert!(gap.num_minutes() >= 15);
    }

    #[test]
    fn window_hint_restricts_placement() {
        let task = Task::flexible("t1", "Email triage", 60).with_window_hint(WindowHint::Afternoon);
        let result = planner()
            .plan(&[task], &[], &Preference::default(), &Status::default())
            .unwrap();
        let placed = &result.scheduled[0];
        assert_eq!(placed.interval.start, at(2, 12, 0));
        assert!(placed.reason.contains("afternoon"));
    }

    #[test]
    fn unplaceable_task_does_not_block_others() {
        // 300 minutes cannot finish before a 10:00 deadline.
        let impossible = Task::flexible("big", "Huge task", 300)
            .with_priority(Priority::P0)
            .with_deadline(at(2, 10, 0));
        let small = Task::flexible("small", "Small task", 60);

        let result = planner()
            .plan(
                &[impossible, small],
                &[],
                &Preference::default(),
                &Status::default(),
            )
            .unwrap();

        assert_eq!(result.unplaced.len(), 1);
        assert_eq!(result.unplaced[0].task.id, "big");
        assert!(result.unplaced[0].reason.contains("deadline"));
        assert_eq!(result.scheduled.len(), 1);
        assert_eq!(result.scheduled[0].task.id, "small");
    }

    #[test]
    fn rest_mode_yields_full_draft_plan() {
        let task = Task::flexible("t1", "Work", 60);
        let status = Status {
            rest_mode: true,
            ..Default::default()
        };
        let result = planner()
            .plan(&[task], &[], &Preference::default(), &status)
            .unwrap();
        assert!(result.draft);
        assert_eq!(result.scheduled.len(), 1);
        assert!(result.explanation.contains("draft"));
    }

    #[test]
    fn busy_state_is_draft_too() {
        let status = Status {
            state: UserState::Busy,
            ..Default::default()
        };
        let result = planner()
            .plan(&[], &[], &Preference::default(), &status)
            .unwrap();
        assert!(result.draft);
    }

    #[test]
    fn invalid_preference_aborts_with_no_partial_plan() {
        let preference = Preference {
            min_block_minutes: 500,
            ..Default::default()
        };
        let task = Task::flexible("t1", "Work", 60);
        assert!(planner()
            .plan(&[task], &[], &preference, &Status::default())
            .is_err());
    }

    #[test]
    fn extreme_horizon_is_clamped_not_fatal() {
        let task = Task::flexible("t1", "Work", 60);
        let result = Planner::new()
            .with_now(at(2, 8, 0))
            .with_horizon_days(i64::MAX)
            .plan(&[task], &[], &Preference::default(), &Status::default())
            .unwrap();
        assert_eq!(result.scheduled.len(), 1);
    }

    #[test]
    fn tiny_task_is_scheduled_as_is() {
        // 10 minutes is below the 30-minute block unit; the planner
        // schedules it anyway rather than rejecting it.
        let task = Task::flexible("t1", "Quick call", 10);
        let result = planner()
            .plan(&[task], &[], &Preference::default(), &Status::default())
            .unwrap();
        assert_eq!(result.scheduled.len(), 1);
        assert_eq!(result.scheduled[0].interval.duration_minutes(), 10);
    }

    #[test]
    fn plan_is_deterministic() {
        let tasks = vec![
            Task::flexible("a", "One", 60).with_priority(Priority::P1),
            Task::flexible("b", "Two", 180),
            Task::fixed("c", "Standup", span(2, 9, 0, 9, 30)),
        ];
        let events = vec![Event::new("e1", "Lunch", span(2, 12, 0, 13, 0))];

        let first = planner()
            .plan(&tasks, &events, &Preference::default(), &Status::default())
            .unwrap();
        let second = planner()
            .plan(&tasks, &events, &Preference::default(), &Status::default())
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn eisenhower_places_critical_task_first() {
        let tasks = vec![
            Task::flexible("low", "Low", 60).with_priority(Priority::P3),
            Task::flexible("crit", "Critical", 60).with_priority(Priority::P0),
        ];
        let result = planner()
            .plan(&tasks, &[], &Preference::default(), &Status::default())
            .unwrap();
        let crit = result.scheduled.iter().find(|s| s.task.id == "crit").unwrap();
        let low = result.scheduled.iter().find(|s| s.task.id == "low").unwrap();
        assert!(crit.interval.start < low.interval.start);
    }
}
