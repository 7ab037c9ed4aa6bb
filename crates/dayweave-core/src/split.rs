//! Decomposition of oversized flexible tasks into focus chunks.
//!
//! A task longer than the focus cap is cut into the minimum number of
//! chunks, balanced in size rather than greedy (180 min under a 120-min
//! cap becomes 90+90, not 120+60), so no sitting is disproportionately
//! heavy. The planner inserts the mandatory rest gap between chunks of
//! the same parent when placing them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SplitError};
use crate::model::{Preference, Priority, Task, TaskKind, WindowHint};

/// One placeable chunk of a flexible task. Inherits the parent's
/// priority, deadline and window hint; `part_index` is 1-based.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubTask {
    pub id: String,
    pub parent_id: String,
    pub title: String,
    pub part_index: usize,
    pub total_parts: usize,
    pub duration_minutes: i64,
    pub priority: Priority,
    pub deadline: Option<DateTime<Utc>>,
    pub window_hint: Option<WindowHint>,
}

impl SubTask {
    fn from_parent(task: &Task, part_index: usize, total_parts: usize, minutes: i64) -> Self {
        let title = if total_parts > 1 {
            format!("{} ({}/{})", task.title, part_index, total_parts)
        } else {
            task.title.clone()
        };
        Self {
            // Ids derive from the parent so re-planning the same inputs
            // yields the same plan.
            id: format!("{}-part-{}", task.id, part_index),
            parent_id: task.id.clone(),
            title,
            part_index,
            total_parts,
            duration_minutes: minutes,
            priority: task.priority,
            deadline: task.deadline,
            window_hint: task.window_hint,
        }
    }
}

/// Split a flexible task per the preference's focus cap and block unit.
///
/// Returns a single chunk when the task already fits under the cap.
/// Fails with [`SplitError`] on a policy contradiction
/// (`min_block > max_focus`), a task shorter than the block unit, or a
/// duration that admits no balanced partition within the bounds.
pub fn split_task(task: &Task, preference: &Preference) -> Result<Vec<SubTask>, SplitError> {
    if task.kind != TaskKind::Flexible {
        return Err(SplitError::NotFlexible {
            id: task.id.clone(),
        });
    }
    let duration = task.estimated_minutes.ok_or_else(|| SplitError::NotFlexible {
        id: task.id.clone(),
    })?;

    let max_focus = preference.max_focus_minutes;
    let min_block = preference.min_block_minutes;
    if min_block > max_focus {
        return Err(SplitError::BlockExceedsFocus {
            min_block,
            max_focus,
        });
    }
    if duration < min_block {
        return Err(SplitError::BelowMinimumBlock {
            duration,
            min_block,
        });
    }
    if duration <= max_focus {
        return Ok(vec![SubTask::from_parent(task, 1, 1, duration)]);
    }

    // Minimum chunk count that respects the cap; sizes differ by at most
    // one minute.
    let parts = duration.div_euclid(max_focus)
        + if duration.rem_euclid(max_focus) > 0 { 1 } else { 0 };
    let base = duration / parts;
    let remainder = duration % parts;

    if base < min_block {
        return Err(SplitError::NoBalancedPartition {
            duration,
            min_block,
            max_focus,
        });
    }

    let chunks = (0..parts)
        .map(|i| {
            let minutes = if i < remainder { base + 1 } else { base };
            SubTask::from_parent(task, (i + 1) as usize, parts as usize, minutes)
        })
        .collect();
    Ok(chunks)
}
