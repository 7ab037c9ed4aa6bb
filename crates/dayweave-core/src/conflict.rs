//! Pairwise overlap detection and conflict reporting among fixed items.
//!
//! Conflicts are advisory data: detection never mutates or drops the
//! offending items. The planner only refuses to treat a conflicting fixed
//! task as a clean placement; its interval still blocks time.

use serde::{Deserialize, Serialize};

use crate::interval::TimeInterval;
use crate::model::{Event, Task, TaskKind};

/// A fixed item occupying calendar time, viewed uniformly whether it came
/// from an `Event` or a fixed `Task`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commitment {
    pub id: String,
    pub title: String,
    pub interval: TimeInterval,
}

impl Commitment {
    pub fn from_event(event: &Event) -> Self {
        Self {
            id: event.id.clone(),
            title: event.title.clone(),
            interval: event.interval,
        }
    }

    /// Fixed tasks become commitments; flexible tasks have no interval yet.
    pub fn from_task(task: &Task) -> Option<Self> {
        if task.kind != TaskKind::Fixed {
            return None;
        }
        task.interval.map(|interval| Self {
            id: task.id.clone(),
            title: task.title.clone(),
            interval,
        })
    }
}

/// A reported overlap between two fixed items. Produced fresh per
/// invocation; ids are ordered canonically so each pair appears once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    pub subject_id: String,
    pub other_id: String,
    pub reason: String,
    pub overlap: TimeInterval,
}

// An item never conflicts with itself, including an event and a fixed
// task sharing an id.
fn conflict_between(a: &Commitment, b: &Commitment) -> Option<Conflict> {
    if a.id == b.id {
        return None;
    }
    let overlap = a.interval.intersect(&b.interval)?;
    let (subject, other) = if a.id <= b.id { (a, b) } else { (b, a) };
    Some(Conflict {
        subject_id: subject.id.clone(),
        other_id: other.id.clone(),
        reason: format!("'{}' overlaps '{}'", subject.title, other.title),
        overlap,
    })
}

/// Find every item in `others` overlapping `subject`, one conflict per
/// distinct overlapping item. Boundary-adjacent items are never reported.
pub fn find_conflicts(subject: &Commitment, others: &[Commitment]) -> Vec<Conflict> {
    others
        .iter()
        .filter_map(|other| conflict_between(subject, other))
        .collect()
}

/// Run the pairwise check across the whole fixed set, each conflicting
/// pair reported exactly once. Sort-by-start sweep: once an item starts at
/// or after the current item's end, no later item can overlap it either.
pub fn find_all_conflicts(items: &[Commitment]) -> Vec<Conflict> {
    let mut sorted: Vec<&Commitment> = items.iter().collect();
    sorted.sort_by_key(|item| item.interval.start);

    let mut conflicts = Vec::new();
    for (i, item) in sorted.iter().enumerate() {
        for other in &sorted[i + 1..] {
            if other.interval.start >= item.interval.end {
                break;
            }
            if let Some(conflict) = conflict_between(item, other) {
                conflicts.push(conflict);
            }
        }
    }
    conflicts
}
