//! Priority-policy strategies for ordering flexible tasks.
//!
//! The policy is a small closed set selected once per planning call from
//! `Preference.priority_policy`, keeping the allocation loop free of
//! policy branches.
//!
//! Eisenhower ordering uses a documented monotonic combination: the
//! priority rank score (P0=100 .. P3=25) weighted 0.6, plus a
//! deadline-urgency score weighted 0.4. Urgency buckets by proximity
//! (overdue 100, within 24h 90-99, 3 days 60-89, 7 days 30-59, 30 days
//! 10-29, further 10); a task without a deadline scores 0 urgency, so it
//! always sorts after every deadlined task of equal priority. Ties keep
//! arrival order via stable sort.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::Task;

/// Ordering policy for flexible tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityPolicy {
    /// Urgent-important weighted ordering.
    Eisenhower,
    /// Strict arrival order, priority ignored.
    Fifo,
}

impl Default for PriorityPolicy {
    fn default() -> Self {
        PriorityPolicy::Eisenhower
    }
}

/// Weights for the Eisenhower combination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EisenhowerWeights {
    pub priority_weight: f32,
    pub urgency_weight: f32,
}

impl Default for EisenhowerWeights {
    fn default() -> Self {
        Self {
            priority_weight: 0.6,
            urgency_weight: 0.4,
        }
    }
}

/// Deadline-proximity score on a 0-100 scale.
fn urgency_score(deadline: Option<DateTime<Utc>>, now: DateTime<Utc>) -> f32 {
    let Some(deadline) = deadline else {
        return 0.0;
    };

    // num_hours truncates toward zero, so overdue must be decided on the
    // instants themselves or a deadline 59 minutes past would bucket as
    // "within 24h".
    if deadline < now {
        return 100.0;
    }
    let hours = deadline.signed_duration_since(now).num_hours();
    if hours < 24 {
        90.0 + 9.0 * (1.0 - hours as f32 / 24.0)
    } else if hours < 72 {
        let progress = (hours - 24) as f32 / 48.0;
        89.0 - 29.0 * progress
    } else if hours < 168 {
        let progress = (hours - 72) as f32 / 96.0;
        59.0 - 29.0 * progress
    } else if hours < 720 {
        let progress = (hours - 168) as f32 / 552.0;
        29.0 - 19.0 * progress
    } else {
        10.0
    }
}

/// Eisenhower score for one task; higher schedules earlier.
pub fn eisenhower_score(task: &Task, now: DateTime<Utc>, weights: &EisenhowerWeights) -> f32 {
    weights.priority_weight * task.priority.rank_score()
        + weights.urgency_weight * urgency_score(task.deadline, now)
}

/// Order tasks for allocation under the given policy. The input order is
/// the arrival/creation order and is preserved on ties.
pub fn order_tasks<'a>(
    tasks: &'a [Task],
    policy: PriorityPolicy,
    now: DateTime<Utc>,
) -> Vec<&'a Task> {
    let mut ordered: Vec<&Task> = tasks.iter().collect();
    match policy {
        PriorityPolicy::Fifo => {}
        PriorityPolicy::Eisenhower => {
            let weights = EisenhowerWeights::default();
            ordered.sort_by(|a, b| {
                let score_a = eisenhower_score(a, now, &weights);
                let score_b = eisenhower_score(b, now, &weights);
                score_b.total_cmp(&score_a)
            });
        }
    }
    ordered
}
