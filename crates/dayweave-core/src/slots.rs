//! Free-slot computation within a scheduling horizon.
//!
//! Starts from each day's working-hour windows, subtracts no-disturb
//! windows and buffer-padded commitments, and keeps the fragments long
//! enough to host at least one minimum block. Slots are never persisted;
//! the planner recomputes them per call and shrinks them in memory as it
//! places chunks.

use chrono::{Duration, NaiveDate, NaiveTime};

use crate::conflict::Commitment;
use crate::error::{CoreError, IntervalError, Result};
use crate::interval::TimeInterval;
use crate::model::{Preference, WindowHint};

/// Materialize a minutes-of-day range on a calendar day.
fn window_on(day: NaiveDate, range: (u32, u32)) -> Result<TimeInterval> {
    let midnight = day.and_time(NaiveTime::MIN).and_utc();
    let start = midnight + Duration::minutes(range.0 as i64);
    let end = midnight + Duration::minutes(range.1 as i64);
    Ok(TimeInterval::new(start, end)?)
}

/// The portion of `slot` usable under a time-of-day hint, if any.
///
/// The hint window is taken on the day the slot starts; working-hour
/// windows never cross midnight, so a slot lies within one day.
pub fn clip_to_hint(
    slot: &TimeInterval,
    hint: WindowHint,
    preference: &Preference,
) -> Result<Option<TimeInterval>> {
    let range = preference.hint_windows.minute_range(hint)?;
    let window = window_on(slot.start.date_naive(), range)?;
    Ok(slot.intersect(&window))
}

/// Compute the free slots within `horizon` given the fixed commitments
/// and the user's constraint profile, in chronological order.
///
/// Each commitment is padded by `buffer_minutes` on both sides before
/// subtraction, so adjacent free time always leaves the mandated idle gap.
/// Fragments shorter than `min_block_minutes` are discarded.
pub fn find_free_slots(
    commitments: &[Commitment],
    preference: &Preference,
    horizon: TimeInterval,
) -> Result<Vec<TimeInterval>> {
    preference.validate()?;
    if !horizon.is_well_formed() {
        return Err(CoreError::Interval(IntervalError::EndNotAfterStart {
            start: horizon.start,
            end: horizon.end,
        }));
    }

    let padded: Vec<TimeInterval> = commitments
        .iter()
        .map(|c| c.interval.pad(preference.buffer_minutes))
        .collect();

    let mut slots = Vec::new();
    let mut day = horizon.start.date_naive();
    let last_day = horizon.end.date_naive();

    while day <= last_day {
        for window in &preference.working_hours {
            let window = window_on(day, window.minute_range()?)?;
            let Some(window) = window.intersect(&horizon) else {
                continue;
            };

            let mut fragments = vec![window];
            for blackout in &preference.no_disturb {
                let blackout = window_on(day, blackout.minute_range()?)?;
                fragments = fragments
                    .iter()
                    .flat_map(|f| f.subtract(&blackout))
                    .collect();
            }
            for occupied in &padded {
                fragments = fragments
                    .iter()
                    .flat_map(|f| f.subtract(occupied))
                    .collect();
            }

            slots.extend(
                fragments
                    .into_iter()
                    .filter(|f| f.duration_minutes() >= preference.min_block_minutes),
            );
        }

        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }

    slots.sort_by_key(|slot| slot.start);
    Ok(slots)
}
