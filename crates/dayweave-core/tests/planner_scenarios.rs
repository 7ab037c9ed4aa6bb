//! End-to-end scenarios for the planning pass, exercising the public
//! crate API the way the CLI and API collaborators do.

use chrono::{DateTime, TimeZone, Utc};
use dayweave_core::{
    detect_conflicts, find_free_slots, split_task, Event, Planner, Preference, Priority,
    Status, Task, TimeInterval, UserState,
};

fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, day, hour, minute, 0).unwrap()
}

fn span(day: u32, sh: u32, sm: u32, eh: u32, em: u32) -> TimeInterval {
    TimeInterval::new(at(day, sh, sm), at(day, eh, em)).unwrap()
}

fn planner() -> Planner {
    Planner::new().with_now(at(2, 8, 0)).with_horizon_days(7)
}

// Scenario A: a fixed event and a new fixed task overlapping on the same
// day produce exactly one conflict referencing both.
#[test]
fn overlapping_fixed_items_produce_one_conflict() {
    let events = vec![
        Event::new("meeting", "Team meeting", span(2, 10, 0, 11, 0)),
        Event::new("interview", "Interview", span(2, 10, 30, 11, 30)),
    ];
    let conflicts = detect_conflicts(&events);
    assert_eq!(conflicts.len(), 1);
    let ids = [conflicts[0].subject_id.as_str(), conflicts[0].other_id.as_str()];
    assert!(ids.contains(&"meeting"));
    assert!(ids.contains(&"interview"));
}

// Scenario B: a 120-minute P1 task with a deadline tomorrow lands in the
// first 120-minute gap of the horizon.
#[test]
fn deadlined_task_takes_first_fitting_gap() {
    let task = Task::flexible("report", "Quarterly report", 120)
        .with_priority(Priority::P1)
        .with_deadline(at(3, 18, 0));
    let result = planner()
        .plan(&[task], &[], &Preference::default(), &Status::default())
        .unwrap();

    assert!(result.unplaced.is_empty());
    assert_eq!(result.scheduled.len(), 1);
    assert_eq!(result.scheduled[0].interval, span(2, 9, 0, 11, 0));
}

// Scenario C: 180 minutes under a 120-minute cap splits into two
// 90-minute chunks with the 15-minute rest between them.
#[test]
fn oversized_task_splits_into_balanced_chunks() {
    let task = Task::flexible("thesis", "Thesis writing", 180).with_deadline(at(4, 18, 0));

    let chunks = split_task(&task, &Preference::default()).unwrap();
    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].duration_minutes, 90);
    assert_eq!(chunks[1].duration_minutes, 90);

    let result = planner()
        .plan(&[task], &[], &Preference::default(), &Status::default())
        .unwrap();
    assert_eq!(result.scheduled.len(), 2);
    let gap = result.scheduled[1].interval.start - result.scheduled[0].interval.end;
    assert_eq!(gap.num_minutes(), 15);
    assert!(result.scheduled[1].interval.end <= at(4, 18, 0));
}

// Scenario D: rest mode still computes the full placement but the result
// is a non-committing draft.
#[test]
fn rest_mode_marks_plan_as_draft() {
    let task = Task::flexible("work", "Focus work", 60);
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

// Scenario E: a task with no fitting slot before its deadline is
// reported unplaced while every other task is still placed.
#[test]
fn unschedulable_task_is_reported_not_fatal() {
    let blocker = Event::new("offsite", "All-day offsite", span(2, 9, 0, 18, 0));
    let urgent = Task::flexible("urgent", "Urgent prep", 120).with_deadline(at(2, 18, 0));
    let relaxed = Task::flexible("relaxed", "Relaxed reading", 60);

    let result = planner()
        .plan(
            &[urgent, relaxed],
            &[blocker],
            &Preference::default(),
            &Status::default(),
        )
        .unwrap();

    assert_eq!(result.unplaced.len(), 1);
    assert_eq!(result.unplaced[0].task.id, "urgent");
    assert!(!result.unplaced[0].reason.is_empty());

    let relaxed = result
        .scheduled
        .iter()
        .find(|s| s.task.id == "relaxed")
        .unwrap();
    assert_eq!(relaxed.interval.start, at(3, 9, 0));
}

#[test]
fn plan_is_idempotent_for_identical_inputs() {
    let tasks = vec![
        Task::flexible("a", "Draft design doc", 90).with_priority(Priority::P1),
        Task::flexible("b", "Inbox sweep", 30),
        Task::flexible("c", "Workshop prep", 200).with_deadline(at(5, 12, 0)),
        Task::fixed("standup", "Standup", span(2, 9, 0, 9, 15)),
    ];
    let events = vec![Event::new("lunch", "Lunch", span(2, 12, 0, 13, 0))];
    let status = Status {
        state: UserState::Idle,
        ..Default::default()
    };

    let first = planner()
        .plan(&tasks, &events, &Preference::default(), &status)
        .unwrap();
    let second = planner()
        .plan(&tasks, &events, &Preference::default(), &status)
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn free_slots_respect_events_and_buffers() {
    let events = vec![Event::new("meeting", "Meeting", span(2, 10, 0, 11, 0))];
    let horizon = TimeInterval::new(at(2, 0, 0), at(3, 0, 0)).unwrap();
    let slots = find_free_slots(&events, &Preference::default(), horizon).unwrap();

    assert_eq!(slots, vec![span(2, 9, 0, 9, 45), span(2, 11, 15, 18, 0)]);
}

#[test]
fn scheduled_placements_never_overlap_each_other() {
    let tasks = vec![
        Task::flexible("a", "One", 60),
        Task::flexible("b", "Two", 90),
        Task::flexible("c", "Three", 45),
        Task::flexible("d", "Four", 150),
    ];
    let events = vec![Event::new("lunch", "Lunch", span(2, 12, 0, 13, 0))];
    let result = planner()
        .plan(&tasks, &events, &Preference::default(), &Status::default())
        .unwrap();

    assert!(result.unplaced.is_empty());
    for (i, a) in result.scheduled.iter().enumerate() {
        assert!(!a.interval.overlaps(&span(2, 12, 0, 13, 0)));
        for b in &result.scheduled[i + 1..] {
            assert!(
                !a.interval.overlaps(&b.interval),
                "{} overlaps {}",
                a.task.id,
                b.task.id
            );
        }
    }
}

#[test]
fn plan_result_serializes_to_json() {
    let task = Task::flexible("a", "One", 60);
    let result = planner()
        .plan(&[task], &[], &Preference::default(), &Status::default())
        .unwrap();

    let json = result.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(value.get("scheduled").is_some());
    assert!(value.get("explanation").is_some());
}
