//! Full planning pass over tasks and events.

use chrono::{DateTime, Utc};
use clap::Args;
use dayweave_core::{Event, Planner, Preference, Status, Task};
use serde::Deserialize;

use super::{print_json, read_payload, CommandResult};

#[derive(Args)]
pub struct PlanArgs {
    /// JSON planning request (reads stdin when omitted)
    json: Option<String>,
    /// Read the request from a file instead
    #[arg(long, short)]
    file: Option<std::path::PathBuf>,
}

/// Planning request payload. Preference and status fall back to their
/// defaults when omitted.
#[derive(Deserialize)]
struct PlanRequest {
    tasks: Vec<Task>,
    #[serde(default)]
    events: Vec<Event>,
    #[serde(default)]
    preference: Option<Preference>,
    #[serde(default)]
    status: Option<Status>,
    /// Horizon length in days (default 7).
    #[serde(default)]
    days: Option<i64>,
    /// Anchor instant for deterministic planning (default: now).
    #[serde(default)]
    now: Option<DateTime<Utc>>,
}

pub fn run(args: PlanArgs) -> CommandResult {
    let payload = read_payload(args.json, args.file)?;
    let request: PlanRequest = serde_json::from_str(&payload)?;

    let preference = request.preference.unwrap_or_default();
    let status = request.status.unwrap_or_default();

    let mut planner = Planner::new();
    if let Some(now) = request.now {
        planner = planner.with_now(now);
    }
    if let Some(days) = request.days {
        planner = planner.with_horizon_days(days);
    }

    let result = planner.plan(&request.tasks, &request.events, &preference, &status)?;
    print_json(&result)
}
