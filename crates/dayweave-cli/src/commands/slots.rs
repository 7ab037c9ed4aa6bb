//! Free-slot listing within a horizon.

use chrono::{DateTime, Duration, Utc};
use clap::Args;
use dayweave_core::{find_free_slots, Event, Preference, TimeInterval};
use serde::Deserialize;

use super::{print_json, read_payload, CommandResult};

#[derive(Args)]
pub struct SlotsArgs {
    /// JSON slots request (reads stdin when omitted)
    json: Option<String>,
    /// Read the request from a file instead
    #[arg(long, short)]
    file: Option<std::path::PathBuf>,
}

#[derive(Deserialize)]
struct SlotsRequest {
    #[serde(default)]
    events: Vec<Event>,
    #[serde(default)]
    preference: Option<Preference>,
    /// Horizon length in days (default 7).
    #[serde(default)]
    days: Option<i64>,
    /// Horizon start (default: now).
    #[serde(default)]
    from: Option<DateTime<Utc>>,
}

pub fn run(args: SlotsArgs) -> CommandResult {
    let payload = read_payload(args.json, args.file)?;
    let request: SlotsRequest = serde_json::from_str(&payload)?;

    for event in &request.events {
        event.validate()?;
    }

    let preference = request.preference.unwrap_or_default();
    let start = request.from.unwrap_or_else(Utc::now);
    let days = request.days.unwrap_or(7).clamp(1, 365);
    let end = start
        .checked_add_signed(Duration::days(days))
        .ok_or("horizon end is outside the representable time range")?;
    let horizon = TimeInterval::new(start, end)?;

    let slots = find_free_slots(&request.events, &preference, horizon)?;
    print_json(&slots)
}
