//! Conflict reporting among fixed events.

use clap::Args;
use dayweave_core::{detect_conflicts, Event};
use serde::Deserialize;

use super::{print_json, read_payload, CommandResult};

#[derive(Args)]
pub struct ConflictsArgs {
    /// JSON event list or `{"events": [...]}` (reads stdin when omitted)
    json: Option<String>,
    /// Read the payload from a file instead
    #[arg(long, short)]
    file: Option<std::path::PathBuf>,
}

#[derive(Deserialize)]
struct ConflictsRequest {
    events: Vec<Event>,
}

pub fn run(args: ConflictsArgs) -> CommandResult {
    let payload = read_payload(args.json, args.file)?;

    // Accept either a bare event array or a wrapped request object.
    let events: Vec<Event> = match serde_json::from_str(&payload) {
        Ok(events) => events,
        Err(_) => serde_json::from_str::<ConflictsRequest>(&payload)?.events,
    };
    for event in &events {
        event.validate()?;
    }

    print_json(&detect_conflicts(&events))
}
