//! Task splitting preview.

use clap::Args;
use dayweave_core::{split_task, Preference, Task};
use serde::Deserialize;

use super::{print_json, read_payload, CommandResult};

#[derive(Args)]
pub struct SplitArgs {
    /// JSON split request (reads stdin when omitted)
    json: Option<String>,
    /// Read the request from a file instead
    #[arg(long, short)]
    file: Option<std::path::PathBuf>,
}

#[derive(Deserialize)]
struct SplitRequest {
    task: Task,
    #[serde(default)]
    preference: Option<Preference>,
}

pub fn run(args: SplitArgs) -> CommandResult {
    let payload = read_payload(args.json, args.file)?;
    let request: SplitRequest = serde_json::from_str(&payload)?;

    let preference = request.preference.unwrap_or_default();
    preference.validate()?;
    request.task.validate()?;

    let chunks = split_task(&request.task, &preference)?;
    print_json(&chunks)
}
