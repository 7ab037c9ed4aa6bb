//! CLI command implementations.
//!
//! Every command reads one JSON payload (inline argument, `--file`, or
//! stdin), converts it into the core's strongly-typed entities, and
//! prints the result as pretty JSON. This is the validation/adapter
//! boundary: loose payloads from the parsing layer become typed values
//! here, never inside the core.

pub mod conflicts;
pub mod plan;
pub mod slots;
pub mod split;

use std::io::Read;
use std::path::PathBuf;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Resolve the JSON payload for a command: inline argument wins, then
/// `--file`, then stdin.
pub fn read_payload(json: Option<String>, file: Option<PathBuf>) -> Result<String, Box<dyn std::error::Error>> {
    if let Some(json) = json {
        return Ok(json);
    }
    if let Some(path) = file {
        return Ok(std::fs::read_to_string(path)?);
    }
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

/// Print any serializable value as pretty JSON.
pub fn print_json<T: serde::Serialize>(value: &T) -> CommandResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
