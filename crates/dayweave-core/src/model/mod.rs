//! Strongly-typed scheduling entities.
//!
//! Loosely-typed JSON from the parsing/API layer is deserialized into
//! these types at the boundary; each entity exposes `validate()` so the
//! core never re-checks field presence mid-algorithm.

mod event;
mod preference;
mod status;
mod task;

pub use event::Event;
pub use preference::{DailyWindow, HintWindows, Preference};
pub use status::{Status, UserState};
pub use task::{Priority, Task, TaskKind, WindowHint};
