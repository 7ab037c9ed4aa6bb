//! User status consulted, never mutated, by the planner.

use serde::{Deserialize, Serialize};

/// Current user state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserState {
    Busy,
    Idle,
}

impl Default for UserState {
    fn default() -> Self {
        UserState::Idle
    }
}

/// Gates whether a computed plan is committable or draft-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Status {
    #[serde(default)]
    pub state: UserState,
    #[serde(default)]
    pub rest_mode: bool,
    #[serde(default)]
    pub activity: Option<String>,
}

impl Status {
    /// Whether a plan computed under this status may be persisted.
    /// Busy or rest-mode users still get a full plan, marked draft.
    pub fn allows_commit(&self) -> bool {
        !self.rest_mode && self.state != UserState::Busy
    }
}
