//! Round state machine.
//!
//! ```text
//!   Running --P--> Paused --P--> Running
//!   Running --caught--> Dead --X--> Running
//! ```
//!
//! Being caught is a side effect of the simulation step, never of input.
//! Quitting is handled by the event loop and is not a state here.

use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SessionState {
    #[default]
    Running,
    Paused,
    Dead,
}

impl SessionState {
    /// Physics, pursuit, catch test and animation only run while this holds.
    pub fn is_simulating(self) -> bool {
        matches!(self, Self::Running)
    }

    /// Pause key. Has no effect once the player is dead.
    pub fn toggle_pause(self) -> Self {
        match self {
            Self::Running => Self::Paused,
            Self::Paused => Self::Running,
            Self::Dead => Self::Dead,
        }
    }

    pub fn can_restart(self) -> bool {
        matches!(self, Self::Dead)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Dead => "dead",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
