//! Core value types shared by the capture loop
//!
//! Mouse buttons, menu steps and the monotonically increasing save index.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Mouse button used for a menu click
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

/// One step of the save-menu navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "lowercase")]
pub enum MenuStep {
    /// Click at the current cursor position
    Click {
        #[serde(default)]
        button: MouseButton,
    },
    /// Move the cursor relative to its current position
    Move { dx: i32, dy: i32 },
    /// Wait before the next step
    Pause { ms: u64 },
}

impl MenuStep {
    pub fn click() -> Self {
        Self::Click {
            button: MouseButton::Left,
        }
    }

    pub fn move_by(dx: i32, dy: i32) -> Self {
        Self::Move { dx, dy }
    }

    pub fn pause(ms: u64) -> Self {
        Self::Pause { ms }
    }
}

/// Index of the next output savegame
///
/// Only ever advances by one, so output names never repeat within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct SaveIndex(u64);

impl SaveIndex {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }

    /// The following index, or `None` once the index space is used up
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }

    /// Output file name, e.g. `save_3.gam`
    pub fn file_name(self) -> String {
        format!("save_{}.gam", self.0)
    }
}

impl std::fmt::Display for SaveIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
