//! Save-menu navigation script
//!
//! The default sequence starts with the cursor on the in-game options
//! button, opens the save dialog, picks slot 10, confirms, and moves the
//! cursor back to where it started.

use serde::{Deserialize, Serialize};
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use crate::error::Result;
use crate::input::PointerDriver;
use crate::schedule::{Clock, sleep_interruptible};
use crate::types::MenuStep;

/// Offset from the options button to the "Save" entry at 1x UI scale
const SAVE_ENTRY_OFFSET: (i32, i32) = (-160, 425);
/// Vertical distance between the save entry and slot 10 at 1x UI scale
const SLOT_ROW_OFFSET: i32 = 45;

/// Ordered list of pointer steps replayed once per capture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuSequence {
    steps: Vec<MenuStep>,
}

impl MenuSequence {
    pub fn new(steps: Vec<MenuStep>) -> Self {
        Self { steps }
    }

    /// The Anno 1602 save-slot-10 sequence at 1x UI scale.
    ///
    /// `pause_ms` is inserted after each move so the game registers the
    /// hover before the click lands.
    pub fn anno_default(pause_ms: u64) -> Self {
        let (save_dx, save_dy) = SAVE_ENTRY_OFFSET;
        Self::new(vec![
            MenuStep::click(),
            MenuStep::move_by(save_dx, save_dy),
            MenuStep::pause(pause_ms),
            MenuStep::click(),
            MenuStep::move_by(0, -SLOT_ROW_OFFSET),
            MenuStep::pause(pause_ms),
            MenuStep::click(),
            MenuStep::move_by(0, SLOT_ROW_OFFSET),
            MenuStep::pause(pause_ms),
            MenuStep::click(),
            MenuStep::move_by(-save_dx, -save_dy),
        ])
    }

    pub fn steps(&self) -> &[MenuStep] {
        &self.steps
    }

    /// Copy of the sequence with every move multiplied by `factor`
    pub fn scaled(&self, factor: i32) -> Self {
        let steps = self
            .steps
            .iter()
            .map(|step| match *step {
                MenuStep::Move { dx, dy } => MenuStep::Move {
                    dx: dx.saturating_mul(factor),
                    dy: dy.saturating_mul(factor),
                },
                other => other,
            })
            .collect();
        Self { steps }
    }

    /// Sum of all moves; zero means the cursor ends where it started
    pub fn net_displacement(&self) -> (i64, i64) {
        self.steps.iter().fold((0, 0), |(x, y), step| match *step {
            MenuStep::Move { dx, dy } => (x + i64::from(dx), y + i64::from(dy)),
            _ => (x, y),
        })
    }

    pub fn click_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|step| matches!(step, MenuStep::Click { .. }))
            .count()
    }

    /// Perform every step in order, stopping at the first driver error.
    ///
    /// Returns `Ok(false)` when `stop` is raised during a pause; the
    /// remaining steps are skipped.
    pub fn replay<D, C>(&self, driver: &mut D, clock: &mut C, stop: &AtomicBool) -> Result<bool>
    where
        D: PointerDriver + ?Sized,
        C: Clock + ?Sized,
    {
        for step in &self.steps {
            match *step {
                MenuStep::Click { button } => driver.click(button)?,
                MenuStep::Move { dx, dy } => driver.move_by(dx, dy)?,
                MenuStep::Pause { ms } => {
                    if !sleep_interruptible(clock, Duration::from_millis(ms), stop) {
                        return Ok(false);
                    }
                }
            }
        }
        Ok(true)
    }
}

impl Default for MenuSequence {
    fn default() -> Self {
        Self::anno_default(10)
    }
}
