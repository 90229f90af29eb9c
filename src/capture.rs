//! The capture loop
//!
//! Each iteration replays the save menu, copies the freshly written slot
//! file to the next `save_<i>.gam`, then sleeps until the next interval
//! boundary. The first error ends the run.

use std::path::PathBuf;
use std::time::Duration;

use crate::config::CaptureConfig;
use crate::error::{CaptureError, Result};
use crate::input::PointerDriver;
use crate::menu::MenuSequence;
use crate::schedule::{Clock, sleep_interruptible, time_until_next_boundary};
use crate::shutdown::ShutdownFlag;
use crate::snapshot::{Snapshot, copy_savegame};
use crate::types::SaveIndex;

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// `max_saves` captures were taken
    CountReached,
    /// The shutdown flag was raised
    Interrupted,
}

/// Outcome of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureSummary {
    pub captures: u64,
    pub bytes_copied: u64,
    /// Index the next run should start at to continue the series
    pub next_index: SaveIndex,
    pub last_snapshot: Option<PathBuf>,
    pub stop_reason: StopReason,
}

/// Sequences menu replay, copy and sleep against a pointer driver and a clock
pub struct CaptureLoop<D, C> {
    config: CaptureConfig,
    menu: MenuSequence,
    driver: D,
    clock: C,
    shutdown: ShutdownFlag,
}

impl<D: PointerDriver, C: Clock> CaptureLoop<D, C> {
    pub fn new(config: CaptureConfig, driver: D, clock: C, shutdown: ShutdownFlag) -> Self {
        let menu = config.effective_menu();
        Self {
            config,
            menu,
            driver,
            clock,
            shutdown,
        }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Trigger the in-game save and copy the result.
    ///
    /// Returns `Ok(None)` when a stop request arrives before the copy.
    pub fn capture_once(&mut self, index: SaveIndex) -> Result<Option<Snapshot>> {
        let stop = self.shutdown.as_atomic();
        if !self.menu.replay(&mut self.driver, &mut self.clock, stop)? {
            return Ok(None);
        }

        if !self.sleep(self.config.settle()) {
            return Ok(None);
        }

        copy_savegame(
            &self.config.save_folder,
            &self.config.slot_file,
            &self.config.output_path,
            index,
        )
        .map(Some)
    }

    /// Run until `max_saves` is reached, the shutdown flag is raised, or a
    /// step fails.
    pub fn run(&mut self) -> Result<CaptureSummary> {
        let mut summary = CaptureSummary {
            captures: 0,
            bytes_copied: 0,
            next_index: SaveIndex::new(self.config.start_index),
            last_snapshot: None,
            stop_reason: StopReason::Interrupted,
        };

        tracing::info!(
            "Waiting {:?} before the first capture, place the cursor on the options button",
            self.config.start_delay()
        );
        if !self.sleep(self.config.start_delay()) {
            return Ok(summary);
        }

        let interval = self.config.interval();
        let origin = self.clock.elapsed();

        loop {
            if self.shutdown.is_requested() {
                break;
            }

            let Some(snapshot) = self.capture_once(summary.next_index)? else {
                break;
            };
            tracing::info!(
                "Captured save {} ({} bytes) -> {:?}",
                snapshot.index,
                snapshot.bytes,
                snapshot.path
            );

            summary.captures += 1;
            summary.bytes_copied += snapshot.bytes;
            summary.next_index = snapshot.index.next().ok_or_else(|| {
                CaptureError::config(format!(
                    "save index exhausted after {}",
                    snapshot.index.file_name()
                ))
            })?;
            summary.last_snapshot = Some(snapshot.path);

            if self
                .config
                .max_saves
                .is_some_and(|max| summary.captures >= max)
            {
                summary.stop_reason = StopReason::CountReached;
                break;
            }

            let wait = time_until_next_boundary(self.clock.elapsed() - origin, interval);
            tracing::debug!("Next capture in {:?}", wait);
            if !self.sleep(wait) {
                break;
            }
        }

        Ok(summary)
    }

    fn sleep(&mut self, duration: Duration) -> bool {
        sleep_interruptible(&mut self.clock, duration, self.shutdown.as_atomic())
    }
}
