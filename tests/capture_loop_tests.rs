//! Tests for the capture loop
//!
//! These tests verify:
//! - One savegame copy per interval
//! - Consecutive output indices
//! - Menu clicks reach the pointer driver before each copy
//! - Failures and interrupts end the run

use anno_autosave::error::CaptureError;
use anno_autosave::{
    CaptureConfig, CaptureLoop, Clock, MenuSequence, MenuStep, MouseButton, PointerDriver,
    SaveIndex, ShutdownFlag, StopReason,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

// =============================================================================
// Test doubles
// =============================================================================

/// Pointer event as seen by the driver, with the simulated time it arrived
#[derive(Debug, Clone, PartialEq)]
enum Event {
    Click(MouseButton, Duration),
    Move(i32, i32),
}

/// Clock that only advances when slept on; shares its time with the driver
#[derive(Clone, Default)]
struct SimClock {
    now: Arc<Mutex<Duration>>,
}

impl Clock for SimClock {
    fn elapsed(&self) -> Duration {
        *self.now.lock().unwrap()
    }

    fn sleep(&mut self, duration: Duration) {
        *self.now.lock().unwrap() += duration;
    }
}

/// Driver recording every event; optionally rewrites the slot file on the
/// final click the way the game does when a save completes
struct RecordingDriver {
    clock: SimClock,
    events: Vec<Event>,
    game_slot: Option<PathBuf>,
    clicks: usize,
    fail_on_click: Option<usize>,
}

impl RecordingDriver {
    fn new(clock: &SimClock) -> Self {
        Self {
            clock: clock.clone(),
            events: Vec::new(),
            game_slot: None,
            clicks: 0,
            fail_on_click: None,
        }
    }

    fn writing_saves_to(mut self, slot: PathBuf) -> Self {
        self.game_slot = Some(slot);
        self
    }
}

impl PointerDriver for RecordingDriver {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn click(&mut self, button: MouseButton) -> anno_autosave::error::Result<()> {
        self.clicks += 1;
        if self.fail_on_click == Some(self.clicks) {
            return Err(CaptureError::input("window lost focus"));
        }
        let now = self.clock.elapsed();
        self.events.push(Event::Click(button, now));
        if let Some(slot) = &self.game_slot {
            if self.clicks % 4 == 0 {
                fs::write(slot, format!("saved at {}ms", now.as_millis())).unwrap();
            }
        }
        Ok(())
    }

    fn move_by(&mut self, dx: i32, dy: i32) -> anno_autosave::error::Result<()> {
        self.events.push(Event::Move(dx, dy));
        Ok(())
    }
}

fn setup(interval_secs: u64) -> (TempDir, TempDir, CaptureConfig) {
    let saves = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    fs::write(saves.path().join("game11.gam"), b"initial").unwrap();
    let config = CaptureConfig::new(
        saves.path().to_path_buf(),
        interval_secs,
        output.path().to_path_buf(),
    );
    (saves, output, config)
}

fn output_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

// =============================================================================
// Smoke test
// =============================================================================

#[test]
fn test_one_copy_per_interval() {
    let (saves, output, mut config) = setup(60);
    config.max_saves = Some(4);
    config.validate().unwrap();

    let clock = SimClock::default();
    let driver = RecordingDriver::new(&clock).writing_saves_to(saves.path().join("game11.gam"));
    let mut capture = CaptureLoop::new(config, driver, clock.clone(), ShutdownFlag::new());

    let summary = capture.run().unwrap();

    assert_eq!(summary.captures, 4);
    assert_eq!(summary.stop_reason, StopReason::CountReached);
    assert_eq!(
        output_files(output.path()),
        vec!["save_0.gam", "save_1.gam", "save_2.gam", "save_3.gam"]
    );

    // First click of each capture lands on an interval boundary after the 5 s delay.
    let first_clicks: Vec<Duration> = capture
        .driver()
        .events
        .iter()
        .filter_map(|e| match e {
            Event::Click(_, at) => Some(*at),
            _ => None,
        })
        .step_by(4)
        .collect();
    assert_eq!(
        first_clicks,
        vec![
            Duration::from_secs(5),
            Duration::from_secs(65),
            Duration::from_secs(125),
            Duration::from_secs(185),
        ]
    );
}

#[test]
fn test_copy_happens_after_menu_save() {
    let (saves, output, mut config) = setup(30);
    config.max_saves = Some(2);

    let clock = SimClock::default();
    let driver = RecordingDriver::new(&clock).writing_saves_to(saves.path().join("game11.gam"));
    let mut capture = CaptureLoop::new(config, driver, clock.clone(), ShutdownFlag::new());
    capture.run().unwrap();

    // Each copy carries what the game wrote on that capture's final click.
    assert_eq!(
        fs::read_to_string(output.path().join("save_0.gam")).unwrap(),
        "saved at 5030ms"
    );
    assert_eq!(
        fs::read_to_string(output.path().join("save_1.gam")).unwrap(),
        "saved at 35030ms"
    );
}

#[test]
fn test_default_menu_moves_at_double_scale() {
    let (_saves, _output, mut config) = setup(10);
    config.max_saves = Some(1);

    let clock = SimClock::default();
    let mut capture =
        CaptureLoop::new(config, RecordingDriver::new(&clock), clock.clone(), ShutdownFlag::new());
    capture.run().unwrap();

    let moves: Vec<&Event> = capture
        .driver()
        .events
        .iter()
        .filter(|e| matches!(e, Event::Move(..)))
        .collect();
    assert_eq!(
        moves,
        vec![
            &Event::Move(-320, 850),
            &Event::Move(0, -90),
            &Event::Move(0, 90),
            &Event::Move(320, -850),
        ]
    );
}

#[test]
fn test_start_index_continues_series() {
    let (_saves, output, mut config) = setup(10);
    config.start_index = 41;
    config.max_saves = Some(2);

    let clock = SimClock::default();
    let mut capture =
        CaptureLoop::new(config, RecordingDriver::new(&clock), clock.clone(), ShutdownFlag::new());
    let summary = capture.run().unwrap();

    assert_eq!(summary.next_index, SaveIndex::new(43));
    assert_eq!(output_files(output.path()), vec!["save_41.gam", "save_42.gam"]);
}

#[test]
fn test_custom_menu_from_config() {
    let (_saves, _output, mut config) = setup(10);
    config.max_saves = Some(1);
    config.scale = 1;
    config.menu = Some(MenuSequence::new(vec![
        MenuStep::Click {
            button: MouseButton::Right,
        },
        MenuStep::move_by(12, 0),
        MenuStep::click(),
        MenuStep::move_by(-12, 0),
    ]));
    config.validate().unwrap();

    let clock = SimClock::default();
    let mut capture =
        CaptureLoop::new(config, RecordingDriver::new(&clock), clock.clone(), ShutdownFlag::new());
    capture.run().unwrap();

    let events = &capture.driver().events;
    assert_eq!(events.len(), 4);
    assert!(matches!(events[0], Event::Click(MouseButton::Right, _)));
    assert_eq!(events[1], Event::Move(12, 0));
}

// =============================================================================
// Failure handling
// =============================================================================

#[test]
fn test_driver_error_stops_before_copy() {
    let (_saves, output, config) = setup(10);

    let clock = SimClock::default();
    let mut driver = RecordingDriver::new(&clock);
    driver.fail_on_click = Some(6);
    let mut capture = CaptureLoop::new(config, driver, clock.clone(), ShutdownFlag::new());

    let err = capture.run().unwrap_err();

    assert!(matches!(err, CaptureError::Input(_)));
    // The first capture completed; the second failed mid-menu.
    assert_eq!(output_files(output.path()), vec!["save_0.gam"]);
}

#[test]
fn test_missing_output_folder_is_fatal() {
    let (_saves, output, mut config) = setup(10);
    config.output_path = output.path().join("gone");

    let clock = SimClock::default();
    let mut capture =
        CaptureLoop::new(config, RecordingDriver::new(&clock), clock.clone(), ShutdownFlag::new());

    let err = capture.run().unwrap_err();
    assert!(matches!(err, CaptureError::Copy { .. }));
}

#[test]
fn test_shutdown_between_captures() {
    let (_saves, output, config) = setup(10);
    let shutdown = ShutdownFlag::new();

    let clock = SimClock::default();
    let mut capture =
        CaptureLoop::new(config, RecordingDriver::new(&clock), clock.clone(), shutdown.clone());

    assert!(capture.capture_once(SaveIndex::new(0)).unwrap().is_some());
    shutdown.request();
    let summary = capture.run().unwrap();

    assert_eq!(summary.captures, 0);
    assert_eq!(summary.stop_reason, StopReason::Interrupted);
    assert_eq!(output_files(output.path()), vec!["save_0.gam"]);
}
