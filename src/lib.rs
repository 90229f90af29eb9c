//! anno-autosave library
//!
//! Periodically triggers the Anno 1602 save menu with simulated mouse input
//! and collects each resulting savegame as `save_<i>.gam`.

pub mod capture;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod menu;
pub mod schedule;
pub mod shutdown;
pub mod snapshot;
pub mod types;

// Re-export main types for convenience
pub use capture::{CaptureLoop, CaptureSummary, StopReason};
pub use config::{CaptureConfig, ConfigFile};
pub use error::CaptureError;
#[cfg(feature = "enigo")]
pub use input::EnigoDriver;
pub use input::{DryRunDriver, PointerDriver};
pub use menu::MenuSequence;
pub use schedule::{Clock, SystemClock, time_until_next_boundary};
pub use shutdown::ShutdownFlag;
pub use snapshot::{Snapshot, copy_savegame};
pub use types::{MenuStep, MouseButton, SaveIndex};
