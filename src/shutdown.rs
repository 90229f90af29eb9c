//! Graceful shutdown on Ctrl+C / SIGTERM / SIGHUP
//!
//! The first signal raises a shared stop flag; the capture loop finishes the
//! step it is in (a copy is never torn) and returns. A second signal exits
//! immediately with code 130.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Exit code used when a second interrupt forces termination
pub const FORCED_EXIT_CODE: i32 = 130;

/// Cloneable stop flag shared between the signal handler and the loop
#[derive(Debug, Clone, Default)]
pub struct ShutdownFlag {
    stop: Arc<AtomicBool>,
}

impl ShutdownFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the capture loop to stop
    pub fn request(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }

    pub fn is_requested(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }

    /// Raw flag for interruptible sleeps
    pub fn as_atomic(&self) -> &AtomicBool {
        &self.stop
    }
}

/// Install the process-wide signal handler.
/// Call this once at program start.
pub fn install_handler(flag: &ShutdownFlag) -> Result<(), ctrlc::Error> {
    let flag = flag.clone();
    let received = AtomicUsize::new(0);

    ctrlc::set_handler(move || {
        if received.fetch_add(1, Ordering::SeqCst) == 0 {
            tracing::info!("Interrupt received, stopping after the current step...");
            flag.request();
        } else {
            tracing::warn!("Second interrupt received, exiting immediately");
            std::process::exit(FORCED_EXIT_CODE);
        }
    })
}
