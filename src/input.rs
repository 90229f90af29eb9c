//! Pointer input backends
//!
//! The capture loop drives the game's save menu through [`PointerDriver`].
//! `EnigoDriver` synthesizes real OS mouse events; `DryRunDriver` only logs
//! what it would have done, which is useful for checking a menu sequence
//! without a running game.

use crate::error::Result;
use crate::types::MouseButton;

/// Relative mouse control used to navigate the save menu
pub trait PointerDriver {
    /// Short backend name for logs
    fn name(&self) -> &'static str;

    /// Click `button` at the current cursor position
    fn click(&mut self, button: MouseButton) -> Result<()>;

    /// Move the cursor by `(dx, dy)` pixels
    fn move_by(&mut self, dx: i32, dy: i32) -> Result<()>;
}

impl<D: PointerDriver + ?Sized> PointerDriver for Box<D> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn click(&mut self, button: MouseButton) -> Result<()> {
        (**self).click(button)
    }

    fn move_by(&mut self, dx: i32, dy: i32) -> Result<()> {
        (**self).move_by(dx, dy)
    }
}

/// Driver that logs pointer actions without performing them
#[derive(Debug, Default)]
pub struct DryRunDriver {
    clicks: u64,
    position: (i64, i64),
}

impl DryRunDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of clicks that would have been sent
    pub fn clicks(&self) -> u64 {
        self.clicks
    }

    /// Cursor offset from where the run started
    pub fn offset(&self) -> (i64, i64) {
        self.position
    }
}

impl PointerDriver for DryRunDriver {
    fn name(&self) -> &'static str {
        "dry-run"
    }

    fn click(&mut self, button: MouseButton) -> Result<()> {
        self.clicks += 1;
        let (x, y) = self.offset();
        tracing::info!("[dry-run] {} click at offset ({}, {})", button, x, y);
        Ok(())
    }

    fn move_by(&mut self, dx: i32, dy: i32) -> Result<()> {
        self.position.0 += i64::from(dx);
        self.position.1 += i64::from(dy);
        tracing::debug!("[dry-run] move by ({}, {})", dx, dy);
        Ok(())
    }
}

#[cfg(feature = "enigo")]
pub use enigo_driver::EnigoDriver;

#[cfg(feature = "enigo")]
mod enigo_driver {
    use super::PointerDriver;
    use crate::error::{CaptureError, Result};
    use crate::types::MouseButton;
    use enigo::{Button, Coordinate, Direction, Enigo, Mouse, Settings};

    /// Driver sending real mouse events through enigo
    pub struct EnigoDriver {
        enigo: Enigo,
    }

    impl EnigoDriver {
        /// Connect to the platform input backend.
        ///
        /// Fails when no display is available or, on macOS, when the
        /// process lacks Accessibility permission.
        pub fn new() -> Result<Self> {
            let settings = Settings::default();
            let enigo = Enigo::new(&settings).map_err(|e| {
                CaptureError::input(format!("failed to connect to input backend: {}", e))
            })?;
            if let Ok((x, y)) = enigo.location() {
                tracing::debug!("Cursor starts at ({}, {})", x, y);
            }
            Ok(Self { enigo })
        }
    }

    impl std::fmt::Debug for EnigoDriver {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("EnigoDriver").finish_non_exhaustive()
        }
    }

    fn to_enigo(button: MouseButton) -> Button {
        match button {
            MouseButton::Left => Button::Left,
            MouseButton::Right => Button::Right,
            MouseButton::Middle => Button::Middle,
        }
    }

    impl PointerDriver for EnigoDriver {
        fn name(&self) -> &'static str {
            "enigo"
        }

        fn click(&mut self, button: MouseButton) -> Result<()> {
            self.enigo
                .button(to_enigo(button), Direction::Click)
                .map_err(|e| CaptureError::input(format!("{} click failed: {}", button, e)))
        }

        fn move_by(&mut self, dx: i32, dy: i32) -> Result<()> {
            self.enigo
                .move_mouse(dx, dy, Coordinate::Rel)
                .map_err(|e| CaptureError::input(format!("move by ({}, {}) failed: {}", dx, dy, e)))
        }
    }
}
