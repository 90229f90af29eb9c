//! Capture configuration
//!
//! The effective configuration is built from three layers, highest
//! precedence first: command-line options, an optional JSON config file,
//! and built-in defaults tuned for Anno 1602 at 2x UI scale.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::Cli;
use crate::error::CaptureError;
use crate::menu::MenuSequence;

pub const DEFAULT_SLOT_FILE: &str = "game11.gam";
pub const DEFAULT_SCALE: i32 = 2;
pub const DEFAULT_START_DELAY_MS: u64 = 5_000;
pub const DEFAULT_CLICK_PAUSE_MS: u64 = 10;

/// Fully resolved settings for one capture run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Folder the game writes its savegames to
    pub save_folder: PathBuf,
    /// Seconds between captures
    pub interval_secs: u64,
    /// Folder receiving `save_<i>.gam`
    pub output_path: PathBuf,
    /// Slot file the save menu overwrites
    pub slot_file: String,
    /// UI scale multiplier applied to every menu move
    pub scale: i32,
    pub start_delay_ms: u64,
    pub click_pause_ms: u64,
    /// Wait between the last click and the copy
    pub settle_ms: u64,
    pub start_index: u64,
    /// Stop after this many captures; run until interrupted when unset
    pub max_saves: Option<u64>,
    /// Custom menu at 1x scale; the Anno 1602 default when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu: Option<MenuSequence>,
}

/// Partial configuration as read from a JSON file. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub save_folder: Option<PathBuf>,
    pub interval_secs: Option<u64>,
    pub output_path: Option<PathBuf>,
    pub slot_file: Option<String>,
    pub scale: Option<i32>,
    pub start_delay_ms: Option<u64>,
    pub click_pause_ms: Option<u64>,
    pub settle_ms: Option<u64>,
    pub start_index: Option<u64>,
    pub max_saves: Option<u64>,
    pub menu: Option<MenuSequence>,
}

impl ConfigFile {
    /// Load a partial configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration from {:?}", path.as_ref()))?;

        let file: Self =
            serde_json::from_str(&content).context("Failed to parse configuration JSON")?;

        Ok(file)
    }
}

impl CaptureConfig {
    /// Configuration with built-in defaults for everything but the paths and interval
    pub fn new(save_folder: PathBuf, interval_secs: u64, output_path: PathBuf) -> Self {
        Self {
            save_folder,
            interval_secs,
            output_path,
            slot_file: DEFAULT_SLOT_FILE.to_string(),
            scale: DEFAULT_SCALE,
            start_delay_ms: DEFAULT_START_DELAY_MS,
            click_pause_ms: DEFAULT_CLICK_PAUSE_MS,
            settle_ms: 0,
            start_index: 0,
            max_saves: None,
            menu: None,
        }
    }

    /// Resolve the effective configuration from parsed arguments.
    ///
    /// Loads `--config` when given; explicit command-line values win over it.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => ConfigFile::load_from_file(path)?,
            None => ConfigFile::default(),
        };
        Ok(Self::merge(cli, file))
    }

    fn merge(cli: &Cli, file: ConfigFile) -> Self {
        let mut config = Self::new(
            cli.anno_save_folder.clone(),
            cli.interval,
            cli.output_path.clone(),
        );

        if let Some(slot_file) = cli.slot_file.clone().or(file.slot_file) {
            config.slot_file = slot_file;
        }
        if let Some(scale) = cli.scale.or(file.scale) {
            config.scale = scale;
        }
        if let Some(ms) = cli
            .start_delay
            .map(|secs| secs.saturating_mul(1_000))
            .or(file.start_delay_ms)
        {
            config.start_delay_ms = ms;
        }
        if let Some(ms) = cli.click_pause_ms.or(file.click_pause_ms) {
            config.click_pause_ms = ms;
        }
        if let Some(ms) = cli.settle_ms.or(file.settle_ms) {
            config.settle_ms = ms;
        }
        if let Some(index) = cli.start_index.or(file.start_index) {
            config.start_index = index;
        }
        config.max_saves = cli.count.or(file.max_saves);
        config.menu = file.menu;

        // Positional arguments are mandatory, so the file copies of these only
        // matter when they disagree.
        if let Some(folder) = file.save_folder.filter(|f| *f != config.save_folder) {
            tracing::debug!("Ignoring save_folder {:?} from config file", folder);
        }
        if let Some(output) = file.output_path.filter(|o| *o != config.output_path) {
            tracing::debug!("Ignoring output_path {:?} from config file", output);
        }
        if let Some(secs) = file.interval_secs.filter(|s| *s != config.interval_secs) {
            tracing::debug!("Ignoring interval_secs {} from config file", secs);
        }

        config
    }

    /// Validate, then save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.validate()
            .context("Refusing to save an invalid configuration")?;

        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize configuration to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn start_delay(&self) -> Duration {
        Duration::from_millis(self.start_delay_ms)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    /// Menu sequence with the UI scale applied
    pub fn effective_menu(&self) -> MenuSequence {
        self.menu
            .clone()
            .unwrap_or_else(|| MenuSequence::anno_default(self.click_pause_ms))
            .scaled(self.scale)
    }

    /// Validate the configuration
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.interval_secs == 0 {
            return Err(CaptureError::config("interval must be at least 1 second"));
        }

        if self.scale == 0 {
            return Err(CaptureError::config("scale must not be zero"));
        }

        if self.max_saves == Some(0) {
            return Err(CaptureError::config("count must be at least 1"));
        }

        if let Some(count) = self.max_saves {
            if self.start_index.checked_add(count).is_none() {
                return Err(CaptureError::config(format!(
                    "start index {} leaves no room for {} captures",
                    self.start_index, count
                )));
            }
        }

        validate_slot_file(&self.slot_file)?;

        if !self.save_folder.is_dir() {
            return Err(CaptureError::config(format!(
                "save folder {:?} is not a directory",
                self.save_folder
            )));
        }

        if !self.output_path.is_dir() {
            return Err(CaptureError::config(format!(
                "output path {:?} is not a directory",
                self.output_path
            )));
        }

        let menu = self.effective_menu();
        if menu.click_count() == 0 {
            return Err(CaptureError::config("menu sequence contains no clicks"));
        }

        let (dx, dy) = menu.net_displacement();
        if (dx, dy) != (0, 0) {
            return Err(CaptureError::config(format!(
                "menu sequence leaves the cursor displaced by ({}, {}); it must end where it started",
                dx, dy
            )));
        }

        Ok(())
    }
}

/// Slot file must be a plain file name inside the save folder
fn validate_slot_file(slot_file: &str) -> crate::error::Result<()> {
    let trimmed = slot_file.trim();
    if trimmed.is_empty() {
        return Err(CaptureError::config("slot file name must not be empty"));
    }

    if trimmed == "." || trimmed == ".." || trimmed.contains(['/', '\\']) {
        return Err(CaptureError::config(format!(
            "slot file {:?} must be a bare file name",
            slot_file
        )));
    }

    Ok(())
}
