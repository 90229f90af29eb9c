use clap::Parser;
use std::path::PathBuf;

/// Automatically save an Anno 1602 game every N seconds.
///
/// All savegames are copied to the output path provided. Warning: the 10th
/// savegame slot will be overwritten! Start Anno 1602 in a window and place
/// the mouse at the very center of the options button before the start
/// delay runs out.
#[derive(Parser, Debug)]
#[command(name = "anno-autosave")]
#[command(version)]
pub struct Cli {
    /// Folder the game writes its savegames to
    pub anno_save_folder: PathBuf,

    /// Seconds between captures
    pub interval: u64,

    /// Folder receiving save_<i>.gam copies
    pub output_path: PathBuf,

    /// JSON file with additional settings (command-line values take precedence)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write the effective configuration to this file and exit
    #[arg(long)]
    pub save_config: Option<PathBuf>,

    /// Save slot file overwritten by the menu sequence [default: game11.gam]
    #[arg(long)]
    pub slot_file: Option<String>,

    /// UI scale multiplier for menu offsets [default: 2]
    #[arg(short, long, allow_negative_numbers = true)]
    pub scale: Option<i32>,

    /// Seconds to wait before the first capture [default: 5]
    #[arg(long)]
    pub start_delay: Option<u64>,

    /// Milliseconds to pause between menu clicks [default: 10]
    #[arg(long)]
    pub click_pause_ms: Option<u64>,

    /// Milliseconds to wait after the last click before copying [default: 0]
    #[arg(long)]
    pub settle_ms: Option<u64>,

    /// First output index [default: 0]
    #[arg(long)]
    pub start_index: Option<u64>,

    /// Stop after this many captures
    #[arg(short = 'n', long)]
    pub count: Option<u64>,

    /// Log menu steps instead of moving or clicking the mouse
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }
}
