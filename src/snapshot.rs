//! Copying the game's save slot into the output folder

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CaptureError, Result};
use crate::types::SaveIndex;

/// A savegame written to the output folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub index: SaveIndex,
    pub path: PathBuf,
    pub bytes: u64,
}

/// Destination path for the savegame with `index`
pub fn snapshot_path(output_path: &Path, index: SaveIndex) -> PathBuf {
    output_path.join(index.file_name())
}

/// Copy `<save_folder>/<slot_file>` to `<output_path>/save_<index>.gam`.
///
/// An existing destination file is overwritten.
pub fn copy_savegame(
    save_folder: &Path,
    slot_file: &str,
    output_path: &Path,
    index: SaveIndex,
) -> Result<Snapshot> {
    let from = save_folder.join(slot_file);
    if !from.is_file() {
        return Err(CaptureError::SaveMissing { path: from });
    }

    let to = snapshot_path(output_path, index);
    let bytes = fs::copy(&from, &to).map_err(|source| CaptureError::Copy {
        from: from.clone(),
        to: to.clone(),
        source,
    })?;

    tracing::debug!("Copied {} bytes from {:?} to {:?}", bytes, from, to);
    Ok(Snapshot {
        index,
        path: to,
        bytes,
    })
}
