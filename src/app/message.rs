// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::error::TransferError;
use crate::queue::{FileId, ResultHandle};
use crate::ui::notifications;
use std::path::PathBuf;
use std::time::Instant;

/// Top-level messages consumed by `App::update`. User intents come from the
/// view; the remaining variants report results of background tasks (dialogs,
/// uploads, saves).
#[derive(Debug, Clone)]
pub enum Message {
    /// A profile button was pressed; the id always comes from the catalog.
    ProfileSelected(&'static str),
    /// Open the native multi-file picker.
    OpenFileDialog,
    /// Result from the file picker (`None` = cancelled).
    FilesPicked(Option<Vec<PathBuf>>),
    /// Files are hovering over the window.
    FilesHovered,
    /// Hovering files left the window without being dropped.
    FilesHoverLeft,
    /// A file was dropped on the window.
    FileDropped(PathBuf),
    /// Convert a single queued file.
    ConvertFile(FileId),
    /// Convert every pending file, one at a time.
    ConvertAll,
    /// An upload settled. `name` is captured at dispatch time so the toast
    /// fires even if the row was removed mid-flight.
    ConversionSettled {
        id: FileId,
        name: String,
        result: Result<ResultHandle, TransferError>,
    },
    /// Remove one queued file.
    RemoveFile(FileId),
    /// Remove every queued file.
    ClearQueue,
    /// Save one converted file via a save dialog.
    DownloadFile(FileId),
    /// Result from the save dialog (`None` = cancelled).
    DownloadDialogResult { id: FileId, path: Option<PathBuf> },
    /// A converted file finished writing to disk.
    DownloadWritten {
        name: String,
        result: Result<PathBuf, String>,
    },
    /// Save every converted file into a directory of the user's choice.
    DownloadAll,
    /// Result from the folder picker (`None` = cancelled).
    DownloadAllDialogResult(Option<PathBuf>),
    /// All pending writes of a save-all finished.
    DownloadAllWritten { saved: usize, failed: usize },
    /// Toast interaction (dismiss).
    Notification(notifications::Message),
    /// Periodic tick for notification auto-dismiss.
    Tick(Instant),
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Optional conversion service base URL, overriding the config file.
    pub endpoint: Option<String>,
    /// Optional data directory override (for state files).
    /// Takes precedence over `ICED_CONVERT_DATA_DIR`.
    pub data_dir: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `ICED_CONVERT_CONFIG_DIR`.
    pub config_dir: Option<String>,
    /// Files to enqueue on startup.
    pub files: Vec<String>,
}
