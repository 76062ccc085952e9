// SPDX-License-Identifier: MPL-2.0
//! Update logic and message handlers for the application.
//!
//! All queue mutation happens here, on the update loop. Background work
//! (dialogs, uploads, file writes) is dispatched as `Task`s whose results
//! come back as messages. Convert-all is strictly sequential: the next
//! upload is only dispatched from the completion handler of the previous
//! one.

use super::{App, Message};
use crate::catalog::{self, ConversionProfile};
use crate::error::TransferError;
use crate::queue::{FileId, ResultHandle};
use crate::ui::notifications::Notification;
use iced::Task;
use std::path::PathBuf;

/// Routes a message to its handler.
pub fn update(app: &mut App, message: Message) -> Task<Message> {
    match message {
        Message::ProfileSelected(id) => {
            if let Some(profile) = catalog::find(id) {
                app.active_profile = profile;
            }
            Task::none()
        }
        Message::OpenFileDialog => {
            handle_open_file_dialog(app.active_profile, app.persisted.last_open_directory.clone())
        }
        Message::FilesPicked(paths) => handle_files_picked(app, paths),
        Message::FilesHovered => {
            app.drag_over = true;
            Task::none()
        }
        Message::FilesHoverLeft => {
            app.drag_over = false;
            Task::none()
        }
        Message::FileDropped(path) => {
            // Dropped files skip the picker filter; the queue accepts
            // anything.
            app.drag_over = false;
            app.queue.enqueue([path]);
            Task::none()
        }
        Message::ConvertFile(id) => start_conversion(app, id).unwrap_or_else(Task::none),
        Message::ConvertAll => handle_convert_all(app),
        Message::ConversionSettled { id, name, result } => {
            handle_conversion_settled(app, id, name, result)
        }
        Message::RemoveFile(id) => {
            // Does not abort an upload already in flight; a late settle on a
            // removed row is a no-op.
            app.queue.remove(id);
            Task::none()
        }
        Message::ClearQueue => {
            app.queue.clear();
            app.batch.clear();
            Task::none()
        }
        Message::DownloadFile(id) => handle_download_file(app, id),
        Message::DownloadDialogResult { id, path } => {
            handle_download_dialog_result(app, id, path)
        }
        Message::DownloadWritten { name, result } => handle_download_written(app, name, result),
        Message::DownloadAll => handle_download_all(app),
        Message::DownloadAllDialogResult(directory) => {
            handle_download_all_dialog_result(app, directory)
        }
        Message::DownloadAllWritten { saved, failed } => {
            handle_download_all_written(app, saved, failed)
        }
        Message::Notification(notification_message) => {
            app.notifications.handle_message(&notification_message);
            Task::none()
        }
        Message::Tick(_instant) => {
            app.notifications.tick();
            Task::none()
        }
    }
}

/// Opens the native multi-file picker, filtered to the active profile's
/// source format and seeded with the last-used directory.
fn handle_open_file_dialog(
    profile: &'static ConversionProfile,
    last_open_directory: Option<PathBuf>,
) -> Task<Message> {
    Task::perform(
        async move {
            let mut dialog = rfd::AsyncFileDialog::new();
            if let Some((filter_name, extensions)) = profile.source_filter() {
                dialog = dialog.add_filter(filter_name, extensions);
            }
            if let Some(dir) = last_open_directory {
                if dir.exists() {
                    dialog = dialog.set_directory(&dir);
                }
            }
            dialog.pick_files().await.map(|handles| {
                handles
                    .into_iter()
                    .map(|handle| handle.path().to_path_buf())
                    .collect()
            })
        },
        Message::FilesPicked,
    )
}

fn handle_files_picked(app: &mut App, paths: Option<Vec<PathBuf>>) -> Task<Message> {
    let Some(paths) = paths else {
        return Task::none();
    };

    if let Some(first) = paths.first() {
        app.persisted.set_last_open_directory_from_file(first);
        if let Some(key) = app.persisted.save() {
            app.notifications.push(Notification::warning(key));
        }
    }

    app.queue.enqueue(paths);
    Task::none()
}

/// Moves one pending row into flight and dispatches its upload.
///
/// Returns `None` when the row is absent or not pending (double-click,
/// stale batch entry), so callers can skip it without dispatching anything.
fn start_conversion(app: &mut App, id: FileId) -> Option<Task<Message>> {
    let (path, name) = app.queue.begin_conversion(id)?;
    let client = app.transfer.clone();
    let profile = *app.active_profile;

    Some(Task::perform(
        async move {
            let result = client.convert(&path, &name, &profile).await;
            (name, result)
        },
        move |(name, result)| Message::ConversionSettled { id, name, result },
    ))
}

/// Snapshots every pending row and works through them one at a time.
///
/// Rows that stop being pending before their turn (converted individually,
/// removed) are skipped; a failed upload never halts the rest of the batch.
fn handle_convert_all(app: &mut App) -> Task<Message> {
    app.batch.extend(app.queue.pending_ids());
    if app.batch_in_flight.is_some() {
        // The running batch chain will pick up the new entries.
        return Task::none();
    }
    start_next_in_batch(app)
}

fn start_next_in_batch(app: &mut App) -> Task<Message> {
    while let Some(id) = app.batch.pop_front() {
        if let Some(task) = start_conversion(app, id) {
            app.batch_in_flight = Some(id);
            return task;
        }
    }
    app.batch_in_flight = None;
    Task::none()
}

/// Records an upload result and emits the completion toast.
///
/// The toast always fires; the queue update is a no-op when the row was
/// removed while the upload was in flight. If the settled row was the
/// in-flight batch entry, the next batch upload starts here.
fn handle_conversion_settled(
    app: &mut App,
    id: FileId,
    name: String,
    result: Result<ResultHandle, TransferError>,
) -> Task<Message> {
    let notification = match &result {
        Ok(_) => Notification::success("notification-convert-success").with_arg("name", &name),
        Err(err) => Notification::error("notification-convert-error")
            .with_arg("name", &name)
            .with_arg("reason", err.message()),
    };
    app.notifications.push(notification);
    app.queue.settle(id, result);

    if app.batch_in_flight == Some(id) {
        app.batch_in_flight = None;
        return start_next_in_batch(app);
    }
    Task::none()
}

/// Opens a save dialog pre-filled with the output name of a completed row.
fn handle_download_file(app: &mut App, id: FileId) -> Task<Message> {
    let Some(file) = app.queue.get(id) else {
        return Task::none();
    };
    if file.result().is_none() {
        return Task::none();
    }

    let file_name = app.active_profile.output_name(&file.display_name);
    let last_save_directory = app.persisted.last_save_directory.clone();

    Task::perform(
        async move {
            let mut dialog = rfd::AsyncFileDialog::new().set_file_name(&file_name);
            if let Some(dir) = last_save_directory {
                if dir.exists() {
                    dialog = dialog.set_directory(&dir);
                }
            }
            dialog.save_file().await.map(|handle| handle.path().to_path_buf())
        },
        move |path| Message::DownloadDialogResult { id, path },
    )
}

fn handle_download_dialog_result(
    app: &mut App,
    id: FileId,
    path: Option<PathBuf>,
) -> Task<Message> {
    let Some(path) = path else {
        return Task::none();
    };
    let Some(result) = app.queue.get(id).and_then(|file| file.result()).cloned() else {
        return Task::none();
    };

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned());

    Task::perform(
        async move {
            let outcome = tokio::fs::write(&path, result.bytes())
                .await
                .map(|()| path)
                .map_err(|e| e.to_string());
            (name, outcome)
        },
        |(name, result)| Message::DownloadWritten { name, result },
    )
}

fn handle_download_written(
    app: &mut App,
    name: String,
    result: Result<PathBuf, String>,
) -> Task<Message> {
    match result {
        Ok(path) => {
            app.notifications
                .push(Notification::success("notification-save-success").with_arg("name", &name));
            app.persisted.set_last_save_directory_from_file(&path);
            if let Some(key) = app.persisted.save() {
                app.notifications.push(Notification::warning(key));
            }
        }
        Err(reason) => {
            app.notifications.push(
                Notification::error("notification-save-error")
                    .with_arg("name", &name)
                    .with_arg("reason", reason),
            );
        }
    }
    Task::none()
}

/// Opens a folder picker for saving every completed row.
///
/// With zero completed rows this performs zero actions: no dialog, no task.
fn handle_download_all(app: &mut App) -> Task<Message> {
    if app.queue.completed_count() == 0 {
        return Task::none();
    }

    let last_save_directory = app.persisted.last_save_directory.clone();
    Task::perform(
        async move {
            let mut dialog = rfd::AsyncFileDialog::new();
            if let Some(dir) = last_save_directory {
                if dir.exists() {
                    dialog = dialog.set_directory(&dir);
                }
            }
            dialog.pick_folder().await.map(|handle| handle.path().to_path_buf())
        },
        Message::DownloadAllDialogResult,
    )
}

fn handle_download_all_dialog_result(
    app: &mut App,
    directory: Option<PathBuf>,
) -> Task<Message> {
    let Some(directory) = directory else {
        return Task::none();
    };

    // Snapshot the payloads now; rows removed while writes run keep their
    // already-captured output.
    let outputs: Vec<(String, ResultHandle)> = app
        .queue
        .completed()
        .map(|(file, result)| {
            (
                app.active_profile.output_name(&file.display_name),
                result.clone(),
            )
        })
        .collect();

    if outputs.is_empty() {
        return Task::none();
    }

    app.persisted.last_save_directory = Some(directory.clone());
    if let Some(key) = app.persisted.save() {
        app.notifications.push(Notification::warning(key));
    }

    Task::perform(
        async move {
            let mut saved = 0;
            let mut failed = 0;
            for (name, result) in outputs {
                match tokio::fs::write(directory.join(&name), result.bytes()).await {
                    Ok(()) => saved += 1,
                    Err(_) => failed += 1,
                }
            }
            (saved, failed)
        },
        |(saved, failed)| Message::DownloadAllWritten { saved, failed },
    )
}

fn handle_download_all_written(app: &mut App, saved: usize, failed: usize) -> Task<Message> {
    if failed == 0 {
        app.notifications.push(
            Notification::success("notification-save-all-success")
                .with_arg("count", saved.to_string()),
        );
    } else {
        app.notifications.push(
            Notification::warning("notification-save-all-partial")
                .with_arg("saved", saved.to_string())
                .with_arg("failed", failed.to_string()),
        );
    }
    Task::none()
}
