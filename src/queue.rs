// SPDX-License-Identifier: MPL-2.0
//! The conversion queue and its per-file status machine.
//!
//! The queue is the single owner of all user-submitted files. Rows move
//! through `Pending -> Converting -> Completed | Error`; the only way out of
//! a terminal state is removal. Status is a sum type so that a result
//! payload exists exactly when a row is completed and an error message
//! exists exactly when a row failed.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::TransferError;

/// Opaque identifier for a queued file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileId(u64);

impl FileId {
    /// Mints a new process-unique id.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for FileId {
    fn default() -> Self {
        Self::new()
    }
}

/// Converted payload held in memory until the user saves it.
///
/// Cloning shares the underlying bytes; rendering and saving never copy the
/// payload.
#[derive(Clone, PartialEq, Eq)]
pub struct ResultHandle(Arc<Vec<u8>>);

impl ResultHandle {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(Arc::new(bytes))
    }

    pub fn bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for ResultHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The payload can be tens of megabytes; never dump it.
        f.debug_struct("ResultHandle")
            .field("len", &self.0.len())
            .finish()
    }
}

/// Lifecycle state of a queued file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    /// Waiting for the user (or a batch) to start the conversion.
    Pending,
    /// An upload is in flight.
    Converting,
    /// The endpoint returned a converted payload.
    Completed { result: ResultHandle },
    /// The upload settled with a failure.
    Error { message: String },
}

impl FileStatus {
    /// i18n key of the status badge label.
    pub fn badge_key(&self) -> &'static str {
        match self {
            FileStatus::Pending => "status-pending",
            FileStatus::Converting => "status-converting",
            FileStatus::Completed { .. } => "status-completed",
            FileStatus::Error { .. } => "status-error",
        }
    }
}

/// A single user-submitted file tracked through its conversion lifecycle.
///
/// `source_path` is the handle to the raw bytes; they are read from disk
/// when the upload starts, not when the file is enqueued.
#[derive(Debug, Clone)]
pub struct QueuedFile {
    pub id: FileId,
    pub display_name: String,
    pub source_path: PathBuf,
    pub status: FileStatus,
}

impl QueuedFile {
    fn from_path(path: PathBuf) -> Self {
        let display_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self {
            id: FileId::new(),
            display_name,
            source_path: path,
            status: FileStatus::Pending,
        }
    }

    pub fn result(&self) -> Option<&ResultHandle> {
        match &self.status {
            FileStatus::Completed { result } => Some(result),
            _ => None,
        }
    }
}

/// Ordered collection of queued files.
///
/// All mutation happens on the update loop; background tasks report back via
/// messages, so no synchronization is needed here.
#[derive(Debug, Default)]
pub struct Queue {
    files: Vec<QueuedFile>,
}

impl Queue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one `Pending` row per path, in the order given. Every path is
    /// accepted; duplicates produce separate rows.
    pub fn enqueue<I>(&mut self, paths: I) -> Vec<FileId>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut added = Vec::new();
        for path in paths {
            let file = QueuedFile::from_path(path);
            added.push(file.id);
            self.files.push(file);
        }
        added
    }

    /// Removes one row. Removing an id that is not present is a no-op;
    /// removal does not abort an upload that is already in flight.
    pub fn remove(&mut self, id: FileId) -> bool {
        let before = self.files.len();
        self.files.retain(|file| file.id != id);
        self.files.len() < before
    }

    /// Drops every row. In-flight uploads are not aborted; their results are
    /// discarded when they settle.
    pub fn clear(&mut self) {
        self.files.clear();
    }

    pub fn get(&self, id: FileId) -> Option<&QueuedFile> {
        self.files.iter().find(|file| file.id == id)
    }

    /// Moves a `Pending` row to `Converting` and hands back what the upload
    /// needs. Returns `None` for absent rows and rows in any other state, so
    /// double-clicks and stale batch entries cannot restart a conversion.
    pub fn begin_conversion(&mut self, id: FileId) -> Option<(PathBuf, String)> {
        let file = self.files.iter_mut().find(|file| file.id == id)?;
        if file.status != FileStatus::Pending {
            return None;
        }
        file.status = FileStatus::Converting;
        Some((file.source_path.clone(), file.display_name.clone()))
    }

    /// Settles a conversion. A row removed while its upload was in flight is
    /// a no-op (`false`); the caller still owns the notification side
    /// effect.
    pub fn settle(&mut self, id: FileId, outcome: Result<ResultHandle, TransferError>) -> bool {
        let Some(file) = self.files.iter_mut().find(|file| file.id == id) else {
            return false;
        };
        file.status = match outcome {
            Ok(result) => FileStatus::Completed { result },
            Err(err) => FileStatus::Error {
                message: err.message(),
            },
        };
        true
    }

    /// Ids of every `Pending` row, in queue order. This is the snapshot a
    /// convert-all batch works through.
    pub fn pending_ids(&self) -> Vec<FileId> {
        self.files
            .iter()
            .filter(|file| file.status == FileStatus::Pending)
            .map(|file| file.id)
            .collect()
    }

    pub fn has_pending(&self) -> bool {
        self.files
            .iter()
            .any(|file| file.status == FileStatus::Pending)
    }

    /// Completed rows with their payloads, in queue order.
    pub fn completed(&self) -> impl Iterator<Item = (&QueuedFile, &ResultHandle)> {
        self.files.iter().filter_map(|file| match &file.status {
            FileStatus::Completed { result } => Some((file, result)),
            _ => None,
        })
    }

    pub fn completed_count(&self) -> usize {
        self.completed().count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &QueuedFile> {
        self.files.iter()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(result: &[u8]) -> ResultHandle {
        ResultHandle::new(result.to_vec())
    }

    fn enqueue_names(queue: &mut Queue, names: &[&str]) -> Vec<FileId> {
        queue.enqueue(names.iter().map(PathBuf::from))
    }

    #[test]
    fn file_ids_are_unique() {
        assert_ne!(FileId::new(), FileId::new());
    }

    #[test]
    fn enqueue_appends_every_file() {
        let mut queue = Queue::new();
        enqueue_names(&mut queue, &["a.jpg", "b.jpg"]);
        enqueue_names(&mut queue, &["c.jpg"]);
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn enqueue_does_not_deduplicate() {
        let mut queue = Queue::new();
        enqueue_names(&mut queue, &["same.jpg", "same.jpg"]);
        assert_eq!(queue.len(), 2);
        let ids: Vec<_> = queue.iter().map(|file| file.id).collect();
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn enqueued_files_start_pending() {
        let mut queue = Queue::new();
        let ids = enqueue_names(&mut queue, &["a.jpg"]);
        assert_eq!(queue.get(ids[0]).unwrap().status, FileStatus::Pending);
    }

    #[test]
    fn display_name_is_file_name() {
        let mut queue = Queue::new();
        let ids = queue.enqueue([PathBuf::from("/home/user/photos/cat.jpg")]);
        assert_eq!(queue.get(ids[0]).unwrap().display_name, "cat.jpg");
    }

    #[test]
    fn begin_conversion_moves_pending_to_converting() {
        let mut queue = Queue::new();
        let ids = enqueue_names(&mut queue, &["a.jpg"]);
        let (path, name) = queue.begin_conversion(ids[0]).expect("pending row");
        assert_eq!(path, PathBuf::from("a.jpg"));
        assert_eq!(name, "a.jpg");
        assert_eq!(queue.get(ids[0]).unwrap().status, FileStatus::Converting);
    }

    #[test]
    fn begin_conversion_rejects_non_pending_rows() {
        let mut queue = Queue::new();
        let ids = enqueue_names(&mut queue, &["a.jpg"]);
        queue.begin_conversion(ids[0]).unwrap();
        // Already converting
        assert!(queue.begin_conversion(ids[0]).is_none());

        queue.settle(ids[0], Ok(sample(b"out")));
        // Completed rows stay completed
        assert!(queue.begin_conversion(ids[0]).is_none());
    }

    #[test]
    fn begin_conversion_on_absent_id_is_none() {
        let mut queue = Queue::new();
        assert!(queue.begin_conversion(FileId::new()).is_none());
    }

    #[test]
    fn settle_success_stores_result() {
        let mut queue = Queue::new();
        let ids = enqueue_names(&mut queue, &["a.jpg"]);
        queue.begin_conversion(ids[0]).unwrap();
        assert!(queue.settle(ids[0], Ok(sample(b"converted"))));

        let file = queue.get(ids[0]).unwrap();
        let result = file.result().expect("completed row carries a result");
        assert_eq!(result.bytes(), b"converted");
        assert!(!result.is_empty());
    }

    #[test]
    fn settle_failure_stores_message() {
        let mut queue = Queue::new();
        let ids = enqueue_names(&mut queue, &["a.jpg"]);
        queue.begin_conversion(ids[0]).unwrap();
        queue.settle(
            ids[0],
            Err(TransferError::Status {
                code: 500,
                reason: "Internal Server Error".into(),
            }),
        );

        match &queue.get(ids[0]).unwrap().status {
            FileStatus::Error { message } => {
                assert!(!message.is_empty());
                assert!(message.contains("500"));
            }
            other => panic!("expected Error status, got {:?}", other),
        }
    }

    #[test]
    fn settle_never_leaves_converting() {
        let mut queue = Queue::new();
        let ids = enqueue_names(&mut queue, &["a.jpg", "b.jpg"]);
        for id in &ids {
            queue.begin_conversion(*id).unwrap();
        }
        queue.settle(ids[0], Ok(sample(b"x")));
        queue.settle(ids[1], Err(TransferError::Request("reset".into())));

        for file in queue.iter() {
            assert_ne!(file.status, FileStatus::Converting);
        }
    }

    #[test]
    fn settle_after_removal_is_noop() {
        let mut queue = Queue::new();
        let ids = enqueue_names(&mut queue, &["a.jpg"]);
        queue.begin_conversion(ids[0]).unwrap();
        queue.remove(ids[0]);

        assert!(!queue.settle(ids[0], Ok(sample(b"late"))));
        assert!(queue.is_empty());
    }

    #[test]
    fn remove_decrements_length_by_one() {
        let mut queue = Queue::new();
        let ids = enqueue_names(&mut queue, &["a.jpg", "b.jpg"]);
        assert!(queue.remove(ids[0]));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.iter().next().unwrap().display_name, "b.jpg");
    }

    #[test]
    fn remove_absent_id_is_noop() {
        let mut queue = Queue::new();
        enqueue_names(&mut queue, &["a.jpg"]);
        assert!(!queue.remove(FileId::new()));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn clear_empties_the_queue() {
        let mut queue = Queue::new();
        enqueue_names(&mut queue, &["a.jpg", "b.jpg", "c.jpg"]);
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.completed_count(), 0);
    }

    #[test]
    fn pending_ids_preserve_queue_order() {
        let mut queue = Queue::new();
        let ids = enqueue_names(&mut queue, &["a.jpg", "b.jpg", "c.jpg"]);
        // Settle the middle one so it is no longer pending
        queue.begin_conversion(ids[1]).unwrap();
        queue.settle(ids[1], Ok(sample(b"x")));

        assert_eq!(queue.pending_ids(), vec![ids[0], ids[2]]);
    }

    #[test]
    fn mixed_outcome_scenario_matches_expected_final_state() {
        // enqueue ["a.jpg", "b.jpg"], convert both, success then failure
        let mut queue = Queue::new();
        let ids = enqueue_names(&mut queue, &["a.jpg", "b.jpg"]);

        queue.begin_conversion(ids[0]).unwrap();
        queue.settle(ids[0], Ok(sample(b"png-bytes")));
        queue.begin_conversion(ids[1]).unwrap();
        queue.settle(
            ids[1],
            Err(TransferError::Status {
                code: 422,
                reason: "Unprocessable Entity".into(),
            }),
        );

        let statuses: Vec<_> = queue.iter().map(|file| &file.status).collect();
        assert!(matches!(statuses[0], FileStatus::Completed { .. }));
        assert!(matches!(statuses[1], FileStatus::Error { .. }));
    }

    #[test]
    fn completed_iterates_only_completed_rows() {
        let mut queue = Queue::new();
        let ids = enqueue_names(&mut queue, &["a.jpg", "b.jpg", "c.jpg"]);
        queue.begin_conversion(ids[0]).unwrap();
        queue.settle(ids[0], Ok(sample(b"one")));
        queue.begin_conversion(ids[2]).unwrap();
        queue.settle(ids[2], Ok(sample(b"two")));

        let names: Vec<_> = queue
            .completed()
            .map(|(file, _)| file.display_name.as_str())
            .collect();
        assert_eq!(names, vec!["a.jpg", "c.jpg"]);
        assert_eq!(queue.completed_count(), 2);
    }

    #[test]
    fn result_handle_clone_shares_bytes() {
        let handle = sample(b"payload");
        let clone = handle.clone();
        assert_eq!(handle.bytes().as_ptr(), clone.bytes().as_ptr());
        assert_eq!(clone.len(), 7);
    }

    #[test]
    fn result_handle_debug_hides_payload() {
        let handle = sample(&[0u8; 1024]);
        let debug = format!("{:?}", handle);
        assert!(debug.contains("len"));
        assert!(debug.len() < 100);
    }

    #[test]
    fn badge_keys_cover_all_statuses() {
        assert_eq!(FileStatus::Pending.badge_key(), "status-pending");
        assert_eq!(FileStatus::Converting.badge_key(), "status-converting");
        assert_eq!(
            FileStatus::Completed {
                result: sample(b"x")
            }
            .badge_key(),
            "status-completed"
        );
        assert_eq!(
            FileStatus::Error {
                message: "m".into()
            }
            .badge_key(),
            "status-error"
        );
    }
}
