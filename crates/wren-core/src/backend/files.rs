//! Filesystem task store.
//!
//! One file per task under the notes directory; the filename is the
//! encoded task name and the file body is free-text description. A
//! parallel done directory holds completed tasks under the same name,
//! and the modification time of a done file is the completion record
//! the schedule engine reads.

use std::fs::Metadata;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use async_trait::async_trait;
use jiff::civil::DateTime;
use jiff::tz::TimeZone;
use jiff::{Timestamp, Zoned};
use tokio::task;

use crate::backend::{Backend, Match};
use crate::display::{OperationStatus, TaskList};
use crate::error::{IoResultExt, Result, WrenError};
use crate::{names, schedule};

/// Filesystem-backed task store.
#[derive(Debug, Clone)]
pub struct FileStore {
    notes_dir: PathBuf,
    done_dir: PathBuf,
}

impl FileStore {
    /// Opens a store over the given directories, creating them when
    /// missing.
    ///
    /// # Errors
    ///
    /// Returns `WrenError::FileSystem` if a directory cannot be created.
    pub fn new(notes_dir: impl Into<PathBuf>, done_dir: impl Into<PathBuf>) -> Result<Self> {
        let notes_dir = notes_dir.into();
        let done_dir = done_dir.into();
        std::fs::create_dir_all(&notes_dir).fs_context(&notes_dir)?;
        std::fs::create_dir_all(&done_dir).fs_context(&done_dir)?;
        Ok(Self {
            notes_dir,
            done_dir,
        })
    }

    fn create_sync(&self, content: &str) -> Result<String> {
        let name = names::task_name_from_content(content)?;
        let body = names::task_body(content);
        let path = self.notes_dir.join(&name);
        std::fs::write(&path, body).fs_context(&path)?;
        Ok(name)
    }

    /// Lists due tasks at the given reference time, newest first.
    /// The query filters raw filenames and is case-sensitive, matching
    /// how stored names have always been searched.
    fn list_sync(&self, query: &str, now: DateTime) -> Result<Vec<String>> {
        let mut due: Vec<(String, SystemTime)> = Vec::new();
        for entry in std::fs::read_dir(&self.notes_dir).fs_context(&self.notes_dir)? {
            let entry = entry.fs_context(&self.notes_dir)?;
            let meta = entry.metadata().fs_context(entry.path())?;
            if !meta.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') || !name.contains(query) {
                continue;
            }
            if !schedule::is_due(&name, now, || self.done_mtime(&name)) {
                continue;
            }
            due.push((name, sort_stamp(&meta)));
        }
        due.sort_by(|a, b| b.1.cmp(&a.1));
        Ok(due
            .into_iter()
            .map(|(name, _)| schedule::display_name(&name))
            .collect())
    }

    /// Case-insensitive substring lookup over every regular file in the
    /// notes directory.
    fn find_sync(&self, name: &str) -> Result<Match<String>> {
        let needle = name.to_lowercase();
        let mut matching = Vec::new();
        for entry in std::fs::read_dir(&self.notes_dir).fs_context(&self.notes_dir)? {
            let entry = entry.fs_context(&self.notes_dir)?;
            let meta = entry.metadata().fs_context(entry.path())?;
            if !meta.is_file() {
                continue;
            }
            let file_name = entry.file_name().to_string_lossy().into_owned();
            if file_name.to_lowercase().contains(&needle) {
                matching.push(file_name);
            }
        }
        Ok(Match::from_candidates(matching))
    }

    fn content_sync(&self, name: &str) -> Result<String> {
        match self.find_sync(name)? {
            Match::One(file) => {
                let path = self.notes_dir.join(&file);
                let body = std::fs::read_to_string(&path).fs_context(&path)?;
                Ok(format!("{file}\n\n{body}"))
            }
            Match::None => Ok(format!("Error: No matching file for '{name}' found.")),
            Match::Many => Ok("Error: Multiple matching files found.".to_string()),
        }
    }

    fn mark_done_sync(&self, name: &str) -> Result<OperationStatus> {
        match self.find_sync(name)? {
            Match::One(file) => {
                let from = self.notes_dir.join(&file);
                let to = self.done_dir.join(&file);
                if schedule::is_cron(&file) {
                    // Recurring tasks stay active; the copy's mtime
                    // becomes the new completion record.
                    std::fs::copy(&from, &to).fs_context(&to)?;
                } else {
                    move_file(&from, &to)?;
                }
                Ok(OperationStatus::success(format!("marked \"{file}\" as done")))
            }
            Match::None => Ok(OperationStatus::failure(format!(
                "Error: No matching file for '{name}' found."
            ))),
            Match::Many => Ok(OperationStatus::failure(
                "Error: Multiple matching files found.".to_string(),
            )),
        }
    }

    /// Completion record for a task: the local modification time of the
    /// same-named file in the done directory, if any.
    fn done_mtime(&self, name: &str) -> Option<DateTime> {
        let meta = std::fs::metadata(self.done_dir.join(name)).ok()?;
        let modified = meta.modified().ok()?;
        local_datetime(modified)
    }
}

#[async_trait]
impl Backend for FileStore {
    async fn create_task(&self, content: &str) -> Result<String> {
        let store = self.clone();
        let content = content.to_string();
        task::spawn_blocking(move || store.create_sync(&content))
            .await
            .map_err(join_error)?
    }

    async fn list_tasks(&self, query: &str) -> Result<TaskList> {
        let store = self.clone();
        let query = query.to_string();
        let now = Zoned::now().datetime();
        let names = task::spawn_blocking(move || store.list_sync(&query, now))
            .await
            .map_err(join_error)??;
        Ok(TaskList(names))
    }

    async fn task_content(&self, name: &str) -> Result<String> {
        let store = self.clone();
        let name = name.to_string();
        task::spawn_blocking(move || store.content_sync(&name))
            .await
            .map_err(join_error)?
    }

    async fn mark_done(&self, name: &str) -> Result<OperationStatus> {
        let store = self.clone();
        let name = name.to_string();
        task::spawn_blocking(move || store.mark_done_sync(&name))
            .await
            .map_err(join_error)?
    }
}

fn join_error(e: task::JoinError) -> WrenError {
    WrenError::configuration(format!("Task join error: {e}"))
}

/// Listing order key: file creation time where the platform records it,
/// modification time otherwise.
fn sort_stamp(meta: &Metadata) -> SystemTime {
    meta.created()
        .or_else(|_| meta.modified())
        .unwrap_or(SystemTime::UNIX_EPOCH)
}

fn local_datetime(t: SystemTime) -> Option<DateTime> {
    let ts = Timestamp::try_from(t).ok()?;
    Some(ts.to_zoned(TimeZone::system()).datetime())
}

fn move_file(from: &Path, to: &Path) -> Result<()> {
    if std::fs::rename(from, to).is_ok() {
        return Ok(());
    }
    // Cross-device moves need the copy-then-remove dance.
    std::fs::copy(from, to).fs_context(to)?;
    std::fs::remove_file(from).fs_context(from)
}
