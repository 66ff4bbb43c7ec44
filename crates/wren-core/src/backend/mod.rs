//! Task store backends.
//!
//! Two interchangeable stores implement the same capability set: a
//! filesystem store where the schedule engine decides what is pending,
//! and a Todoist store that delegates scheduling to the service. The
//! backend is chosen once at startup from configuration and passed
//! around as a trait object; nothing switches stores per call.

use async_trait::async_trait;

pub mod files;
pub mod todoist;

pub use files::FileStore;
pub use todoist::{ProjectPicker, TodoistClient, TodoistStore};

use crate::display::{OperationStatus, TaskList};
use crate::error::Result;

/// Outcome of identifying a task by substring.
///
/// Zero matches and ambiguity are ordinary outcomes of a fuzzy lookup,
/// so they are values here rather than errors; callers turn them into
/// user-facing messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Match<T> {
    /// Exactly one task matched.
    One(T),
    /// Nothing matched.
    None,
    /// More than one task matched; the query needs to be narrower.
    Many,
}

impl<T> Match<T> {
    /// Builds a match from candidates, collapsing the count to the
    /// three-way outcome.
    pub fn from_candidates(mut candidates: Vec<T>) -> Self {
        match candidates.len() {
            0 => Self::None,
            1 => Self::One(candidates.remove(0)),
            _ => Self::Many,
        }
    }
}

/// Capability set shared by every task store.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Stores a new task. The first line of `content` becomes the task
    /// name after wildcard substitution and sanitizing; the rest becomes
    /// the body. Returns the stored name.
    async fn create_task(&self, content: &str) -> Result<String>;

    /// Lists pending tasks matching `query`, as display names. One time
    /// snapshot is taken per call, so a listing is internally
    /// consistent.
    async fn list_tasks(&self, query: &str) -> Result<TaskList>;

    /// Fetches the stored content for the task matching `name`. Lookup
    /// misses come back as readable text, not errors.
    async fn task_content(&self, name: &str) -> Result<String>;

    /// Marks the task matching `name` as done. Recurring tasks stay
    /// active; everything else is archived.
    async fn mark_done(&self, name: &str) -> Result<OperationStatus>;
}
