//! Core library for the Wren personal task assistant.
//!
//! Tasks are strings first: a task's name doubles as its filename and
//! optionally encodes its schedule as a prefix, either a date token
//! (`2024-01-10 Renew passport`) or a five-field cron expression
//! (`0 9 ＊ ＊ ＊ Water plants`). The [`schedule`] module decides from
//! that encoding, a completion record, and an explicit `now` snapshot
//! whether a task is currently due.
//!
//! Around the engine sit two interchangeable [`backend`] implementations
//! (flat files on disk, or Todoist over its REST API) selected once at
//! startup, and a [`summary`] client that asks a language model to talk
//! through the pending list.
//!
//! # Quick Start
//!
//! ```rust
//! use jiff::civil::date;
//! use wren_core::schedule;
//!
//! let name = "0 9 ＊ ＊ ＊ Water plants";
//! let now = date(2024, 1, 5).at(10, 0, 0, 0);
//!
//! // Never completed, so the first occurrence is due immediately.
//! assert!(schedule::is_due(name, now, || None));
//! assert_eq!(schedule::display_name(name), "Water plants");
//! ```

pub mod backend;
pub mod config;
pub mod display;
pub mod error;
pub mod names;
pub mod schedule;
pub mod summary;

// Re-export commonly used types
pub use backend::{Backend, FileStore, Match, ProjectPicker, TodoistClient, TodoistStore};
pub use config::{default_messages_path, BackendKind, Config};
pub use display::{CreatedTask, OperationStatus, TaskList};
pub use error::{Result, WrenError};
pub use schedule::Schedule;
pub use summary::{ChatMessage, OpenAiClient, Summarizer, Transcript};
