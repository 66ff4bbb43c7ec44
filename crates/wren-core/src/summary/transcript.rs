//! Persistent conversation log for summary requests.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{IoResultExt, Result};

/// One role/content entry in a chat conversation. Serializes to the
/// wire shape chat-completion APIs expect, so the stored log replays
/// directly as request context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Append-only record of prior summary request/response pairs.
///
/// The whole log is replayed as conversation context on every summary
/// request, which is what lets the model notice long-running and
/// recently completed tasks. Growth is unbounded; there is no pruning.
#[derive(Debug, Clone)]
pub struct Transcript {
    path: PathBuf,
}

impl Transcript {
    /// Opens a transcript at the given path. The file is created on
    /// first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Loads all recorded messages. A missing file is an empty
    /// transcript, not an error.
    pub fn load(&self) -> Result<Vec<ChatMessage>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = std::fs::read_to_string(&self.path).fs_context(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Writes the full message list back, pretty-printed so the log
    /// stays hand-inspectable.
    pub fn save(&self, messages: &[ChatMessage]) -> Result<()> {
        let raw = serde_json::to_string_pretty(messages)?;
        std::fs::write(&self.path, raw).fs_context(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_missing_file_is_empty_transcript() {
        let tmp = TempDir::new().unwrap();
        let transcript = Transcript::new(tmp.path().join("messages.json"));
        assert!(transcript.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let tmp = TempDir::new().unwrap();
        let transcript = Transcript::new(tmp.path().join("messages.json"));
        let messages = vec![
            ChatMessage::user("2024-01-10T09:00:00\n- Water plants"),
            ChatMessage::assistant("Time to water the plants."),
        ];
        transcript.save(&messages).unwrap();
        assert_eq!(transcript.load().unwrap(), messages);
    }

    #[test]
    fn test_saved_log_is_pretty_printed() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("messages.json");
        let transcript = Transcript::new(&path);
        transcript.save(&[ChatMessage::user("hi")]).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("  \"role\": \"user\""));
    }

    #[test]
    fn test_corrupt_log_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("messages.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(Transcript::new(&path).load().is_err());
    }
}
