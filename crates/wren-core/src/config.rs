//! Configuration loading for the task assistant.
//!
//! Settings live in `wren.json` under the XDG config directory. A missing
//! file yields the defaults; unknown keys are ignored so older configs
//! keep working.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{IoResultExt, Result, WrenError};

/// Which task store backs the assistant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// One file per task under the notes directory.
    Files,
    /// Tasks live in Todoist, reached over its REST API.
    Todoist,
}

/// User configuration, deserialized from `wren.json`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Selected task store.
    pub backend: BackendKind,
    /// Directory holding active task files. `~` expands to `$HOME`.
    pub notes_dir: String,
    /// Directory holding completion records. Relative paths resolve
    /// under `notes_dir`.
    pub done_dir: String,
    /// Todoist API token.
    pub todoist_token: String,
    /// OpenAI API token for summaries.
    pub openai_token: String,
    /// Chat model used for summaries.
    pub openai_model: String,
    /// Free-text context about the user, appended to the summary prompt.
    pub about_user: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendKind::Files,
            notes_dir: "~/Notes".to_string(),
            done_dir: "done".to_string(),
            todoist_token: String::new(),
            openai_token: String::new(),
            openai_model: "gpt-4".to_string(),
            about_user: "The user chose to specify nothing.".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from the given path, or from the default XDG
    /// location when none is given. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns `WrenError::FileSystem` if an existing file cannot be read
    /// and `WrenError::Serialization` if it is not valid JSON.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => default_config_path(),
        };
        match path {
            Some(p) if p.exists() => {
                let raw = std::fs::read_to_string(&p).fs_context(&p)?;
                Ok(serde_json::from_str(&raw)?)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Directory holding active task files, with `~` expanded.
    pub fn notes_path(&self) -> PathBuf {
        expand_tilde(&self.notes_dir)
    }

    /// Directory holding completion records. Relative values resolve
    /// under the notes directory.
    pub fn done_path(&self) -> PathBuf {
        let done = expand_tilde(&self.done_dir);
        if done.is_absolute() {
            done
        } else {
            self.notes_path().join(done)
        }
    }
}

/// Returns the config file location following XDG Base Directory
/// specification, or None when no config exists yet.
fn default_config_path() -> Option<PathBuf> {
    xdg::BaseDirectories::with_prefix("wren").find_config_file("wren.json")
}

/// Returns the path for the summary transcript, creating parent
/// directories as needed.
pub fn default_messages_path() -> Result<PathBuf> {
    xdg::BaseDirectories::with_prefix("wren")
        .place_data_file("messages.json")
        .map_err(|e| WrenError::XdgDirectory(e.to_string()))
}

/// Expands a leading `~` or `~/` against `$HOME`.
fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home);
        }
    } else if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.backend, BackendKind::Files);
        assert_eq!(config.notes_dir, "~/Notes");
        assert_eq!(config.done_dir, "done");
        assert_eq!(config.openai_model, "gpt-4");
        assert!(config.todoist_token.is_empty());
        assert!(config.openai_token.is_empty());
        assert_eq!(config.about_user, "The user chose to specify nothing.");
    }

    #[test]
    fn test_parse_full_config() {
        let raw = r#"{
            "backend": "todoist",
            "notes_dir": "/tmp/notes",
            "done_dir": "/tmp/notes/archive",
            "todoist_token": "tok-1",
            "openai_token": "tok-2",
            "openai_model": "gpt-4o",
            "about_user": "Keeps bees."
        }"#;
        let config: Config = serde_json::from_str(raw).unwrap();
        assert_eq!(config.backend, BackendKind::Todoist);
        assert_eq!(config.notes_dir, "/tmp/notes");
        assert_eq!(config.openai_model, "gpt-4o");
        assert_eq!(config.about_user, "Keeps bees.");
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = serde_json::from_str(r#"{"notes_dir": "/tasks"}"#).unwrap();
        assert_eq!(config.notes_dir, "/tasks");
        assert_eq!(config.backend, BackendKind::Files);
        assert_eq!(config.done_dir, "done");
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let config: Config =
            serde_json::from_str(r#"{"telegram_token": "x", "notes_dir": "/n"}"#).unwrap();
        assert_eq!(config.notes_dir, "/n");
    }

    #[test]
    fn test_done_path_relative_resolves_under_notes() {
        let config = Config {
            notes_dir: "/srv/notes".to_string(),
            done_dir: "done".to_string(),
            ..Config::default()
        };
        assert_eq!(config.done_path(), PathBuf::from("/srv/notes/done"));
    }

    #[test]
    fn test_done_path_absolute_kept() {
        let config = Config {
            notes_dir: "/srv/notes".to_string(),
            done_dir: "/var/archive".to_string(),
            ..Config::default()
        };
        assert_eq!(config.done_path(), PathBuf::from("/var/archive"));
    }

    #[test]
    fn test_expand_tilde() {
        std::env::set_var("HOME", "/home/tester");
        assert_eq!(expand_tilde("~/Notes"), PathBuf::from("/home/tester/Notes"));
        assert_eq!(expand_tilde("~"), PathBuf::from("/home/tester"));
        assert_eq!(expand_tilde("/abs/path"), PathBuf::from("/abs/path"));
        assert_eq!(expand_tilde("relative"), PathBuf::from("relative"));
    }

    #[test]
    fn test_load_missing_file_yields_defaults() {
        let config = Config::load(Some(Path::new("/nonexistent/wren.json"))).unwrap();
        assert_eq!(config.notes_dir, "~/Notes");
    }
}
