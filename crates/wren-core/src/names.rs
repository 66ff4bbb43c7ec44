//! Task naming rules.
//!
//! A task's name doubles as its filename, so the first line of new task
//! content is rewritten into a filename-safe form. Cron wildcards are the
//! tricky part: `*` is not portable in filenames, so it is stored as the
//! full-width `＊` and mapped back when the schedule is read.

use crate::error::{Result, WrenError};

/// Full-width substitute stored in filenames in place of `*`.
pub const WILDCARD_SUBSTITUTE: char = '＊';

/// Characters never allowed in a task filename.
const FORBIDDEN: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Derives the task name from the first line of new task content.
///
/// Every `*` becomes [`WILDCARD_SUBSTITUTE`] before sanitizing, so cron
/// prefixes survive the trip through the filesystem.
///
/// # Errors
///
/// Returns `WrenError::InvalidInput` when nothing filename-safe remains.
pub fn task_name_from_content(content: &str) -> Result<String> {
    let first_line = content.lines().next().unwrap_or("");
    let substituted: String = first_line
        .chars()
        .map(|c| if c == '*' { WILDCARD_SUBSTITUTE } else { c })
        .collect();
    let name = sanitize_file_name(&substituted);
    if name.is_empty() {
        return Err(WrenError::invalid_input("content")
            .with_reason("first line contains no usable characters for a task name"));
    }
    Ok(name)
}

/// Everything after the first line of new task content.
pub fn task_body(content: &str) -> &str {
    match content.split_once('\n') {
        Some((_, rest)) => rest,
        None => "",
    }
}

/// Strips characters that are unsafe in filenames across platforms,
/// then trims surrounding whitespace and trailing dots.
fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| !FORBIDDEN.contains(c) && !c.is_control())
        .collect();
    cleaned.trim().trim_end_matches('.').trim_end().to_string()
}
