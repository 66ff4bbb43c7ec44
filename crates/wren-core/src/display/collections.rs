//! Collection wrapper types for displaying groups of tasks.

use std::{fmt, ops::Index};

/// Newtype wrapper for displaying a listing of pending task names.
///
/// Names arrive already stripped of their schedule prefixes. Display
/// renders one markdown bullet per task and handles the empty listing
/// gracefully.
///
/// # Examples
///
/// ```rust
/// use wren_core::display::TaskList;
///
/// let tasks = TaskList(vec!["Water plants".to_string()]);
/// let output = format!("{}", tasks);
/// assert!(output.contains("- Water plants"));
///
/// let empty = TaskList(vec![]);
/// assert_eq!(format!("{}", empty), "No tasks pending.\n");
/// ```
pub struct TaskList(pub Vec<String>);

impl TaskList {
    /// Check if the listing is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of tasks in the listing.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get a reference to the task name at the given index.
    pub fn get(&self, index: usize) -> Option<&String> {
        self.0.get(index)
    }

    /// Get an iterator over the task names.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }
}

impl Index<usize> for TaskList {
    type Output = String;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for TaskList {
    type Item = String;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for TaskList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No tasks pending.")
        } else {
            for name in &self.0 {
                writeln!(f, "- {name}")?;
            }
            Ok(())
        }
    }
}
