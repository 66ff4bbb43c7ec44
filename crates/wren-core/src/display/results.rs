//! Operation result types for task creation.

use std::fmt;

/// Wrapper type for displaying the outcome of creating a task.
///
/// Holds the stored (encoded) task name, which can differ from the
/// submitted first line after wildcard substitution and filename
/// sanitizing. Display shows the stored form so the user learns the
/// exact name to address the task by.
pub struct CreatedTask {
    pub name: String,
}

impl CreatedTask {
    /// Wrap a stored task name.
    pub fn new(name: String) -> Self {
        Self { name }
    }
}

impl fmt::Display for CreatedTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created task \"{}\"", self.name)
    }
}
