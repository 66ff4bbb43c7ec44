//! Status and confirmation message types for operation feedback.

use std::fmt;

/// Wrapper type for operation outcome messages.
///
/// The message is shown to the user verbatim; lookup failures arrive
/// already worded ("Error: No matching file ..."), so Display adds no
/// prefix of its own. The `success` flag lets frontends pick styling
/// and exit behavior.
pub struct OperationStatus {
    pub message: String,
    pub success: bool,
}

impl OperationStatus {
    /// Create a new success status.
    pub fn success(message: String) -> Self {
        Self {
            message,
            success: true,
        }
    }

    /// Create a new failure status.
    pub fn failure(message: String) -> Self {
        Self {
            message,
            success: false,
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.message)
    }
}
