//! Error types for the task assistant library.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all task operations.
#[derive(Error, Debug)]
pub enum WrenError {
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
    /// HTTP transport errors
    #[error("HTTP error: {message}")]
    Http {
        message: String,
        #[source]
        source: reqwest::Error,
    },
    /// Remote API rejected the request
    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },
    /// Cron expression parse errors
    #[error("Invalid cron expression '{expression}': {reason}")]
    Schedule { expression: String, reason: String },
}

/// Builder for creating HTTP transport errors with a message.
pub struct HttpErrorBuilder {
    message: String,
}

impl HttpErrorBuilder {
    /// Create a new HTTP error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: reqwest::Error) -> WrenError {
        WrenError::Http {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> WrenError {
        WrenError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl WrenError {
    /// Creates a builder for HTTP transport errors.
    pub fn http(message: impl Into<String>) -> HttpErrorBuilder {
        HttpErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a file system error for a path.
    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileSystem {
            path: path.into(),
            source,
        }
    }

    /// Creates a configuration error with a message.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates an API error from a response status and body.
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
        }
    }

    /// Creates a cron parse error for an expression.
    pub fn schedule(expression: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Schedule {
            expression: expression.into(),
            reason: reason.into(),
        }
    }
}

/// Extension trait for io Results to attach the offending path.
pub trait IoResultExt<T> {
    /// Map io errors to file system errors carrying the path.
    fn fs_context(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|e| WrenError::filesystem(path, e))
    }
}

/// Result type alias for task operations
pub type Result<T> = std::result::Result<T, WrenError>;
