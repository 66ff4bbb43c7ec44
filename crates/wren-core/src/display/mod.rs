//! Display formatting functions and result types.
//!
//! This module provides wrapper types for task collections and operation
//! results, enabling consistent formatting across different output
//! contexts (terminal lists, status lines, summaries).
//!
//! Backend operations return these wrappers instead of raw strings so
//! each frontend decides how to render them. All Display implementations
//! produce markdown suitable for rich terminal rendering, and degrade to
//! readable plain text when printed directly.
//!
//! ## Module Organization
//!
//! - [`collections`]: Collection wrapper types (TaskList)
//! - [`results`]: Operation result types (CreatedTask)
//! - [`status`]: Status and confirmation messages (OperationStatus)

pub mod collections;
pub mod results;
pub mod status;

// Re-export commonly used types for convenience
pub use collections::TaskList;
pub use results::CreatedTask;
pub use status::OperationStatus;
