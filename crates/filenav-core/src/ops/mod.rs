//! Bulk file operations: request/result types and the background executor.

pub mod executor;
pub mod request;
