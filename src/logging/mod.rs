//! Structured logging for batch runs.

mod format;

pub use format::StructuredLogger;
