//! Error types for dbgcon.
//!
//! Errors are split by concern with `thiserror` and compose into
//! [`AppError`] through `From` conversions, so the binary can use `?`
//! throughout.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error returned by the binary
//!   - [`ConfigError`](crate::config::ConfigError) - config file read/parse failures (fatal)
//!   - [`LoggingError`](crate::logging::LoggingError) - tracing setup failures (fatal)
//!   - [`TranscriptError`] - malformed transcript lines (non-fatal, skipped)
//!   - `std::io::Error` - reading the transcript or writing the export
//!
//! [`EvaluationError`] never reaches `AppError`: a failed evaluation is
//! recorded in the log as an unavailable result, not raised.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use thiserror::Error;

/// Top-level error for the `dbgcon` binary.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The tracing subscriber could not be installed.
    #[error("Logging setup failed: {0}")]
    Logging(#[from] LoggingError),

    /// Reading input or writing output failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors encountered when parsing transcript lines.
///
/// Parsing errors are **non-fatal**: the offending line is logged and
/// skipped, the rest of the transcript still replays.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranscriptError {
    /// A line is not valid JSON or does not match any event shape.
    #[error("Invalid JSON at line {line}: {message}")]
    InvalidJson {
        /// 1-based line number in the transcript.
        line: usize,
        /// Parser error message.
        message: String,
    },

    /// An event names a session with an empty id.
    #[error("Empty session id at line {line}")]
    EmptySession {
        /// 1-based line number in the transcript.
        line: usize,
    },
}

/// Why an expression could not be evaluated.
///
/// The message becomes the value of the unavailable result entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    /// No debug session was active to evaluate against.
    #[error("No active debug session")]
    NoSession,

    /// The evaluator needed a stack frame and none was selected.
    #[error("No stack frame selected")]
    NoFrame,

    /// The evaluator rejected or failed the expression.
    #[error("{0}")]
    Failed(String),
}
