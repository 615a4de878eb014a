//! Cron parsing error types.

use thiserror::Error;

/// Errors that can occur while parsing a cron expression.
#[derive(Debug, Error)]
pub enum CronError {
    /// Wrong number of whitespace-separated fields.
    #[error("expected 5 or 6 fields in `{expr}`, found {found}")]
    FieldCount {
        /// The offending expression.
        expr: String,
        /// How many fields it had.
        found: usize,
    },

    /// A field failed to parse.
    #[error("invalid {field} field `{value}`: {reason}")]
    Field {
        /// Which field (e.g. `minute`, `day-of-week`).
        field: &'static str,
        /// The field text as written.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Result type for cron operations.
pub type CronResult<T> = Result<T, CronError>;
