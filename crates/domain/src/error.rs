// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::config::MAX_MIN_OFFSET_HOURS;

/// Errors that can occur while building or interpreting schedule values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Failed to parse a timestamp from a string.
    TimestampParse {
        /// The rejected input.
        input: String,
        /// The parsing error message.
        error: String,
    },
    /// Failed to render a timestamp.
    TimestampFormat {
        /// The formatting error message.
        error: String,
    },
    /// The schedule field name is not one of `pilotOnBoard`, `etb`, `etc`.
    UnknownField(String),
    /// The validation mode name is not `create` or `edit`.
    InvalidMode(String),
    /// The minimum offset between chained fields is negative or too large.
    InvalidMinimumOffset {
        /// The rejected offset.
        hours: i64,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TimestampParse { input, error } => {
                write!(f, "Failed to parse timestamp '{input}': {error}")
            }
            Self::TimestampFormat { error } => write!(f, "Failed to format timestamp: {error}"),
            Self::UnknownField(name) => write!(f, "Unknown schedule field: {name}"),
            Self::InvalidMode(name) => write!(f, "Invalid validation mode: {name}"),
            Self::InvalidMinimumOffset { hours } => {
                write!(
                    f,
                    "Invalid minimum offset: {hours} hours. Must be between 0 and {MAX_MIN_OFFSET_HOURS}"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
