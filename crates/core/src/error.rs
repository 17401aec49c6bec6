// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use nomination_domain::{DomainError, ValidationMode};
use thiserror::Error;

/// Errors surfaced by the validation manager to its host.
///
/// Constraint violations are never reported here; they are handled in place
/// and sent to the notification sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The requested mode switch is not allowed.
    InvalidModeTransition {
        /// The current mode.
        from: ValidationMode,
        /// The requested mode.
        to: ValidationMode,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::InvalidModeTransition { from, to } => {
                write!(
                    f,
                    "Cannot switch validation mode from {from} to {to}; start a new record instead"
                )
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

/// Failures reported by a bound picker widget.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BindingError {
    /// The widget does not provide the requested capability.
    #[error("Picker does not support {capability}")]
    Unsupported { capability: &'static str },
}
