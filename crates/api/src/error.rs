// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the form boundary.

use nomination::CoreError;
use nomination_domain::DomainError;
use thiserror::Error;

/// Errors returned to the host page.
///
/// Rejected picker selections are not errors; they come back as
/// `FieldOutcome::Rejected` and go to the notification sink.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The stored record could not be decoded.
    #[error("Invalid nomination record: {message}")]
    InvalidRecord { message: String },

    /// A raw picker value could not be parsed.
    #[error("Invalid input for field '{field}': {message}")]
    InvalidInput { field: String, message: String },

    /// The schedule breaks the offset rule and cannot be submitted.
    #[error("Schedule failed validation: {}", .errors.join("; "))]
    ValidationFailed { errors: Vec<String> },

    /// The validation manager refused the request.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A domain value could not be built or rendered.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Result type for form operations.
pub type ApiResult<T> = Result<T, ApiError>;
