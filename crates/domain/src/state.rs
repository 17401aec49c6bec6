// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{ScheduleField, Timestamp};
use serde::Serialize;

/// The outcome of checking the whole schedule chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// Whether every constraint holds.
    pub is_valid: bool,
    /// One user-facing message per violated constraint.
    pub errors: Vec<String>,
}

impl ValidationReport {
    /// A report with no violations.
    #[must_use]
    pub const fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    /// Builds a report from a list of violations.
    #[must_use]
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::valid()
    }
}

/// Schedule values accepted for the current form session.
///
/// Scoped to one form. Reset when the form is cleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationState {
    pilot_on_board: Option<Timestamp>,
    etb: Option<Timestamp>,
    etc: Option<Timestamp>,
    is_valid: bool,
    errors: Vec<String>,
}

impl ValidationState {
    /// Creates an empty, valid state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pilot_on_board: None,
            etb: None,
            etc: None,
            is_valid: true,
            errors: Vec::new(),
        }
    }

    /// Returns the value held for a field.
    #[must_use]
    pub const fn get(&self, field: ScheduleField) -> Option<Timestamp> {
        match field {
            ScheduleField::PilotOnBoard => self.pilot_on_board,
            ScheduleField::Etb => self.etb,
            ScheduleField::Etc => self.etc,
        }
    }

    /// Stores the value for a field.
    pub const fn set(&mut self, field: ScheduleField, value: Option<Timestamp>) {
        match field {
            ScheduleField::PilotOnBoard => self.pilot_on_board = value,
            ScheduleField::Etb => self.etb = value,
            ScheduleField::Etc => self.etc = value,
        }
    }

    /// Returns the pilot on board value.
    #[must_use]
    pub const fn pilot_on_board(&self) -> Option<Timestamp> {
        self.pilot_on_board
    }

    /// Returns the ETB value.
    #[must_use]
    pub const fn etb(&self) -> Option<Timestamp> {
        self.etb
    }

    /// Returns the ETC value.
    #[must_use]
    pub const fn etc(&self) -> Option<Timestamp> {
        self.etc
    }

    /// Returns whether the last recorded check passed.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Returns the messages from the last recorded check.
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Records the outcome of a check.
    pub fn record(&mut self, report: &ValidationReport) {
        self.is_valid = report.is_valid;
        self.errors.clone_from(&report.errors);
    }

    /// Clears every value and marks the state valid.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for ValidationState {
    fn default() -> Self {
        Self::new()
    }
}
