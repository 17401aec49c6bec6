// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::ValidationMode;
use serde::{Deserialize, Serialize};

/// Hours required between each pair of chained schedule fields.
pub const DEFAULT_MIN_OFFSET_HOURS: i64 = 2;

/// The largest accepted offset: one leap year.
pub const MAX_MIN_OFFSET_HOURS: i64 = 24 * 366;

/// Configuration for schedule validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationConfig {
    /// Minimum hours between a field and its upstream neighbor.
    pub min_offset_hours: i64,
    /// Whether the picker pre-fill may move to the day after the upstream value.
    pub allow_next_day: bool,
    /// Whether loaded records keep values that break the current offset rule.
    pub preserve_historical_data: bool,
    /// The current validation mode.
    pub validation_mode: ValidationMode,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_offset_hours: DEFAULT_MIN_OFFSET_HOURS,
            allow_next_day: true,
            preserve_historical_data: true,
            validation_mode: ValidationMode::Create,
        }
    }
}

impl ValidationConfig {
    /// Checks the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidMinimumOffset` if the offset is negative
    /// or larger than `MAX_MIN_OFFSET_HOURS`.
    pub const fn validate(&self) -> Result<(), DomainError> {
        if self.min_offset_hours < 0 || self.min_offset_hours > MAX_MIN_OFFSET_HOURS {
            return Err(DomainError::InvalidMinimumOffset {
                hours: self.min_offset_hours,
            });
        }
        Ok(())
    }
}
