// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod config;
mod error;
mod record;
mod state;
mod types;
mod validation;

#[cfg(test)]
mod tests;

// Re-export public types
pub use config::{DEFAULT_MIN_OFFSET_HOURS, MAX_MIN_OFFSET_HOURS, ValidationConfig};
pub use error::DomainError;
pub use record::ScheduleRecord;
pub use state::{ValidationReport, ValidationState};
pub use types::{ScheduleField, Timestamp, ValidationMode};
pub use validation::{check_schedule, minimum_after, satisfies_offset};
