// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Offset rules for the schedule chain.
//!
//! ## Invariants
//!
//! - `etb >= pilot_on_board + offset` when both are set
//! - `etc >= etb + offset` when both are set
//! - Offsets are wall-clock hour additions; midnight is not special
//! - An unset value never constrains anything

use crate::state::{ValidationReport, ValidationState};
use crate::types::{ScheduleField, Timestamp};

/// Computes the earliest value allowed after `base`.
///
/// Returns `None` when there is no base or the addition overflows. A picker
/// given `None` is left without a bound.
#[must_use]
pub fn minimum_after(base: Option<Timestamp>, offset_hours: i64) -> Option<Timestamp> {
    base.and_then(|base| base.checked_add_hours(offset_hours))
}

/// Checks a candidate value against its upstream value.
///
/// Either side being unset passes. When both are set but the minimum
/// overflows, no value can satisfy it.
#[must_use]
pub fn satisfies_offset(
    upstream: Option<Timestamp>,
    value: Option<Timestamp>,
    offset_hours: i64,
) -> bool {
    match (upstream, value) {
        (Some(upstream), Some(value)) => upstream
            .checked_add_hours(offset_hours)
            .is_some_and(|minimum| value >= minimum),
        _ => true,
    }
}

/// Checks both chained constraints against the values held in `state`.
///
/// Violations are reported in chain order.
#[must_use]
pub fn check_schedule(state: &ValidationState, offset_hours: i64) -> ValidationReport {
    let errors: Vec<String> = [ScheduleField::Etb, ScheduleField::Etc]
        .into_iter()
        .filter_map(|field| {
            let upstream: Option<Timestamp> = field.upstream().and_then(|up| state.get(up));
            if satisfies_offset(upstream, state.get(field), offset_hours) {
                None
            } else {
                field.violation_message(offset_hours)
            }
        })
        .collect();

    ValidationReport::from_errors(errors)
}
