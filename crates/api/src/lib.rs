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
    clippy::all
)]

mod error;
mod form;

#[cfg(test)]
mod tests;

pub use error::{ApiError, ApiResult};
pub use form::{NominationForm, SubmittedSchedule, parse_picker_input, parse_record_json};
