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

mod binding;
mod error;
mod manager;
mod memory;
mod notify;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use binding::{ChangeNotifier, FieldBinding, FieldBindings, FieldChange};
pub use error::{BindingError, CoreError};
pub use manager::{DateTimeValidationManager, FieldOutcome, LoadSummary};
pub use memory::MemoryPicker;
pub use notify::{Notification, NotificationSink, Severity, TracingSink};
