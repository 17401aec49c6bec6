// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::binding::{ChangeNotifier, FieldBinding};
use crate::error::BindingError;
use nomination_domain::Timestamp;
use time::Date;

/// A picker held entirely in memory.
///
/// Used by hosts without a real widget toolkit, such as the session replay
/// tool.
#[derive(Debug, Clone, Default)]
pub struct MemoryPicker {
    value: Option<Timestamp>,
    minimum: Option<Timestamp>,
    displayed: Option<Date>,
    notifier: Option<ChangeNotifier>,
}

impl MemoryPicker {
    /// Creates an empty, unrestricted picker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Commits a user selection and reports it to the subscribed manager.
    ///
    /// Selections below the current minimum are refused the way a real
    /// picker greys them out. Returns whether the selection was committed.
    pub fn select(&mut self, value: Option<Timestamp>) -> bool {
        if matches!((value, self.minimum), (Some(value), Some(minimum)) if value < minimum) {
            return false;
        }

        self.value = value;
        if let Some(value) = value {
            self.displayed = Some(value.date());
        }
        if let Some(notifier) = &self.notifier {
            notifier.notify(value);
        }
        true
    }
}

impl FieldBinding for MemoryPicker {
    fn value(&self) -> Option<Timestamp> {
        self.value
    }

    fn set_value(&mut self, value: Timestamp) {
        self.value = Some(value);
        self.displayed = Some(value.date());
    }

    fn clear_value(&mut self) {
        self.value = None;
    }

    fn subscribe(&mut self, notifier: ChangeNotifier) {
        self.notifier = Some(notifier);
    }

    fn set_minimum_value(&mut self, minimum: Option<Timestamp>) -> Result<(), BindingError> {
        self.minimum = minimum;
        Ok(())
    }

    fn minimum_value(&self) -> Option<Timestamp> {
        self.minimum
    }

    fn displayed_date(&self) -> Option<Date> {
        self.displayed
    }

    fn show_date(&mut self, date: Date) -> Result<(), BindingError> {
        self.displayed = Some(date);
        Ok(())
    }
}
