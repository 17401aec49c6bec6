// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The contract between the validation manager and the picker widgets.
//!
//! Widgets report user selections through a `ChangeNotifier`. The host
//! drains those notifications with
//! `DateTimeValidationManager::process_pending_changes`.
//!
//! Values written by the manager (`set_value`, `clear_value`) must not be
//! echoed back as change notifications.

use crate::error::BindingError;
use nomination_domain::{ScheduleField, Timestamp};
use std::sync::mpsc::Sender;
use time::Date;

/// A selection made by the user in one picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldChange {
    /// The field whose picker changed.
    pub field: ScheduleField,
    /// The new selection, or `None` when cleared.
    pub value: Option<Timestamp>,
}

/// Handle a bound picker uses to report user selections.
#[derive(Debug, Clone)]
pub struct ChangeNotifier {
    field: ScheduleField,
    sender: Sender<FieldChange>,
}

impl ChangeNotifier {
    pub(crate) const fn new(field: ScheduleField, sender: Sender<FieldChange>) -> Self {
        Self { field, sender }
    }

    /// Returns the field this notifier reports for.
    #[must_use]
    pub const fn field(&self) -> ScheduleField {
        self.field
    }

    /// Queues a change for the manager.
    ///
    /// Returns `false` if the manager has been dropped.
    pub fn notify(&self, value: Option<Timestamp>) -> bool {
        self.sender
            .send(FieldChange {
                field: self.field,
                value,
            })
            .is_ok()
    }
}

/// A datetime picker bound to one schedule field.
///
/// `set_minimum_value` and the date pre-fill hooks are optional; the default
/// implementations report `BindingError::Unsupported` and the manager skips
/// the widget.
pub trait FieldBinding {
    /// Returns the committed selection.
    fn value(&self) -> Option<Timestamp>;

    /// Replaces the committed selection.
    fn set_value(&mut self, value: Timestamp);

    /// Removes the committed selection.
    fn clear_value(&mut self);

    /// Installs the notifier used to report user selections.
    fn subscribe(&mut self, notifier: ChangeNotifier);

    /// Restricts the earliest selectable value. `None` lifts the restriction.
    ///
    /// # Errors
    ///
    /// Returns `BindingError::Unsupported` if the widget has no minimum bound.
    fn set_minimum_value(&mut self, _minimum: Option<Timestamp>) -> Result<(), BindingError> {
        Err(BindingError::Unsupported {
            capability: "set_minimum_value",
        })
    }

    /// Returns the current minimum bound, if the widget exposes it.
    fn minimum_value(&self) -> Option<Timestamp> {
        None
    }

    /// Returns the calendar day the picker is currently showing.
    fn displayed_date(&self) -> Option<Date> {
        None
    }

    /// Moves the picker's calendar to `date` without committing a value.
    ///
    /// # Errors
    ///
    /// Returns `BindingError::Unsupported` if the widget cannot do this.
    fn show_date(&mut self, _date: Date) -> Result<(), BindingError> {
        Err(BindingError::Unsupported {
            capability: "show_date",
        })
    }
}

/// One optional binding per schedule field.
#[derive(Default)]
pub struct FieldBindings {
    pilot_on_board: Option<Box<dyn FieldBinding>>,
    etb: Option<Box<dyn FieldBinding>>,
    etc: Option<Box<dyn FieldBinding>>,
}

impl FieldBindings {
    /// Creates an empty set of bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the binding for a field.
    #[must_use]
    pub fn with(mut self, field: ScheduleField, binding: Box<dyn FieldBinding>) -> Self {
        *self.slot_mut(field) = Some(binding);
        self
    }

    /// Returns the binding for a field.
    #[must_use]
    pub fn get(&self, field: ScheduleField) -> Option<&dyn FieldBinding> {
        match field {
            ScheduleField::PilotOnBoard => self.pilot_on_board.as_deref(),
            ScheduleField::Etb => self.etb.as_deref(),
            ScheduleField::Etc => self.etc.as_deref(),
        }
    }

    /// Returns the binding for a field, mutably.
    pub fn get_mut(&mut self, field: ScheduleField) -> Option<&mut (dyn FieldBinding + 'static)> {
        self.slot_mut(field).as_deref_mut()
    }

    pub(crate) fn take(&mut self, field: ScheduleField) -> Option<Box<dyn FieldBinding>> {
        self.slot_mut(field).take()
    }

    pub(crate) fn insert(&mut self, field: ScheduleField, binding: Box<dyn FieldBinding>) {
        *self.slot_mut(field) = Some(binding);
    }

    const fn slot_mut(&mut self, field: ScheduleField) -> &mut Option<Box<dyn FieldBinding>> {
        match field {
            ScheduleField::PilotOnBoard => &mut self.pilot_on_board,
            ScheduleField::Etb => &mut self.etb,
            ScheduleField::Etc => &mut self.etc,
        }
    }
}

impl std::fmt::Debug for FieldBindings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldBindings")
            .field("pilot_on_board", &self.pilot_on_board.is_some())
            .field("etb", &self.etb.is_some())
            .field("etc", &self.etc.is_some())
            .finish()
    }
}
