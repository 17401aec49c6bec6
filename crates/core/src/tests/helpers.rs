// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Picker and sink stand-ins shared by the manager tests.

use crate::{
    BindingError, ChangeNotifier, DateTimeValidationManager, FieldBinding, FieldBindings,
    Notification, NotificationSink, Severity,
};
use nomination_domain::{ScheduleField, Timestamp, ValidationConfig};
use std::cell::RefCell;
use std::rc::Rc;
use time::Date;

pub fn ts(value: &str) -> Timestamp {
    Timestamp::parse(value).unwrap()
}

#[derive(Debug, Default)]
pub struct PickerState {
    pub value: Option<Timestamp>,
    pub minimum: Option<Timestamp>,
    pub displayed: Option<Date>,
    pub notifier: Option<ChangeNotifier>,
    pub minimum_calls: usize,
    pub clear_calls: usize,
}

/// A picker whose state stays observable after the manager takes ownership.
#[derive(Debug, Clone, Default)]
pub struct MockPicker {
    state: Rc<RefCell<PickerState>>,
}

impl MockPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn boxed(&self) -> Box<dyn FieldBinding> {
        Box::new(self.clone())
    }

    pub fn current_value(&self) -> Option<Timestamp> {
        self.state.borrow().value
    }

    pub fn current_minimum(&self) -> Option<Timestamp> {
        self.state.borrow().minimum
    }

    pub fn displayed(&self) -> Option<Date> {
        self.state.borrow().displayed
    }

    pub fn minimum_calls(&self) -> usize {
        self.state.borrow().minimum_calls
    }

    pub fn clear_calls(&self) -> usize {
        self.state.borrow().clear_calls
    }

    pub fn is_subscribed(&self) -> bool {
        self.state.borrow().notifier.is_some()
    }

    pub fn show(&self, date: Date) {
        self.state.borrow_mut().displayed = Some(date);
    }

    /// Simulates the user picking a value: the widget commits it and queues
    /// a change notification.
    pub fn user_selects(&self, value: Option<Timestamp>) {
        let mut state = self.state.borrow_mut();
        state.value = value;
        if let Some(value) = value {
            state.displayed = Some(value.date());
        }
        if let Some(notifier) = &state.notifier {
            notifier.notify(value);
        }
    }
}

impl FieldBinding for MockPicker {
    fn value(&self) -> Option<Timestamp> {
        self.state.borrow().value
    }

    fn set_value(&mut self, value: Timestamp) {
        let mut state = self.state.borrow_mut();
        state.value = Some(value);
        state.displayed = Some(value.date());
    }

    fn clear_value(&mut self) {
        let mut state = self.state.borrow_mut();
        state.value = None;
        state.clear_calls += 1;
    }

    fn subscribe(&mut self, notifier: ChangeNotifier) {
        self.state.borrow_mut().notifier = Some(notifier);
    }

    fn set_minimum_value(&mut self, minimum: Option<Timestamp>) -> Result<(), BindingError> {
        let mut state = self.state.borrow_mut();
        state.minimum = minimum;
        state.minimum_calls += 1;
        Ok(())
    }

    fn minimum_value(&self) -> Option<Timestamp> {
        self.state.borrow().minimum
    }

    fn displayed_date(&self) -> Option<Date> {
        self.state.borrow().displayed
    }

    fn show_date(&mut self, date: Date) -> Result<(), BindingError> {
        self.state.borrow_mut().displayed = Some(date);
        Ok(())
    }
}

/// A picker with only the required capabilities.
#[derive(Debug, Clone, Default)]
pub struct BarePicker {
    value: Rc<RefCell<Option<Timestamp>>>,
}

impl BarePicker {
    pub fn current_value(&self) -> Option<Timestamp> {
        *self.value.borrow()
    }
}

impl FieldBinding for BarePicker {
    fn value(&self) -> Option<Timestamp> {
        *self.value.borrow()
    }

    fn set_value(&mut self, value: Timestamp) {
        *self.value.borrow_mut() = Some(value);
    }

    fn clear_value(&mut self) {
        *self.value.borrow_mut() = None;
    }

    fn subscribe(&mut self, _notifier: ChangeNotifier) {}
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    entries: Rc<RefCell<Vec<Notification>>>,
}

impl RecordingSink {
    pub fn boxed(&self) -> Box<dyn NotificationSink> {
        Box::new(self.clone())
    }

    pub fn messages(&self, severity: Severity) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .filter(|entry| entry.severity == severity)
            .map(|entry| entry.message.clone())
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.messages(Severity::Error)
    }

    pub fn warnings(&self) -> Vec<String> {
        self.messages(Severity::Warning)
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, notification: &Notification) {
        self.entries.borrow_mut().push(notification.clone());
    }
}

pub struct Pickers {
    pub pilot_on_board: MockPicker,
    pub etb: MockPicker,
    pub etc: MockPicker,
}

impl Pickers {
    pub fn new() -> Self {
        Self {
            pilot_on_board: MockPicker::new(),
            etb: MockPicker::new(),
            etc: MockPicker::new(),
        }
    }

    pub fn bindings(&self) -> FieldBindings {
        FieldBindings::new()
            .with(ScheduleField::PilotOnBoard, self.pilot_on_board.boxed())
            .with(ScheduleField::Etb, self.etb.boxed())
            .with(ScheduleField::Etc, self.etc.boxed())
    }
}

pub fn create_bound_manager_with(
    config: ValidationConfig,
) -> (DateTimeValidationManager, Pickers, RecordingSink) {
    let sink: RecordingSink = RecordingSink::default();
    let pickers: Pickers = Pickers::new();
    let mut manager: DateTimeValidationManager =
        DateTimeValidationManager::new(config, sink.boxed()).unwrap();
    manager.bind_fields(pickers.bindings());
    (manager, pickers, sink)
}

pub fn create_bound_manager() -> (DateTimeValidationManager, Pickers, RecordingSink) {
    create_bound_manager_with(ValidationConfig::default())
}
