// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::NominationForm;
use nomination::{FieldBindings, MemoryPicker, Notification, NotificationSink, Severity};
use nomination_domain::{ScheduleField, Timestamp, ValidationConfig};
use std::cell::RefCell;
use std::rc::Rc;

pub fn ts(value: &str) -> Timestamp {
    Timestamp::parse(value).unwrap()
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    entries: Rc<RefCell<Vec<Notification>>>,
}

impl RecordingSink {
    pub fn errors(&self) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .filter(|entry| entry.severity == Severity::Error)
            .map(|entry| entry.message.clone())
            .collect()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, notification: &Notification) {
        self.entries.borrow_mut().push(notification.clone());
    }
}

pub fn memory_bindings() -> FieldBindings {
    FieldBindings::new()
        .with(ScheduleField::PilotOnBoard, Box::new(MemoryPicker::new()))
        .with(ScheduleField::Etb, Box::new(MemoryPicker::new()))
        .with(ScheduleField::Etc, Box::new(MemoryPicker::new()))
}

pub fn create_test_form_with(config: ValidationConfig) -> (NominationForm, RecordingSink) {
    let sink: RecordingSink = RecordingSink::default();
    let form: NominationForm =
        NominationForm::new(config, memory_bindings(), Box::new(sink.clone())).unwrap();
    (form, sink)
}

pub fn create_test_form() -> (NominationForm, RecordingSink) {
    create_test_form_with(ValidationConfig::default())
}

pub fn picker_value(form: &NominationForm, field: ScheduleField) -> Option<Timestamp> {
    form.manager().binding(field).and_then(|binding| binding.value())
}

pub fn picker_minimum(form: &NominationForm, field: ScheduleField) -> Option<Timestamp> {
    form.manager()
        .binding(field)
        .and_then(|binding| binding.minimum_value())
}
