// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Dependent datetime validation for the schedule chain.
//!
//! The manager owns the accepted values for `pilotOnBoard`, `etb` and `etc`
//! and keeps each picker's minimum bound in step with the value upstream of
//! it.
//!
//! ## Invariants
//!
//! - Propagation is forward only: a change touches at most the bound of the
//!   field immediately downstream
//! - A rejected selection clears the picker; the previous value is not restored
//! - Bounds are pushed before an operation returns
//! - Historical values loaded in edit mode are never auto-corrected
//!
//! ## Mode
//!
//! A manager starts in `create` mode. Loading a stored record switches it to
//! `edit`. There is no way back; the host starts a new manager instead.

use crate::binding::{ChangeNotifier, FieldBinding, FieldBindings, FieldChange};
use crate::error::{BindingError, CoreError};
use crate::notify::{Notification, NotificationSink, TracingSink};
use nomination_domain::{
    ScheduleField, ScheduleRecord, Timestamp, ValidationConfig, ValidationMode, ValidationReport,
    ValidationState, check_schedule, minimum_after, satisfies_offset,
};
use std::sync::mpsc::{Receiver, Sender, channel};
use time::Date;
use tracing::{debug, info};

/// The result of handling one field change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldOutcome {
    /// The value was stored and the downstream bound updated.
    Accepted,
    /// The value broke the offset rule and the picker was cleared.
    Rejected {
        /// The message sent to the notification sink.
        message: String,
    },
}

impl FieldOutcome {
    /// Returns whether the value was accepted.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// What happened to each field while loading a stored record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Fields whose stored value is now held in state.
    pub loaded: Vec<ScheduleField>,
    /// Fields whose stored value could not be parsed.
    pub skipped: Vec<ScheduleField>,
    /// Fields rejected by the offset rule. Only possible when historical
    /// data is not preserved.
    pub rejected: Vec<ScheduleField>,
}

/// Enforces `pilotOnBoard` → `etb` → `etc`, each at least
/// `min_offset_hours` after the one before it.
pub struct DateTimeValidationManager {
    config: ValidationConfig,
    state: ValidationState,
    bindings: FieldBindings,
    sink: Box<dyn NotificationSink>,
    sender: Sender<FieldChange>,
    receiver: Receiver<FieldChange>,
}

impl DateTimeValidationManager {
    /// Creates a manager with no bound pickers.
    ///
    /// # Arguments
    ///
    /// * `config` - Validation settings; the mode is taken from here
    /// * `sink` - Receives rejections and warnings
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(
        config: ValidationConfig,
        sink: Box<dyn NotificationSink>,
    ) -> Result<Self, CoreError> {
        config.validate()?;
        let (sender, receiver) = channel();

        Ok(Self {
            config,
            state: ValidationState::new(),
            bindings: FieldBindings::new(),
            sink,
            sender,
            receiver,
        })
    }

    /// Returns the accepted values and the last recorded check.
    #[must_use]
    pub const fn state(&self) -> &ValidationState {
        &self.state
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Returns the current validation mode.
    #[must_use]
    pub const fn mode(&self) -> ValidationMode {
        self.config.validation_mode
    }

    /// Returns the picker bound to a field.
    #[must_use]
    pub fn binding(&self, field: ScheduleField) -> Option<&dyn FieldBinding> {
        self.bindings.get(field)
    }

    /// Returns the picker bound to a field, mutably.
    pub fn binding_mut(
        &mut self,
        field: ScheduleField,
    ) -> Option<&mut (dyn FieldBinding + 'static)> {
        self.bindings.get_mut(field)
    }

    /// Takes ownership of the pickers and subscribes to their changes.
    ///
    /// A field with no picker is reported as a warning and keeps whatever
    /// was bound before.
    pub fn bind_fields(&mut self, mut bindings: FieldBindings) {
        for field in ScheduleField::ALL {
            if let Some(mut binding) = bindings.take(field) {
                binding.subscribe(ChangeNotifier::new(field, self.sender.clone()));
                self.bindings.insert(field, binding);
                debug!(field = field.key(), "bound schedule picker");
            } else {
                self.warn(
                    Some(field),
                    format!(
                        "No picker bound for {}; its changes will not be validated",
                        field.label()
                    ),
                );
            }
        }
    }

    /// Switches the validation mode without re-validating.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidModeTransition` for `edit` → `create`.
    pub fn set_mode(&mut self, mode: ValidationMode) -> Result<(), CoreError> {
        let current: ValidationMode = self.config.validation_mode;
        if current == mode {
            return Ok(());
        }
        if !current.can_transition_to(mode) {
            return Err(CoreError::InvalidModeTransition {
                from: current,
                to: mode,
            });
        }

        info!("Validation mode switched from {} to {}", current, mode);
        self.config.validation_mode = mode;
        Ok(())
    }

    /// Computes `base + offset_hours` hours.
    ///
    /// Returns `None` when `base` is `None` or the result overflows.
    #[must_use]
    pub fn compute_minimum(base: Option<Timestamp>, offset_hours: i64) -> Option<Timestamp> {
        minimum_after(base, offset_hours)
    }

    /// Checks a candidate value against the field's current upstream value.
    #[must_use]
    pub fn validate_field(&self, field: ScheduleField, value: Option<Timestamp>) -> bool {
        let upstream: Option<Timestamp> = field.upstream().and_then(|up| self.state.get(up));
        satisfies_offset(upstream, value, self.config.min_offset_hours)
    }

    /// Re-checks both chained constraints and records the outcome.
    ///
    /// Calling this repeatedly without changes yields the same report.
    pub fn validate_all(&mut self) -> ValidationReport {
        let report: ValidationReport = check_schedule(&self.state, self.config.min_offset_hours);
        self.state.record(&report);
        report
    }

    /// Handles a selection made in one picker.
    ///
    /// An accepted value is stored, the bound of the next field is moved to
    /// `value + min_offset_hours`, and an empty next picker is moved to the
    /// matching day. A rejected value clears the picker and lifts the next
    /// field's bound.
    pub fn on_field_changed(
        &mut self,
        field: ScheduleField,
        value: Option<Timestamp>,
    ) -> FieldOutcome {
        if self.validate_field(field, value) {
            self.accept(field, value);
            return FieldOutcome::Accepted;
        }

        let message: String = field
            .violation_message(self.config.min_offset_hours)
            .unwrap_or_default();
        self.reject(field, &message);
        FieldOutcome::Rejected { message }
    }

    /// Handles every change queued by bound pickers, oldest first.
    ///
    /// Returns the number of changes handled.
    pub fn process_pending_changes(&mut self) -> usize {
        let mut processed: usize = 0;
        while let Ok(change) = self.receiver.try_recv() {
            self.on_field_changed(change.field, change.value);
            processed += 1;
        }
        processed
    }

    /// Drops every queued change without handling it.
    ///
    /// Returns the number of changes dropped.
    pub fn discard_pending_changes(&mut self) -> usize {
        self.receiver.try_iter().count()
    }

    /// Loads the schedule of a stored nomination and switches to edit mode.
    ///
    /// With `preserve_historical_data` the values are stored as they are,
    /// even when they break the current offset rule; only the bounds for
    /// future edits are set. Without it each value goes through
    /// `on_field_changed` and may be rejected.
    ///
    /// A value that cannot be parsed is reported and skipped. Fields absent
    /// from the record end up empty. Violations kept from the record are
    /// reported as one informational notification.
    pub fn load_existing_data(&mut self, record: &ScheduleRecord) -> LoadSummary {
        if self.config.validation_mode.can_transition_to(ValidationMode::Edit) {
            info!(
                "Validation mode switched from {} to {} for stored record",
                self.config.validation_mode,
                ValidationMode::Edit
            );
            self.config.validation_mode = ValidationMode::Edit;
        }

        self.state.reset();
        let mut summary: LoadSummary = LoadSummary::default();

        for field in ScheduleField::ALL {
            let Some(raw) = record.get(field) else {
                self.clear_binding_value(field);
                continue;
            };

            let value: Timestamp = match Timestamp::parse(raw) {
                Ok(value) => value,
                Err(err) => {
                    self.warn(
                        Some(field),
                        format!("Skipping {} from stored record: {err}", field.label()),
                    );
                    self.clear_binding_value(field);
                    summary.skipped.push(field);
                    continue;
                }
            };

            if let Some(binding) = self.bindings.get_mut(field) {
                binding.set_value(value);
            }

            if self.config.preserve_historical_data {
                self.state.set(field, Some(value));
                summary.loaded.push(field);
            } else if self.on_field_changed(field, Some(value)).is_accepted() {
                summary.loaded.push(field);
            } else {
                summary.rejected.push(field);
            }
        }

        for field in [ScheduleField::PilotOnBoard, ScheduleField::Etb] {
            if let Some(downstream) = field.downstream() {
                let minimum: Option<Timestamp> =
                    Self::compute_minimum(self.state.get(field), self.config.min_offset_hours);
                self.push_minimum(downstream, minimum);
            }
        }

        let report: ValidationReport = self.validate_all();
        if !report.is_valid {
            self.sink.notify(&Notification::info(
                None,
                format!(
                    "Stored record kept with {} historical schedule violation(s)",
                    report.errors.len()
                ),
            ));
        }
        debug!(?summary, "loaded stored schedule");
        summary
    }

    /// Lifts the minimum bound on every bound picker.
    pub fn clear_restrictions(&mut self) {
        for field in ScheduleField::ALL {
            self.push_minimum(field, None);
        }
        debug!("cleared schedule restrictions");
    }

    /// Empties the accepted values and marks the state valid.
    ///
    /// Picker contents and the mode are left alone.
    pub fn reset_validation_state(&mut self) {
        self.state.reset();
        debug!("reset schedule validation state");
    }

    /// Hands the pickers and the sink to a new manager in create mode.
    ///
    /// The new manager keeps the rest of the configuration, starts with an
    /// empty state and resubscribes every picker. Changes still queued for
    /// this manager are dropped.
    #[must_use]
    pub fn into_fresh(self) -> Self {
        let (sender, receiver) = channel();
        let mut fresh: Self = Self {
            config: ValidationConfig {
                validation_mode: ValidationMode::Create,
                ..self.config
            },
            state: ValidationState::new(),
            bindings: FieldBindings::new(),
            sink: self.sink,
            sender,
            receiver,
        };
        fresh.bind_fields(self.bindings);
        fresh
    }

    fn accept(&mut self, field: ScheduleField, value: Option<Timestamp>) {
        self.state.set(field, value);
        debug!(field = field.key(), value = ?value, "accepted schedule value");

        if let Some(downstream) = field.downstream() {
            let minimum: Option<Timestamp> =
                Self::compute_minimum(value, self.config.min_offset_hours);
            self.push_minimum(downstream, minimum);

            if let (Some(upstream), Some(minimum)) = (value, minimum) {
                self.prefill_date(downstream, upstream, minimum);
            }
        }

        self.validate_all();
    }

    fn reject(&mut self, field: ScheduleField, message: &str) {
        self.clear_binding_value(field);
        self.state.set(field, None);

        if let Some(downstream) = field.downstream() {
            self.push_minimum(downstream, None);
        }

        self.validate_all();
        self.sink.notify(&Notification::error(Some(field), message));
    }

    /// Moves an empty picker's calendar to the day its minimum falls on, or
    /// to the upstream day when next-day pre-fill is disabled.
    fn prefill_date(&mut self, field: ScheduleField, upstream: Timestamp, minimum: Timestamp) {
        let target: Date = if self.config.allow_next_day {
            minimum.date()
        } else {
            upstream.date()
        };

        let Some(binding) = self.bindings.get_mut(field) else {
            return;
        };
        if binding.value().is_some() || binding.displayed_date() == Some(target) {
            return;
        }

        match binding.show_date(target) {
            Ok(()) => debug!(field = field.key(), %target, "pre-filled picker date"),
            Err(err) => self.report_binding_error(field, &err),
        }
    }

    fn push_minimum(&mut self, field: ScheduleField, minimum: Option<Timestamp>) {
        let Some(binding) = self.bindings.get_mut(field) else {
            return;
        };

        match binding.set_minimum_value(minimum) {
            Ok(()) => debug!(field = field.key(), minimum = ?minimum, "pushed minimum bound"),
            Err(err) => self.report_binding_error(field, &err),
        }
    }

    fn clear_binding_value(&mut self, field: ScheduleField) {
        if let Some(binding) = self.bindings.get_mut(field) {
            binding.clear_value();
        }
    }

    fn report_binding_error(&self, field: ScheduleField, err: &BindingError) {
        self.warn(Some(field), format!("{} picker: {err}", field.label()));
    }

    fn warn(&self, field: Option<ScheduleField>, message: String) {
        self.sink.notify(&Notification::warning(field, message));
    }
}

impl Default for DateTimeValidationManager {
    fn default() -> Self {
        let (sender, receiver) = channel();
        Self {
            config: ValidationConfig::default(),
            state: ValidationState::new(),
            bindings: FieldBindings::new(),
            sink: Box::new(TracingSink),
            sender,
            receiver,
        }
    }
}

impl std::fmt::Debug for DateTimeValidationManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DateTimeValidationManager")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("bindings", &self.bindings)
            .finish_non_exhaustive()
    }
}
