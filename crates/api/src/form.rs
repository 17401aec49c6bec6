// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The host side of the nomination schedule form.
//!
//! `NominationForm` owns the validation manager for one form session and
//! covers the lifecycle the page drives: loading a stored record, forwarding
//! picker input, submitting, clearing and starting over.

use crate::error::{ApiError, ApiResult};
use nomination::{
    DateTimeValidationManager, FieldBindings, FieldOutcome, LoadSummary, NotificationSink,
};
use nomination_domain::{
    ScheduleField, ScheduleRecord, Timestamp, ValidationConfig, ValidationMode, ValidationReport,
};
use serde::Serialize;
use tracing::{debug, info, warn};

/// A schedule accepted for submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmittedSchedule {
    /// The values to send to the backend.
    pub record: ScheduleRecord,
    /// Offset violations kept from a stored record.
    pub warnings: Vec<String>,
}

/// Decodes a stored nomination from the backend's JSON.
///
/// Keys other than `pilotOnBoard`, `etb` and `etc` are ignored. A schedule
/// key holding a number or other non-string value is kept and later skipped
/// as unparsable when the record is loaded.
///
/// # Errors
///
/// Returns `ApiError::InvalidRecord` if the JSON is malformed or not an
/// object.
pub fn parse_record_json(json: &str) -> ApiResult<ScheduleRecord> {
    serde_json::from_str(json).map_err(|err| ApiError::InvalidRecord {
        message: err.to_string(),
    })
}

/// Parses the raw text of a picker input. Blank input means "cleared".
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if the text is not a timestamp.
pub fn parse_picker_input(field: ScheduleField, raw: &str) -> ApiResult<Option<Timestamp>> {
    let trimmed: &str = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    Timestamp::parse(trimmed)
        .map(Some)
        .map_err(|err| ApiError::InvalidInput {
            field: field.key().to_string(),
            message: err.to_string(),
        })
}

/// One nomination form session.
#[derive(Debug)]
pub struct NominationForm {
    manager: DateTimeValidationManager,
}

impl NominationForm {
    /// Creates a form and binds its pickers.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(
        config: ValidationConfig,
        bindings: FieldBindings,
        sink: Box<dyn NotificationSink>,
    ) -> ApiResult<Self> {
        let mut manager: DateTimeValidationManager = DateTimeValidationManager::new(config, sink)?;
        manager.bind_fields(bindings);
        Ok(Self { manager })
    }

    /// Returns the validation manager.
    #[must_use]
    pub const fn manager(&self) -> &DateTimeValidationManager {
        &self.manager
    }

    /// Returns the current validation mode.
    #[must_use]
    pub const fn mode(&self) -> ValidationMode {
        self.manager.mode()
    }

    /// Loads a stored record for editing.
    pub fn load_record(&mut self, record: &ScheduleRecord) -> LoadSummary {
        self.manager.discard_pending_changes();
        let summary: LoadSummary = self.manager.load_existing_data(record);
        info!(
            "Loaded nomination schedule: {} loaded, {} skipped, {} rejected",
            summary.loaded.len(),
            summary.skipped.len(),
            summary.rejected.len()
        );
        summary
    }

    /// Decodes and loads a stored record for editing.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidRecord` if the JSON cannot be decoded. The
    /// form is left untouched in that case.
    pub fn load_record_json(&mut self, json: &str) -> ApiResult<LoadSummary> {
        let record: ScheduleRecord = parse_record_json(json)?;
        Ok(self.load_record(&record))
    }

    /// Applies raw picker text to a field as if the user had picked it.
    ///
    /// The picker is updated first so that a rejection clears it.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidInput` if the text is not a timestamp.
    pub fn field_changed(&mut self, field: ScheduleField, raw: &str) -> ApiResult<FieldOutcome> {
        let value: Option<Timestamp> = parse_picker_input(field, raw)?;

        if let Some(binding) = self.manager.binding_mut(field) {
            match value {
                Some(value) => binding.set_value(value),
                None => binding.clear_value(),
            }
        }

        Ok(self.manager.on_field_changed(field, value))
    }

    /// Handles changes queued by the bound pickers.
    pub fn dispatch_pending(&mut self) -> usize {
        self.manager.process_pending_changes()
    }

    /// Re-checks the whole schedule without submitting it.
    pub fn validate(&mut self) -> ValidationReport {
        self.dispatch_pending();
        self.manager.validate_all()
    }

    /// Checks the schedule and returns the values to save.
    ///
    /// Violations are fatal, except in edit mode with historical data
    /// preserved, where they are returned as warnings.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::ValidationFailed` if the schedule breaks the offset
    /// rule, or `ApiError::Domain` if a value cannot be rendered.
    pub fn submit(&mut self) -> ApiResult<SubmittedSchedule> {
        self.dispatch_pending();
        let report: ValidationReport = self.manager.validate_all();
        let historical: bool = self.manager.mode() == ValidationMode::Edit
            && self.manager.config().preserve_historical_data;

        if !report.is_valid && !historical {
            debug!(errors = ?report.errors, "schedule submission refused");
            return Err(ApiError::ValidationFailed {
                errors: report.errors,
            });
        }

        if !report.is_valid {
            warn!(
                "Submitting stored schedule with {} historical violation(s)",
                report.errors.len()
            );
        }

        let record: ScheduleRecord = ScheduleRecord::from_state(self.manager.state())?;
        Ok(SubmittedSchedule {
            record,
            warnings: report.errors,
        })
    }

    /// Empties every picker, lifts every restriction and resets the state.
    ///
    /// The mode is kept; use `start_new_record` to go back to create mode.
    pub fn clear(&mut self) {
        self.manager.discard_pending_changes();
        for field in ScheduleField::ALL {
            if let Some(binding) = self.manager.binding_mut(field) {
                binding.clear_value();
            }
        }
        self.manager.clear_restrictions();
        self.manager.reset_validation_state();
        debug!("cleared nomination form");
    }

    /// Clears the form and hands the pickers to a fresh manager in create mode.
    pub fn start_new_record(&mut self) {
        self.clear();
        self.manager = std::mem::take(&mut self.manager).into_fresh();
        info!("Started new nomination record");
    }
}
