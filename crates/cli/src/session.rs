// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Scripted replay of a nomination form session against in-memory pickers.

use nomination::{
    FieldBinding, FieldBindings, FieldOutcome, LoadSummary, MemoryPicker, Notification,
    NotificationSink, TracingSink,
};
use nomination_api::{ApiError, ApiResult, NominationForm, SubmittedSchedule};
use nomination_domain::{
    ScheduleField, ScheduleRecord, Timestamp, ValidationConfig, ValidationMode, ValidationReport,
    ValidationState,
};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

/// One action of a session script.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Step {
    /// Load a stored record for editing.
    Load { record: ScheduleRecord },
    /// Type into a picker. A missing or blank value clears it.
    Change {
        field: ScheduleField,
        #[serde(default)]
        value: Option<String>,
    },
    /// Press the form's clear button.
    Clear,
    /// Start a new record.
    New,
    /// Submit the form.
    Submit,
    /// Re-check the whole schedule.
    Validate,
}

impl Step {
    const fn action(&self) -> &'static str {
        match self {
            Self::Load { .. } => "load",
            Self::Change { .. } => "change",
            Self::Clear => "clear",
            Self::New => "new",
            Self::Submit => "submit",
            Self::Validate => "validate",
        }
    }
}

/// What happened when a step ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepReport {
    pub index: usize,
    pub action: &'static str,
    pub outcome: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<ScheduleRecord>,
}

impl StepReport {
    const fn new(index: usize, step: &Step, outcome: &'static str) -> Self {
        Self {
            index,
            action: step.action(),
            outcome,
            messages: Vec::new(),
            record: None,
        }
    }

    fn with_messages(mut self, messages: Vec<String>) -> Self {
        self.messages = messages;
        self
    }
}

/// The visible state of one picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PickerSnapshot {
    pub field: ScheduleField,
    pub value: Option<Timestamp>,
    pub minimum: Option<Timestamp>,
}

/// Everything a replayed session ended with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub mode: ValidationMode,
    pub state: ValidationState,
    pub pickers: Vec<PickerSnapshot>,
    pub steps: Vec<StepReport>,
    pub notifications: Vec<Notification>,
}

/// Keeps every notification for the summary and logs it as well.
#[derive(Debug, Clone, Default)]
struct CollectingSink {
    collected: Rc<RefCell<Vec<Notification>>>,
}

impl CollectingSink {
    fn take(&self) -> Vec<Notification> {
        self.collected.borrow_mut().drain(..).collect()
    }
}

impl NotificationSink for CollectingSink {
    fn notify(&self, notification: &Notification) {
        TracingSink.notify(notification);
        self.collected.borrow_mut().push(notification.clone());
    }
}

fn memory_bindings() -> FieldBindings {
    ScheduleField::ALL
        .into_iter()
        .fold(FieldBindings::new(), |bindings, field| {
            bindings.with(field, Box::new(MemoryPicker::new()))
        })
}

/// Parses a session script.
///
/// # Errors
///
/// Returns an error if the JSON is not an array of steps.
pub fn parse_script(json: &str) -> serde_json::Result<Vec<Step>> {
    serde_json::from_str(json)
}

/// Runs every step of a script on a fresh form.
///
/// Step failures the user could cause (bad input, a refused submission) are
/// reported in the summary. Only configuration problems abort the replay.
///
/// # Errors
///
/// Returns an error if the configuration is invalid.
pub fn replay(config: ValidationConfig, steps: &[Step]) -> ApiResult<SessionSummary> {
    let sink: CollectingSink = CollectingSink::default();
    let mut form: NominationForm =
        NominationForm::new(config, memory_bindings(), Box::new(sink.clone()))?;

    let mut reports: Vec<StepReport> = Vec::with_capacity(steps.len());
    for (index, step) in steps.iter().enumerate() {
        debug!(index = index + 1, action = step.action(), "replaying step");
        reports.push(run_step(&mut form, index + 1, step)?);
    }

    Ok(summarize(&form, reports, sink.take()))
}

fn run_step(form: &mut NominationForm, index: usize, step: &Step) -> ApiResult<StepReport> {
    let report: StepReport = match step {
        Step::Load { record } => {
            let summary: LoadSummary = form.load_record(record);
            let messages: Vec<String> = summary
                .skipped
                .iter()
                .map(|field| format!("{} could not be parsed", field.label()))
                .collect();
            StepReport::new(index, step, "loaded").with_messages(messages)
        }
        Step::Change { field, value } => {
            match form.field_changed(*field, value.as_deref().unwrap_or_default()) {
                Ok(FieldOutcome::Accepted) => StepReport::new(index, step, "accepted"),
                Ok(FieldOutcome::Rejected { message }) => {
                    StepReport::new(index, step, "rejected").with_messages(vec![message])
                }
                Err(err @ ApiError::InvalidInput { .. }) => {
                    StepReport::new(index, step, "invalid-input")
                        .with_messages(vec![err.to_string()])
                }
                Err(err) => return Err(err),
            }
        }
        Step::Clear => {
            form.clear();
            StepReport::new(index, step, "cleared")
        }
        Step::New => {
            form.start_new_record();
            StepReport::new(index, step, "new")
        }
        Step::Submit => match form.submit() {
            Ok(SubmittedSchedule { record, warnings }) => {
                let mut report: StepReport =
                    StepReport::new(index, step, "submitted").with_messages(warnings);
                report.record = Some(record);
                report
            }
            Err(ApiError::ValidationFailed { errors }) => {
                StepReport::new(index, step, "refused").with_messages(errors)
            }
            Err(err) => return Err(err),
        },
        Step::Validate => {
            let report: ValidationReport = form.validate();
            let outcome: &'static str = if report.is_valid { "valid" } else { "invalid" };
            StepReport::new(index, step, outcome).with_messages(report.errors)
        }
    };

    Ok(report)
}

fn summarize(
    form: &NominationForm,
    steps: Vec<StepReport>,
    notifications: Vec<Notification>,
) -> SessionSummary {
    let pickers: Vec<PickerSnapshot> = ScheduleField::ALL
        .into_iter()
        .map(|field| {
            let binding: Option<&dyn FieldBinding> = form.manager().binding(field);
            PickerSnapshot {
                field,
                value: binding.and_then(FieldBinding::value),
                minimum: binding.and_then(FieldBinding::minimum_value),
            }
        })
        .collect();

    SessionSummary {
        mode: form.mode(),
        state: form.manager().state().clone(),
        pickers,
        steps,
        notifications,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use nomination::Severity;

    fn ts(value: &str) -> Timestamp {
        Timestamp::parse(value).unwrap()
    }

    fn run(json: &str) -> SessionSummary {
        replay(ValidationConfig::default(), &parse_script(json).unwrap()).unwrap()
    }

    #[test]
    fn test_parse_script_reads_every_action() {
        let steps: Vec<Step> = parse_script(
            r#"[
                {"action": "load", "record": {"pilotOnBoard": "2024-01-01T10:00"}},
                {"action": "change", "field": "etb", "value": "2024-01-01T12:00"},
                {"action": "change", "field": "etc"},
                {"action": "clear"},
                {"action": "new"},
                {"action": "validate"},
                {"action": "submit"}
            ]"#,
        )
        .unwrap();

        assert_eq!(steps.len(), 7);
        assert_eq!(
            steps[2],
            Step::Change {
                field: ScheduleField::Etc,
                value: None
            }
        );
    }

    #[test]
    fn test_parse_script_rejects_unknown_action() {
        assert!(parse_script(r#"[{"action": "launch"}]"#).is_err());
    }

    #[test]
    fn test_replay_create_session_pushes_minimums() {
        let summary: SessionSummary = run(r#"[
            {"action": "change", "field": "pilotOnBoard", "value": "2024-01-01T10:00"},
            {"action": "change", "field": "etb", "value": "2024-01-01T12:00"}
        ]"#);

        assert_eq!(summary.mode, ValidationMode::Create);
        assert_eq!(summary.steps[0].outcome, "accepted");
        assert_eq!(summary.steps[1].outcome, "accepted");
        assert_eq!(summary.pickers[1].minimum, Some(ts("2024-01-01T12:00")));
        assert_eq!(summary.pickers[2].minimum, Some(ts("2024-01-01T14:00")));
        assert!(summary.notifications.is_empty());
    }

    #[test]
    fn test_replay_reports_rejection_and_notification() {
        let summary: SessionSummary = run(r#"[
            {"action": "change", "field": "pilotOnBoard", "value": "2024-01-01T10:00"},
            {"action": "change", "field": "etb", "value": "2024-01-01T11:00"}
        ]"#);

        assert_eq!(summary.steps[1].outcome, "rejected");
        assert_eq!(
            summary.steps[1].messages,
            vec!["ETB must be at least 2 hours after Pilot On Board time".to_string()]
        );
        assert_eq!(summary.pickers[1].value, None);
        assert_eq!(summary.notifications.len(), 1);
        assert_eq!(summary.notifications[0].severity, Severity::Error);
    }

    #[test]
    fn test_replay_reports_unparsable_input_without_aborting() {
        let summary: SessionSummary = run(r#"[
            {"action": "change", "field": "etb", "value": "tomorrow"},
            {"action": "change", "field": "etb", "value": "2024-01-01T11:00"}
        ]"#);

        assert_eq!(summary.steps[0].outcome, "invalid-input");
        assert_eq!(summary.steps[1].outcome, "accepted");
    }

    #[test]
    fn test_replay_edit_session_submits_with_warnings() {
        let summary: SessionSummary = run(r#"[
            {"action": "load", "record": {
                "pilotOnBoard": "2024-01-01T10:00",
                "etb": "2024-01-01T11:00",
                "etc": "not a date"
            }},
            {"action": "submit"}
        ]"#);

        assert_eq!(summary.mode, ValidationMode::Edit);
        assert_eq!(
            summary.steps[0].messages,
            vec!["ETC could not be parsed".to_string()]
        );
        assert_eq!(summary.steps[1].outcome, "submitted");
        assert_eq!(summary.steps[1].messages.len(), 1);
        assert_eq!(
            summary.steps[1].record.as_ref().unwrap().etb.as_deref(),
            Some("2024-01-01T11:00")
        );
    }

    #[test]
    fn test_replay_create_submission_is_refused_on_violation() {
        let summary: SessionSummary = run(r#"[
            {"action": "change", "field": "pilotOnBoard", "value": "2024-01-01T10:00"},
            {"action": "change", "field": "etb", "value": "2024-01-01T12:00"},
            {"action": "change", "field": "pilotOnBoard", "value": "2024-01-01T11:00"},
            {"action": "submit"}
        ]"#);

        assert_eq!(summary.steps[2].outcome, "accepted");
        assert_eq!(summary.steps[3].outcome, "refused");
        assert_eq!(
            summary.steps[3].messages,
            vec!["ETB must be at least 2 hours after Pilot On Board time".to_string()]
        );
        assert_eq!(summary.steps[3].record, None);
    }

    #[test]
    fn test_replay_new_record_starts_empty() {
        let summary: SessionSummary = replay(
            ValidationConfig::default(),
            &[
                Step::Load {
                    record: ScheduleRecord::new(
                        Some("2024-01-01T10:00"),
                        Some("2024-01-01T11:00"),
                        None,
                    ),
                },
                Step::New,
                Step::Submit,
            ],
        )
        .unwrap();

        assert_eq!(summary.mode, ValidationMode::Create);
        assert_eq!(summary.steps[2].outcome, "submitted");
        assert!(summary.pickers.iter().all(|picker| picker.value.is_none()));
        assert!(summary.pickers.iter().all(|picker| picker.minimum.is_none()));
    }

    #[test]
    fn test_replay_validate_reports_violations() {
        let summary: SessionSummary = run(r#"[
            {"action": "load", "record": {
                "pilotOnBoard": "2024-01-01T10:00",
                "etb": "2024-01-01T11:00"
            }},
            {"action": "validate"}
        ]"#);

        assert_eq!(summary.steps[1].outcome, "invalid");
        assert!(!summary.state.is_valid());
    }

    #[test]
    fn test_replay_rejects_negative_offset() {
        let config: ValidationConfig = ValidationConfig {
            min_offset_hours: -1,
            ..ValidationConfig::default()
        };
        assert!(replay(config, &[]).is_err());
    }
}
