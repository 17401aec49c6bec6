// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::state::ValidationState;
use crate::types::ScheduleField;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// The schedule portion of a stored nomination record.
///
/// Values are kept as the raw strings the backend returned. Parsing happens
/// per field when the record is loaded so that one bad value does not block
/// the others. Numbers and booleans are kept as their text and fail to parse
/// later like any other bad value. Other keys on a nomination payload are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRecord {
    /// Pilot on board (ISO 8601).
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub pilot_on_board: Option<String>,
    /// Estimated time of berthing (ISO 8601).
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub etb: Option<String>,
    /// Estimated time of completion (ISO 8601).
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub etc: Option<String>,
}

impl ScheduleRecord {
    /// Creates a record from optional raw values.
    #[must_use]
    pub fn new(pilot_on_board: Option<&str>, etb: Option<&str>, etc: Option<&str>) -> Self {
        Self {
            pilot_on_board: pilot_on_board.map(str::to_string),
            etb: etb.map(str::to_string),
            etc: etc.map(str::to_string),
        }
    }

    /// Returns the raw value for a field.
    ///
    /// Blank strings count as absent.
    #[must_use]
    pub fn get(&self, field: ScheduleField) -> Option<&str> {
        let raw: Option<&String> = match field {
            ScheduleField::PilotOnBoard => self.pilot_on_board.as_ref(),
            ScheduleField::Etb => self.etb.as_ref(),
            ScheduleField::Etc => self.etc.as_ref(),
        };
        raw.map(|value| value.trim()).filter(|value| !value.is_empty())
    }

    /// Builds a record from accepted state values.
    ///
    /// # Errors
    ///
    /// Returns an error if a timestamp cannot be rendered.
    pub fn from_state(state: &ValidationState) -> Result<Self, DomainError> {
        let render = |field: ScheduleField| -> Result<Option<String>, DomainError> {
            state.get(field).map(|ts| ts.to_iso_string()).transpose()
        };

        Ok(Self {
            pilot_on_board: render(ScheduleField::PilotOnBoard)?,
            etb: render(ScheduleField::Etb)?,
            etc: render(ScheduleField::Etc)?,
        })
    }
}

/// A stored schedule value as the backend may send it.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Flag(bool),
    Other(IgnoredAny),
}

/// Reads a schedule value without failing the whole record on a wrong type.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<RawValue> = Option::deserialize(deserializer)?;
    Ok(raw.map(|raw| match raw {
        RawValue::Text(text) => text,
        RawValue::Integer(value) => value.to_string(),
        RawValue::Float(value) => value.to_string(),
        RawValue::Flag(value) => value.to_string(),
        RawValue::Other(IgnoredAny) => String::from("<nested value>"),
    }))
}
