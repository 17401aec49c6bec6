// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, Duration, OffsetDateTime, PrimitiveDateTime};

const SECONDS_PER_HOUR: i64 = 3600;

/// Input layouts accepted from pickers and stored records, tried in order.
const LOCAL_FORMATS: [&[BorrowedFormatItem<'static>]; 6] = [
    format_description!("[year]-[month]-[day]T[hour]:[minute]"),
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
    format_description!("[year]-[month]-[day] [hour]:[minute]"),
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond]"),
];

const DISPLAY_MINUTES: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]");

const DISPLAY_SECONDS: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

/// A wall-clock date and time as chosen in a schedule picker.
///
/// Timestamps carry no timezone. When an input string includes an offset the
/// offset is dropped and the local reading is kept as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(PrimitiveDateTime);

impl Timestamp {
    /// Wraps an existing `PrimitiveDateTime`.
    #[must_use]
    pub const fn new(value: PrimitiveDateTime) -> Self {
        Self(value)
    }

    /// Parses a timestamp from an ISO 8601 style string.
    ///
    /// Accepted layouts:
    /// - `YYYY-MM-DDTHH:MM` with optional seconds and fraction
    /// - the same with a space instead of `T`
    /// - RFC 3339 with an offset (offset discarded)
    ///
    /// # Errors
    ///
    /// Returns `DomainError::TimestampParse` if no layout matches.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let trimmed: &str = input.trim();

        for format in LOCAL_FORMATS {
            if let Ok(value) = PrimitiveDateTime::parse(trimmed, format) {
                return Ok(Self(value));
            }
        }

        OffsetDateTime::parse(trimmed, &Rfc3339)
            .map(|value| Self(PrimitiveDateTime::new(value.date(), value.time())))
            .map_err(|err| DomainError::TimestampParse {
                input: input.to_string(),
                error: err.to_string(),
            })
    }

    /// Returns the calendar date.
    #[must_use]
    pub const fn date(&self) -> Date {
        self.0.date()
    }

    /// Adds whole hours to the wall-clock reading.
    ///
    /// Crossing midnight simply rolls the date forward. Returns `None` on
    /// overflow.
    #[must_use]
    pub fn checked_add_hours(&self, hours: i64) -> Option<Self> {
        let seconds: i64 = hours.checked_mul(SECONDS_PER_HOUR)?;
        self.0.checked_add(Duration::seconds(seconds)).map(Self)
    }

    /// Renders the timestamp as `YYYY-MM-DDTHH:MM`, adding seconds only when
    /// they are non-zero.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::TimestampFormat` if formatting fails.
    pub fn to_iso_string(&self) -> Result<String, DomainError> {
        let format: &[BorrowedFormatItem<'static>] =
            if self.0.second() == 0 && self.0.nanosecond() == 0 {
                DISPLAY_MINUTES
            } else {
                DISPLAY_SECONDS
            };

        self.0
            .format(format)
            .map_err(|err| DomainError::TimestampFormat {
                error: err.to_string(),
            })
    }
}

impl FromStr for Timestamp {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rendered: String = self.to_iso_string().map_err(|_| std::fmt::Error)?;
        f.write_str(&rendered)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let rendered: String = self
            .to_iso_string()
            .map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&rendered)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: String = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// One of the three chained schedule fields on a nomination.
///
/// The chain runs `PilotOnBoard` → `Etb` → `Etc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScheduleField {
    /// Pilot on board.
    PilotOnBoard,
    /// Estimated time of berthing.
    Etb,
    /// Estimated time of completion.
    Etc,
}

impl ScheduleField {
    /// Every field, in chain order.
    pub const ALL: [Self; 3] = [Self::PilotOnBoard, Self::Etb, Self::Etc];

    /// Returns the record key for this field.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::PilotOnBoard => "pilotOnBoard",
            Self::Etb => "etb",
            Self::Etc => "etc",
        }
    }

    /// Returns the label shown to users.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::PilotOnBoard => "Pilot On Board",
            Self::Etb => "ETB",
            Self::Etc => "ETC",
        }
    }

    /// Returns the field this one must follow, if any.
    #[must_use]
    pub const fn upstream(&self) -> Option<Self> {
        match self {
            Self::PilotOnBoard => None,
            Self::Etb => Some(Self::PilotOnBoard),
            Self::Etc => Some(Self::Etb),
        }
    }

    /// Returns the field constrained by this one, if any.
    #[must_use]
    pub const fn downstream(&self) -> Option<Self> {
        match self {
            Self::PilotOnBoard => Some(Self::Etb),
            Self::Etb => Some(Self::Etc),
            Self::Etc => None,
        }
    }

    /// Builds the user-facing message for a field that is too close to its
    /// upstream neighbor.
    ///
    /// Returns `None` for `PilotOnBoard`, which has nothing upstream.
    #[must_use]
    pub fn violation_message(&self, min_offset_hours: i64) -> Option<String> {
        self.upstream().map(|upstream| {
            format!(
                "{} must be at least {min_offset_hours} hours after {} time",
                self.label(),
                upstream.label()
            )
        })
    }
}

impl FromStr for ScheduleField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pilotOnBoard" | "pilot_on_board" => Ok(Self::PilotOnBoard),
            "etb" => Ok(Self::Etb),
            "etc" => Ok(Self::Etc),
            _ => Err(DomainError::UnknownField(s.to_string())),
        }
    }
}

impl std::fmt::Display for ScheduleField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Whether the form is creating a new nomination or editing a stored one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// A new record. Every value goes through the offset rules.
    #[default]
    Create,
    /// A stored record was loaded. Historical values may be kept as-is.
    Edit,
}

impl ValidationMode {
    /// Converts this mode to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Edit => "edit",
        }
    }

    /// Checks if a transition from this mode to another is valid.
    ///
    /// The only transition is `Create` → `Edit`. Going back requires a fresh
    /// manager.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!((self, target), (Self::Create, Self::Edit))
    }
}

impl FromStr for ValidationMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(Self::Create),
            "edit" => Ok(Self::Edit),
            _ => Err(DomainError::InvalidMode(s.to_string())),
        }
    }
}

impl std::fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
