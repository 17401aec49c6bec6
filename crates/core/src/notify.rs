// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use nomination_domain::ScheduleField;
use serde::Serialize;
use tracing::{error, info, warn};

/// How a notification should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// A user-facing rejection.
    Error,
    /// An internal, non-fatal problem.
    Warning,
    /// Informational.
    Info,
}

/// A message for the host's toast or log area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// How the message should be presented.
    pub severity: Severity,
    /// The field the message is about, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<ScheduleField>,
    /// The message text.
    pub message: String,
}

impl Notification {
    /// Creates a user-facing error.
    #[must_use]
    pub fn error(field: Option<ScheduleField>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            field,
            message: message.into(),
        }
    }

    /// Creates an internal warning.
    #[must_use]
    pub fn warning(field: Option<ScheduleField>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            field,
            message: message.into(),
        }
    }

    /// Creates an informational message.
    #[must_use]
    pub fn info(field: Option<ScheduleField>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            field,
            message: message.into(),
        }
    }
}

/// Receives notifications from the validation manager.
pub trait NotificationSink {
    /// Delivers one notification. Must not fail.
    fn notify(&self, notification: &Notification);
}

/// Sink that writes every notification as a `tracing` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, notification: &Notification) {
        let field: &str = notification.field.map_or("-", |field| field.key());
        match notification.severity {
            Severity::Error => error!(field, "{}", notification.message),
            Severity::Warning => warn!(field, "{}", notification.message),
            Severity::Info => info!(field, "{}", notification.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_severity() {
        let err: Notification = Notification::error(Some(ScheduleField::Etb), "too early");
        assert_eq!(err.severity, Severity::Error);
        assert_eq!(err.field, Some(ScheduleField::Etb));
        assert_eq!(err.message, "too early");

        assert_eq!(
            Notification::warning(None, "missing").severity,
            Severity::Warning
        );
        assert_eq!(Notification::info(None, "loaded").severity, Severity::Info);
    }
}
