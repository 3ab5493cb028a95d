//! Event payload and the per-dispatch rendering context.

use jiff::fmt::strtime;
use jiff::{Timestamp, Zoned};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Category used to look up subscriptions interested in an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    /// An application build failed
    BuildError,
}

impl EventCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::BuildError => "build_error",
        }
    }
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A build failure as reported by the upstream pipeline.
///
/// `error_message` may be empty and may hold arbitrary control characters.
/// `build_link` is passed through to senders untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    #[validate(length(min = 1, message = "Project name is required"))]
    pub project_name: String,
    #[validate(length(min = 1, message = "Application name is required"))]
    pub application_name: String,
    #[validate(length(min = 1, message = "Application type is required"))]
    pub application_type: String,
    #[serde(default)]
    pub error_message: String,
    pub build_link: String,
    #[validate(length(min = 1, message = "Owner id is required"))]
    pub owner_id: String,
}

impl EventPayload {
    pub fn category(&self) -> EventCategory {
        EventCategory::BuildError
    }
}

/// Everything a formatter needs, captured once per dispatch.
///
/// The instant is sampled a single time so every channel rendered in the
/// same dispatch shows the identical date and time.
#[derive(Debug, Clone)]
pub struct DispatchContext {
    event: EventPayload,
    occurred_at: Zoned,
    display_time: String,
}

impl DispatchContext {
    /// Builds a context for `event` at `occurred_at`.
    ///
    /// `date_format` is a `strftime` pattern applied in the instant's time zone.
    /// An unusable pattern falls back to jiff's RFC 9557 rendering.
    pub fn new(event: EventPayload, occurred_at: Zoned, date_format: &str) -> Self {
        let display_time = strtime::format(date_format, &occurred_at)
            .unwrap_or_else(|_| occurred_at.to_string());
        Self {
            event,
            occurred_at,
            display_time,
        }
    }

    pub fn event(&self) -> &EventPayload {
        &self.event
    }

    pub fn timestamp(&self) -> Timestamp {
        self.occurred_at.timestamp()
    }

    pub fn unix_seconds(&self) -> i64 {
        self.occurred_at.timestamp().as_second()
    }

    /// UTC ISO-8601 with millisecond precision, e.g. `2024-06-01T12:00:00.000Z`.
    pub fn iso_timestamp(&self) -> String {
        format!("{:.3}", self.occurred_at.timestamp())
    }

    /// Human readable local date and time.
    pub fn display_time(&self) -> &str {
        &self.display_time
    }
}
