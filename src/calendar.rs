//! Google Calendar "add event" link for the invite page

use chrono::NaiveDateTime;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};

const EVENT_EDIT_URL: &str = "https://calendar.google.com/calendar/r/eventedit";

/// Everything except unreserved characters (`A-Z a-z 0-9 - _ . ~`)
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Compact local timestamp format expected by the `dates` parameter
const DATE_FORMAT: &str = "%Y%m%dT%H%M%S";

/// The date being proposed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub title: String,
    /// Local (floating) start time
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub details: String,
    /// Guest email addresses added to the event
    #[serde(default)]
    pub attendees: Vec<String>,
}

impl Default for CalendarEvent {
    fn default() -> Self {
        let day = chrono::NaiveDate::from_ymd_opt(2025, 2, 13).unwrap_or_default();
        Self {
            title: "valentine's date".to_string(),
            start: day.and_hms_opt(17, 0, 0).unwrap_or_default(),
            end: day.and_hms_opt(19, 0, 0).unwrap_or_default(),
            details: "let me know if this works or if another time is better. \
                      otherwise, ill meet you at yours :)"
                .to_string(),
            attendees: Vec::new(),
        }
    }
}

impl CalendarEvent {
    /// `dates` parameter value: `START/END`
    pub fn dates(&self) -> String {
        format!(
            "{}/{}",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }

    /// Full event-edit link with every field form-encoded
    pub fn url(&self) -> String {
        let mut url = format!(
            "{}?text={}&dates={}&details={}",
            EVENT_EDIT_URL,
            form_encode(&self.title),
            self.dates(),
            form_encode(&self.details)
        );
        for attendee in &self.attendees {
            url.push_str("&add=");
            url.push_str(&form_encode(attendee));
        }
        url
    }
}

/// Form-style query value: unreserved bytes pass through, space becomes `+`,
/// the rest `%XX`. A literal `%` is encoded as `%25`, so every `%20` left is a space.
fn form_encode(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE)
        .to_string()
        .replace("%20", "+")
}
