// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Calendar export: Google Calendar template links and iCalendar files.

use crate::models::NormalizedEvent;
use crate::time_utils::{format_calendar_timestamp, DEFAULT_EVENT_DURATION_HOURS};
use chrono::{DateTime, Duration, Utc};

const GOOGLE_CALENDAR_URL: &str = "https://calendar.google.com/calendar/render";

/// iCalendar content lines are folded at 75 octets.
const ICS_LINE_LIMIT: usize = 75;

/// The fields a calendar entry needs.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEntry {
    /// Globally unique id for the VEVENT
    pub uid: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub location: String,
    /// Link back to the announcement, used as the description
    pub url: String,
}

impl CalendarEntry {
    /// Entry for an event, using the default duration.
    ///
    /// Returns `None` if the end time overflows.
    pub fn from_event(event: &NormalizedEvent) -> Option<Self> {
        let end = event
            .start
            .checked_add_signed(Duration::hours(DEFAULT_EVENT_DURATION_HOURS))?;
        Some(Self {
            uid: format!("{}@haoqiyou", event.element_id()),
            title: event.title.clone(),
            start: event.start,
            end,
            location: event.location().to_string(),
            url: event.source_event_url().to_string(),
        })
    }

    /// "Add to Google Calendar" link.
    pub fn google_calendar_url(&self) -> String {
        format!(
            "{}?action=TEMPLATE&text={}&dates={}/{}&details={}&location={}",
            GOOGLE_CALENDAR_URL,
            urlencoding::encode(&self.title),
            format_calendar_timestamp(self.start),
            format_calendar_timestamp(self.end),
            urlencoding::encode(&self.url),
            urlencoding::encode(&self.location),
        )
    }

    /// VEVENT block, CRLF-terminated lines.
    pub fn to_vevent(&self, stamp: DateTime<Utc>) -> String {
        let mut lines = vec![
            "BEGIN:VEVENT".to_string(),
            format!("UID:{}", escape_text(&self.uid)),
            format!("DTSTAMP:{}", format_calendar_timestamp(stamp)),
            format!("DTSTART:{}", format_calendar_timestamp(self.start)),
            format!("DTEND:{}", format_calendar_timestamp(self.end)),
            format!("SUMMARY:{}", escape_text(&self.title)),
        ];
        if !self.location.is_empty() {
            lines.push(format!("LOCATION:{}", escape_text(&self.location)));
        }
        if !self.url.is_empty() {
            lines.push(format!("DESCRIPTION:{}", escape_text(&self.url)));
            // URI values are not escaped, so anything that could end the line is dropped
            if self.url.starts_with("http") && !self.url.chars().any(char::is_control) {
                lines.push(format!("URL:{}", self.url));
            }
        }
        lines.push("END:VEVENT".to_string());

        lines.iter().map(|l| fold_line(l)).collect()
    }
}

/// Full VCALENDAR document for a set of entries.
pub fn to_ics(entries: &[CalendarEntry], stamp: DateTime<Utc>) -> String {
    let mut out = String::new();
    out.push_str("BEGIN:VCALENDAR\r\n");
    out.push_str("VERSION:2.0\r\n");
    out.push_str("PRODID:-//haoqiyou//ride board//EN\r\n");
    out.push_str("CALSCALE:GREGORIAN\r\n");
    for entry in entries {
        out.push_str(&entry.to_vevent(stamp));
    }
    out.push_str("END:VCALENDAR\r\n");
    out
}

/// Escape a TEXT value (RFC 5545 section 3.3.11).
fn escape_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            ';' => escaped.push_str("\\;"),
            ',' => escaped.push_str("\\,"),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            other => escaped.push(other),
        }
    }
    escaped
}

/// Fold a content line into chunks of at most 75 octets, never splitting a
/// UTF-8 sequence, and terminate it with CRLF.
fn fold_line(line: &str) -> String {
    let mut out = String::with_capacity(line.len() + 8);
    let mut width = 0;
    for c in line.chars() {
        let len = c.len_utf8();
        if width + len > ICS_LINE_LIMIT {
            out.push_str("\r\n ");
            // continuation lines start with the space
            width = 1;
        }
        out.push(c);
        width += len;
    }
    out.push_str("\r\n");
    out
}
