// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.
//!
//! Event instants are stored in UTC and rendered in a single display zone.

use chrono::{DateTime, Datelike, Duration, SecondsFormat, Utc, Weekday};
use chrono_tz::Tz;

/// Length assumed for calendar entries; the feed carries no end time.
pub const DEFAULT_EVENT_DURATION_HOURS: i64 = 3;

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Compact UTC stamp used by calendar links and iCalendar, e.g. `20240608T153000Z`.
pub fn format_calendar_timestamp(date: DateTime<Utc>) -> String {
    date.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Chinese day-of-week label.
pub fn weekday_cn(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "周一",
        Weekday::Tue => "周二",
        Weekday::Wed => "周三",
        Weekday::Thu => "周四",
        Weekday::Fri => "周五",
        Weekday::Sat => "周六",
        Weekday::Sun => "周日",
    }
}

/// Every display string derived from an event's start time.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeParts {
    /// Upper-case short month, e.g. `JUN`
    pub month: String,
    /// Two-digit day of month
    pub day: String,
    pub year: i32,
    /// Year differs from the current year in the display zone
    pub show_year: bool,
    /// e.g. `Saturday`
    pub weekday_en: String,
    /// e.g. `周六`
    pub weekday_cn: &'static str,
    /// 12-hour clock, e.g. `8:30 AM`
    pub time_label: String,
    /// `YYYY-MM-DD HH:MM:SS±HH:MM` in the display zone
    pub local_iso: String,
    pub calendar_start: String,
    pub calendar_end: String,
}

impl TimeParts {
    /// Build the display strings for `start`.
    ///
    /// Returns `None` if the default end time overflows the supported range.
    pub fn new(start: DateTime<Utc>, now: DateTime<Utc>, tz: Tz) -> Option<Self> {
        let local = start.with_timezone(&tz);
        let end = start.checked_add_signed(Duration::hours(DEFAULT_EVENT_DURATION_HOURS))?;

        Some(Self {
            month: local.format("%b").to_string().to_uppercase(),
            day: local.format("%d").to_string(),
            year: local.year(),
            show_year: local.year() != now.with_timezone(&tz).year(),
            weekday_en: local.format("%A").to_string(),
            weekday_cn: weekday_cn(local.weekday()),
            time_label: local.format("%-I:%M %p").to_string(),
            local_iso: local.format("%Y-%m-%d %H:%M:%S%:z").to_string(),
            calendar_start: format_calendar_timestamp(start),
            calendar_end: format_calendar_timestamp(end),
        })
    }
}

/// Relative day label (今天, 明天, 后天, 昨天) comparing calendar dates in `tz`.
pub fn relative_day_label(start: DateTime<Utc>, now: DateTime<Utc>, tz: Tz) -> &'static str {
    let event_day = start.with_timezone(&tz).date_naive();
    let today = now.with_timezone(&tz).date_naive();
    match (event_day - today).num_days() {
        0 => "今天",
        1 => "明天",
        2 => "后天",
        -1 => "昨天",
        _ => "",
    }
}

/// Footer label, e.g. `Updated on 06/01/24, 05:00`.
pub fn updated_label(now: DateTime<Utc>, tz: Tz) -> String {
    format!("Updated on {}", now.with_timezone(&tz).format("%m/%d/%y, %H:%M"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::America::Los_Angeles;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_time_parts_in_pacific_daylight_time() {
        let now = utc("2024-06-01T12:00:00Z");
        let parts = TimeParts::new(utc("2024-06-08T15:30:00Z"), now, Los_Angeles).unwrap();

        assert_eq!(parts.month, "JUN");
        assert_eq!(parts.day, "08");
        assert_eq!(parts.year, 2024);
        assert!(!parts.show_year);
        assert_eq!(parts.weekday_en, "Saturday");
        assert_eq!(parts.weekday_cn, "周六");
        assert_eq!(parts.time_label, "8:30 AM");
        assert_eq!(parts.local_iso, "2024-06-08 08:30:00-07:00");
        assert_eq!(parts.calendar_start, "20240608T153000Z");
        assert_eq!(parts.calendar_end, "20240608T183000Z");
    }

    #[test]
    fn test_time_parts_local_date_differs_from_utc() {
        // 02:00 UTC on Jan 1 is still Dec 31 in California
        let now = utc("2024-06-01T12:00:00Z");
        let parts = TimeParts::new(utc("2025-01-01T02:00:00Z"), now, Los_Angeles).unwrap();

        assert_eq!(parts.month, "DEC");
        assert_eq!(parts.day, "31");
        assert_eq!(parts.year, 2024);
        assert!(!parts.show_year);
        assert_eq!(parts.time_label, "6:00 PM");
        assert_eq!(parts.local_iso, "2024-12-31 18:00:00-08:00");
    }

    #[test]
    fn test_show_year_for_other_years() {
        let now = utc("2024-06-01T12:00:00Z");
        let parts = TimeParts::new(utc("2023-05-30T16:00:00Z"), now, Los_Angeles).unwrap();
        assert!(parts.show_year);
        assert_eq!(parts.year, 2023);
    }

    #[test]
    fn test_relative_day_label() {
        // 05:00 local on June 1
        let now = utc("2024-06-01T12:00:00Z");
        assert_eq!(relative_day_label(utc("2024-06-01T22:00:00Z"), now, Los_Angeles), "今天");
        // 18:00 local on June 1, despite being June 2 in UTC
        assert_eq!(relative_day_label(utc("2024-06-02T01:00:00Z"), now, Los_Angeles), "今天");
        assert_eq!(relative_day_label(utc("2024-06-02T16:00:00Z"), now, Los_Angeles), "明天");
        assert_eq!(relative_day_label(utc("2024-06-03T16:00:00Z"), now, Los_Angeles), "后天");
        assert_eq!(relative_day_label(utc("2024-05-31T16:00:00Z"), now, Los_Angeles), "昨天");
        assert_eq!(relative_day_label(utc("2024-06-10T16:00:00Z"), now, Los_Angeles), "");
    }

    #[test]
    fn test_updated_label() {
        let now = utc("2024-06-01T12:00:00Z");
        assert_eq!(updated_label(now, Los_Angeles), "Updated on 06/01/24, 05:00");
    }

    #[test]
    fn test_format_utc_rfc3339() {
        assert_eq!(
            format_utc_rfc3339(utc("2024-06-01T12:00:00.250Z")),
            "2024-06-01T12:00:00Z"
        );
    }
}
