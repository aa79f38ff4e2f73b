// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use chrono::{DateTime, Utc};
use haoqiyou::config::Config;
use serde_json::{json, Value};

/// Fixed render instant used across tests.
#[allow(dead_code)]
pub fn now() -> DateTime<Utc> {
    utc("2024-06-01T12:00:00Z")
}

#[allow(dead_code)]
pub fn utc(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .expect("valid RFC 3339 fixture")
        .with_timezone(&Utc)
}

/// Config for tests: default zone and extra groups, no real sources.
#[allow(dead_code)]
pub fn test_config() -> Config {
    Config {
        feed_sources: vec![],
        ..Config::default()
    }
}

/// A raw feed record with sensible defaults.
#[allow(dead_code)]
pub fn raw_event(id: &str, time: &str, gps: &str) -> Value {
    json!({
        "_id": id,
        "source_type": "strava",
        "source_group_id": {"$numberLong": "1"},
        "source_group_name": "Test Club",
        "event_time_utc": time,
        "meet_up_location": format!("Meetup {id}"),
        "gps_coordinates": gps,
        "distance_meters": 40000,
        "elevation_gain_meters": "500",
        "organizer": "Organizer",
        "title": format!("Ride {id}"),
        "description": "",
        "is_active": true
    })
}

/// A small feed covering every bucket plus dropped records.
#[allow(dead_code)]
pub fn sample_feed() -> Vec<Value> {
    vec![
        raw_event("up-late", "2024-06-10T15:00:00Z", "37.40,-122.10"),
        raw_event("up-early", "2024-06-01T10:00:00Z", "37.40,-122.10"),
        raw_event("plan", "2024-06-20T00:00:00Z", "37.80,-122.40"),
        raw_event("past-old", "2024-04-01T16:00:00Z", "abc,123"),
        raw_event("past-recent", "2024-05-30T00:00:00Z", "37.4001,-122.0999"),
        json!({"_id": "inactive", "event_time_utc": "2024-06-02T00:00:00Z", "is_active": false}),
        json!({"_id": "undated", "event_time_utc": "someday"}),
        Value::Null,
    ]
}
