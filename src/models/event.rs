// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Canonical meetup event built from a raw feed record.

use crate::models::marker::LatLng;
use crate::models::raw::{is_active, media_urls, normalize_text, parse_date, parse_number};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// Where an event was announced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Strava,
    Wechat,
    News,
    Other(String),
}

impl SourceKind {
    pub fn parse(value: &str) -> Self {
        match value {
            "strava" => SourceKind::Strava,
            "wechat" => SourceKind::Wechat,
            "news" => SourceKind::News,
            other => SourceKind::Other(other.to_string()),
        }
    }
}

/// External links attached to an event.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EventLinks {
    /// Route page (RideWithGPS, Strava route, ...)
    pub route_url: String,
    /// Page the event was announced on
    pub source_url: String,
    /// Strava club event page
    pub strava_url: String,
}

/// A normalized event. Construct with [`NormalizedEvent::from_raw`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedEvent {
    pub id: String,
    pub source_kind: SourceKind,
    pub source_group_id: i64,
    pub source_group_name: String,
    /// Event start instant
    pub start: DateTime<Utc>,
    pub meet_up_location: String,
    /// Free text, expected as `"lat,lng"`
    pub gps_coordinates: String,
    pub distance_meters: f64,
    pub elevation_gain_meters: f64,
    pub organizer: String,
    pub title: String,
    pub description: String,
    /// Event photos, in feed order
    pub picture_urls: Vec<String>,
    /// Static route map image
    pub route_map_url: String,
    /// Encoded route polyline (precision 5)
    pub route_polyline: String,
    pub links: EventLinks,
    pub expected_participants: String,
    pub actual_participants: String,
}

impl NormalizedEvent {
    /// Normalize one raw record.
    ///
    /// Returns `None` when the record must be dropped: it is not an object,
    /// it is explicitly inactive, or it has no resolvable start time.
    pub fn from_raw(raw: &Value) -> Option<Self> {
        let record = raw.as_object()?;
        if !is_active(record.get("is_active")) {
            return None;
        }
        let start = parse_date(record.get("event_time_utc"))?;
        let text = |key: &str| normalize_text(record.get(key));

        let mut picture_urls = media_urls(record.get("event_picture_urls"));
        if picture_urls.is_empty() {
            let single = text("event_picture_url");
            if !single.is_empty() {
                picture_urls.push(single);
            }
        }

        Some(Self {
            id: text("_id"),
            source_kind: SourceKind::parse(&text("source_type")),
            source_group_id: parse_number(record.get("source_group_id")) as i64,
            source_group_name: text("source_group_name"),
            start,
            meet_up_location: text("meet_up_location"),
            gps_coordinates: text("gps_coordinates"),
            distance_meters: parse_number(record.get("distance_meters")),
            elevation_gain_meters: parse_number(record.get("elevation_gain_meters")),
            organizer: text("organizer"),
            title: text("title"),
            description: text("description"),
            picture_urls,
            route_map_url: text("route_map_url"),
            route_polyline: text("route_polyline"),
            links: EventLinks {
                route_url: text("route_url"),
                source_url: text("source_url"),
                strava_url: text("strava_url"),
            },
            expected_participants: text("expected_participants_number"),
            actual_participants: text("actual_participants_number"),
        })
    }

    /// DOM id used for the event card, popup and marker.
    pub fn element_id(&self) -> String {
        format!("event-{}", self.id)
    }

    /// Meetup position, if the coordinate text is exactly two numbers.
    pub fn position(&self) -> Option<LatLng> {
        LatLng::parse(&self.gps_coordinates)
    }

    /// Meetup location text, falling back to the coordinates.
    pub fn location(&self) -> &str {
        if self.meet_up_location.is_empty() {
            &self.gps_coordinates
        } else {
            &self.meet_up_location
        }
    }

    /// Best link for the route.
    pub fn route_url(&self) -> &str {
        let links = &self.links;
        if !links.route_url.is_empty() {
            &links.route_url
        } else if !links.strava_url.is_empty() {
            &links.strava_url
        } else if links.source_url.starts_with("http") {
            &links.source_url
        } else {
            ""
        }
    }

    /// Link back to where the event was announced, else the route link.
    pub fn source_event_url(&self) -> &str {
        if self.links.source_url.is_empty() {
            self.route_url()
        } else {
            &self.links.source_url
        }
    }

    /// Group name prefixed with the kind of source.
    pub fn source_group_label(&self) -> String {
        let name = &self.source_group_name;
        match self.source_kind {
            SourceKind::Strava => format!("Strava Club - {name}"),
            SourceKind::Wechat => format!("微信群 - {name}"),
            SourceKind::News => format!("新闻 - {name}"),
            SourceKind::Other(_) => name.clone(),
        }
    }

    /// Coarse region badge for the meetup point.
    pub fn area(&self) -> Option<&'static str> {
        let LatLng { lat, lng } = self.position()?;
        if (35.0..=40.0).contains(&lat) && (-123.3..=-119.5).contains(&lng) {
            Some("北加")
        } else if (32.0..=35.0).contains(&lat) && (-120.0..=-114.0).contains(&lng) {
            Some("南加")
        } else {
            None
        }
    }
}

/// Participant count worth showing: non-empty and not `"0"`.
pub fn shown_participants(count: &str) -> Option<&str> {
    if count.is_empty() || count == "0" {
        None
    } else {
        Some(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn raw_event() -> Value {
        json!({
            "_id": {"$oid": "66b0c1"},
            "source_type": "strava",
            "source_group_id": {"$numberLong": "908336"},
            "source_group_name": "Bay Riders",
            "event_time_utc": {"$date": "2024-06-08T15:30:00Z"},
            "meet_up_location": "  Cañada College  ",
            "gps_coordinates": "37.4478, -122.2645",
            "distance_meters": "80467.2",
            "elevation_gain_meters": {"$numberInt": "1200"},
            "organizer": "Lin",
            "title": "Saturday Skyline",
            "description": "Bring lights",
            "event_picture_urls": ["https://img/1.jpg", ""],
            "route_url": "",
            "strava_url": "https://www.strava.com/clubs/908336/group_events/1",
            "source_url": "",
            "expected_participants_number": 20,
            "is_active": true
        })
    }

    #[test]
    fn test_from_raw_normalizes_fields() {
        let event = NormalizedEvent::from_raw(&raw_event()).expect("event should normalize");

        assert_eq!(event.id, "66b0c1");
        assert_eq!(event.element_id(), "event-66b0c1");
        assert_eq!(event.source_kind, SourceKind::Strava);
        assert_eq!(event.source_group_id, 908336);
        assert_eq!(event.start, Utc.with_ymd_and_hms(2024, 6, 8, 15, 30, 0).unwrap());
        assert_eq!(event.meet_up_location, "Cañada College");
        assert_eq!(event.distance_meters, 80467.2);
        assert_eq!(event.elevation_gain_meters, 1200.0);
        assert_eq!(event.picture_urls, vec!["https://img/1.jpg"]);
        assert_eq!(event.expected_participants, "20");
        assert_eq!(event.actual_participants, "");
    }

    #[test]
    fn test_from_raw_drop_rules() {
        assert!(NormalizedEvent::from_raw(&Value::Null).is_none());
        assert!(NormalizedEvent::from_raw(&json!("event")).is_none());

        let mut inactive = raw_event();
        inactive["is_active"] = json!(false);
        assert!(NormalizedEvent::from_raw(&inactive).is_none());

        let mut undated = raw_event();
        undated["event_time_utc"] = json!("TBD");
        assert!(NormalizedEvent::from_raw(&undated).is_none());

        let mut missing_flag = raw_event();
        missing_flag.as_object_mut().unwrap().remove("is_active");
        assert!(NormalizedEvent::from_raw(&missing_flag).is_some());
    }

    #[test]
    fn test_single_picture_fallback() {
        let mut raw = raw_event();
        raw["event_picture_urls"] = json!("not-a-list");
        raw["event_picture_url"] = json!("https://img/cover.jpg");
        let event = NormalizedEvent::from_raw(&raw).unwrap();
        assert_eq!(event.picture_urls, vec!["https://img/cover.jpg"]);
    }

    #[test]
    fn test_link_resolution() {
        let event = NormalizedEvent::from_raw(&raw_event()).unwrap();
        assert_eq!(
            event.route_url(),
            "https://www.strava.com/clubs/908336/group_events/1"
        );
        assert_eq!(event.source_event_url(), event.route_url());

        let mut raw = raw_event();
        raw["strava_url"] = json!("");
        raw["source_url"] = json!("wechat-article-123");
        let event = NormalizedEvent::from_raw(&raw).unwrap();
        assert_eq!(event.route_url(), "");
        assert_eq!(event.source_event_url(), "wechat-article-123");
    }

    #[test]
    fn test_source_group_label() {
        let mut event = NormalizedEvent::from_raw(&raw_event()).unwrap();
        assert_eq!(event.source_group_label(), "Strava Club - Bay Riders");
        event.source_kind = SourceKind::Wechat;
        assert_eq!(event.source_group_label(), "微信群 - Bay Riders");
        event.source_kind = SourceKind::News;
        assert_eq!(event.source_group_label(), "新闻 - Bay Riders");
        event.source_kind = SourceKind::parse("meetup");
        assert_eq!(event.source_group_label(), "Bay Riders");
    }

    #[test]
    fn test_location_and_area() {
        let mut event = NormalizedEvent::from_raw(&raw_event()).unwrap();
        assert_eq!(event.location(), "Cañada College");
        assert_eq!(event.area(), Some("北加"));

        event.meet_up_location.clear();
        event.gps_coordinates = "33.9, -118.4".to_string();
        assert_eq!(event.location(), "33.9, -118.4");
        assert_eq!(event.area(), Some("南加"));

        event.gps_coordinates = "47.6,-122.3".to_string();
        assert_eq!(event.area(), None);

        event.gps_coordinates = "abc,123".to_string();
        assert_eq!(event.position(), None);
        assert_eq!(event.area(), None);
    }

    #[test]
    fn test_shown_participants() {
        assert_eq!(shown_participants(""), None);
        assert_eq!(shown_participants("0"), None);
        assert_eq!(shown_participants("15+"), Some("15+"));
    }
}
