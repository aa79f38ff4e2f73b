// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Map marker construction and overlap deconfliction.
//!
//! Markers whose meetup points nearly coincide are grouped, and each group
//! member is nudged by a fixed offset so the pins fan out into a rosette.
//! Grouping compares each axis independently against the group's first
//! member, not great-circle distance.

use crate::models::{Bucket, DateSpan, LatLng, MarkerDescriptor, NormalizedEvent};
use crate::time_utils::TimeParts;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value as GeoValue};
use serde_json::json;

/// Per-axis distance (degrees) under which two markers count as overlapping.
pub const GPS_OVERLAP_TOLERANCE: f64 = 0.03;

const T: f64 = GPS_OVERLAP_TOLERANCE;

/// Offsets `[Δlat, Δlng]` handed out to group members in order.
///
/// A tenth member wraps around to `[0, 0]` and lands on the first one again.
pub const GPS_SHIFTS: [[f64; 2]; 9] = [
    [0.0, 0.0],
    [0.0, -T],
    [T, 0.0],
    [0.0, T],
    [-T, 0.0],
    [T, -T],
    [T, T],
    [-T, T],
    [-T, -T],
];

/// Markers sharing (nearly) the same meetup point.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerGroup {
    /// Position of the first member
    pub anchor: LatLng,
    /// Indices into the marker list, in encounter order
    pub members: Vec<usize>,
}

impl MarkerGroup {
    fn accepts(&self, position: LatLng) -> bool {
        (self.anchor.lat - position.lat).abs() < GPS_OVERLAP_TOLERANCE
            && (self.anchor.lng - position.lng).abs() < GPS_OVERLAP_TOLERANCE
    }
}

/// Build the marker for an event, or `None` if its coordinates don't parse.
pub fn build_marker(
    event: &NormalizedEvent,
    bucket: Bucket,
    time: &TimeParts,
) -> Option<MarkerDescriptor> {
    let position = event.position()?;
    Some(MarkerDescriptor {
        title: format!("{} {}: {}", time.month, time.day, event.title),
        date_span: DateSpan {
            month: time.month.clone(),
            day: time.day.clone(),
        },
        position,
        shift: [0.0, 0.0],
        id: event.element_id(),
        icon_url: bucket.icon_url().to_string(),
        event_time_type: bucket,
    })
}

/// Group overlapping markers in list order.
pub fn group_markers(markers: &[MarkerDescriptor]) -> Vec<MarkerGroup> {
    let mut groups: Vec<MarkerGroup> = Vec::new();

    for (index, marker) in markers.iter().enumerate() {
        match groups.iter_mut().find(|g| g.accepts(marker.position)) {
            Some(group) => group.members.push(index),
            None => groups.push(MarkerGroup {
                anchor: marker.position,
                members: vec![index],
            }),
        }
    }

    groups
}

/// Assign each marker its offset within its overlap group.
pub fn assign_marker_shifts(markers: &mut [MarkerDescriptor]) -> Vec<MarkerGroup> {
    let groups = group_markers(markers);

    for group in &groups {
        for (slot, &index) in group.members.iter().enumerate() {
            markers[index].shift = GPS_SHIFTS[slot % GPS_SHIFTS.len()];
        }
    }

    let crowded = groups.iter().filter(|g| g.members.len() > 1).count();
    tracing::debug!(
        markers = markers.len(),
        groups = groups.len(),
        crowded,
        "Assigned marker shifts"
    );

    groups
}

/// GeoJSON layer for the map: one point per marker at its drawn position,
/// plus an origin dot and connector line for every shifted marker.
pub fn markers_geojson(markers: &[MarkerDescriptor]) -> FeatureCollection {
    let mut features = Vec::with_capacity(markers.len());

    for marker in markers {
        let shown = marker.display_position();
        features.push(feature(
            GeoValue::Point(vec![shown.lng, shown.lat]),
            json!({
                "kind": "marker",
                "id": marker.id,
                "title": marker.title,
                "icon_url": marker.icon_url,
                "event_time_type": marker.event_time_type,
                "month": marker.date_span.month,
                "day": marker.date_span.day,
            }),
        ));

        if marker.is_shifted() {
            let origin = marker.position;
            features.push(feature(
                GeoValue::Point(vec![origin.lng, origin.lat]),
                json!({ "kind": "origin", "id": marker.id }),
            ));
            features.push(feature(
                GeoValue::LineString(vec![
                    vec![origin.lng, origin.lat],
                    vec![shown.lng, shown.lat],
                ]),
                json!({ "kind": "shift", "id": marker.id }),
            ));
        }
    }

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

fn feature(value: GeoValue, properties: serde_json::Value) -> Feature {
    let properties: Option<JsonObject> = match properties {
        serde_json::Value::Object(map) => Some(map),
        _ => None,
    };
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id: None,
        properties,
        foreign_members: None,
    }
}
