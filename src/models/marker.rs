// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Map marker descriptors handed to the map script.

use crate::models::bucket::Bucket;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A WGS84 position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Parse `"lat,lng"`. Anything other than exactly two finite numbers is rejected.
    pub fn parse(text: &str) -> Option<Self> {
        let mut parts = text.split(',');
        let lat = parse_component(parts.next()?)?;
        let lng = parse_component(parts.next()?)?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self { lat, lng })
    }

    /// Position moved by a `[Δlat, Δlng]` shift.
    pub fn shifted(self, shift: [f64; 2]) -> Self {
        Self {
            lat: self.lat + shift[0],
            lng: self.lng + shift[1],
        }
    }
}

fn parse_component(part: &str) -> Option<f64> {
    part.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Month/day label drawn above upcoming markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DateSpan {
    pub month: String,
    pub day: String,
}

/// One map pin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MarkerDescriptor {
    /// Tooltip, e.g. `"JUN 08: Saturday Skyline"`
    pub title: String,
    pub date_span: DateSpan,
    /// True meetup position
    pub position: LatLng,
    /// Offset applied when drawing, `[Δlat, Δlng]`
    pub shift: [f64; 2],
    /// Element id of the event card and popup
    pub id: String,
    pub icon_url: String,
    pub event_time_type: Bucket,
}

impl MarkerDescriptor {
    /// Where the pin is drawn.
    pub fn display_position(&self) -> LatLng {
        self.position.shifted(self.shift)
    }

    /// Whether the pin was moved off its true position.
    pub fn is_shifted(&self) -> bool {
        self.shift != [0.0, 0.0]
    }
}
