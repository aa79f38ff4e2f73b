// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Route geometry from encoded polylines.

use crate::models::LatLng;
use geo::{BoundingRect, Coord, LineString};
use serde::Serialize;

/// Precision of the encoded polylines in the feed (Strava/Google format).
pub const POLYLINE_PRECISION: u32 = 5;

/// Stroke color for route overlays.
pub const ROUTE_COLOR: &str = "#007bf6";

/// A decoded route ready to draw on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteOverlay {
    /// Element id of the event the route belongs to
    pub event_id: String,
    pub points: Vec<LatLng>,
    /// `[south_west, north_east]`
    pub bounds: Option<[LatLng; 2]>,
    pub color: &'static str,
    pub weight: u32,
    pub opacity: f64,
}

impl RouteOverlay {
    /// Decode an event's route. Blank or invalid polylines yield `None`.
    pub fn from_encoded(event_id: &str, encoded: &str) -> Option<Self> {
        let encoded = encoded.trim();
        if encoded.is_empty() {
            return None;
        }

        let line = match polyline::decode_polyline(encoded, POLYLINE_PRECISION) {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(event_id, error = %e, "Ignoring invalid route polyline");
                return None;
            }
        };

        let bounds = line.bounding_rect().map(|rect| {
            [
                LatLng {
                    lat: rect.min().y,
                    lng: rect.min().x,
                },
                LatLng {
                    lat: rect.max().y,
                    lng: rect.max().x,
                },
            ]
        });

        Some(Self {
            event_id: event_id.to_string(),
            points: to_lat_lngs(&line),
            bounds,
            color: ROUTE_COLOR,
            weight: 4,
            opacity: 1.0,
        })
    }
}

/// Decode an encoded polyline into `(lat, lng)` points.
pub fn decode_route(encoded: &str) -> Result<Vec<LatLng>, RouteError> {
    let line = polyline::decode_polyline(encoded, POLYLINE_PRECISION)
        .map_err(|e| RouteError::Decode(e.to_string()))?;
    Ok(to_lat_lngs(&line))
}

/// Encode `(lat, lng)` points as a polyline.
pub fn encode_route(points: &[LatLng]) -> Result<String, RouteError> {
    let coords = points.iter().map(|p| Coord { x: p.lng, y: p.lat });
    polyline::encode_coordinates(coords, POLYLINE_PRECISION)
        .map_err(|e| RouteError::Encode(e.to_string()))
}

fn to_lat_lngs(line: &LineString<f64>) -> Vec<LatLng> {
    line.coords()
        .map(|c| LatLng { lat: c.y, lng: c.x })
        .collect()
}

/// Errors from route geometry.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("Failed to decode polyline: {0}")]
    Decode(String),

    #[error("Failed to encode polyline: {0}")]
    Encode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    // Reference example from the encoded polyline format documentation
    const REFERENCE: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

    fn reference_points() -> Vec<LatLng> {
        vec![
            LatLng {
                lat: 38.5,
                lng: -120.2,
            },
            LatLng {
                lat: 40.7,
                lng: -120.95,
            },
            LatLng {
                lat: 43.252,
                lng: -126.453,
            },
        ]
    }

    fn assert_close(actual: &[LatLng], expected: &[LatLng]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a.lat - e.lat).abs() < 1e-5, "lat {} vs {}", a.lat, e.lat);
            assert!((a.lng - e.lng).abs() < 1e-5, "lng {} vs {}", a.lng, e.lng);
        }
    }

    #[test]
    fn test_decode_reference_polyline() {
        let points = decode_route(REFERENCE).expect("reference should decode");
        assert_close(&points, &reference_points());
    }

    #[test]
    fn test_encode_reference_points() {
        let encoded = encode_route(&reference_points()).expect("points should encode");
        assert_eq!(encoded, REFERENCE);
        assert_close(&decode_route(&encoded).unwrap(), &reference_points());
    }

    #[test]
    fn test_overlay_from_encoded() {
        let overlay = RouteOverlay::from_encoded("event-1", REFERENCE).expect("overlay");
        assert_eq!(overlay.event_id, "event-1");
        assert_eq!(overlay.points.len(), 3);
        assert_eq!(overlay.color, "#007bf6");

        let [south_west, north_east] = overlay.bounds.expect("bounds");
        assert!((south_west.lat - 38.5).abs() < 1e-5);
        assert!((south_west.lng - -126.453).abs() < 1e-5);
        assert!((north_east.lat - 43.252).abs() < 1e-5);
        assert!((north_east.lng - -120.2).abs() < 1e-5);
    }

    #[test]
    fn test_overlay_ignores_blank_and_invalid() {
        assert!(RouteOverlay::from_encoded("event-1", "   ").is_none());
        assert!(RouteOverlay::from_encoded("event-1", "invalid!!!").is_none());
    }
}
