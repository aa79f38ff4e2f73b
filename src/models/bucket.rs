// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Time buckets an event is listed under.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Time bucket relative to the render instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Bucket {
    Upcoming,
    Planning,
    Past,
}

impl Bucket {
    /// Display order of the sections.
    pub const ALL: [Bucket; 3] = [Bucket::Upcoming, Bucket::Planning, Bucket::Past];

    pub fn as_str(self) -> &'static str {
        match self {
            Bucket::Upcoming => "upcoming",
            Bucket::Planning => "planning",
            Bucket::Past => "past",
        }
    }

    /// Map pin image for markers in this bucket.
    pub fn icon_url(self) -> &'static str {
        match self {
            Bucket::Upcoming => "https://maps.google.com/mapfiles/ms/icons/green-dot.png",
            Bucket::Planning => "https://maps.google.com/mapfiles/ms/icons/blue-dot.png",
            Bucket::Past => "https://maps.google.com/mapfiles/ms/icons/yellow-dot.png",
        }
    }

    /// Whether events in this bucket offer a calendar export.
    pub fn offers_calendar(self) -> bool {
        !matches!(self, Bucket::Past)
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
