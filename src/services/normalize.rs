// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Feed normalization: raw records in, canonical events out.

use crate::models::NormalizedEvent;
use serde_json::Value;

/// Normalize every record, dropping inactive and undated ones.
pub fn normalize_feed(records: &[Value]) -> Vec<NormalizedEvent> {
    let events: Vec<NormalizedEvent> = records
        .iter()
        .filter_map(NormalizedEvent::from_raw)
        .collect();

    let dropped = records.len() - events.len();
    if dropped > 0 {
        tracing::debug!(dropped, "Dropped inactive or undated records");
    }
    tracing::info!(count = events.len(), "Normalized events");

    events
}
