// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Bucketing of events into upcoming, planning and past.
//!
//! Boundaries are `now - 6h` and `now + 14d`, both inclusive for upcoming.

use crate::models::{Bucket, NormalizedEvent};
use chrono::{DateTime, Duration, Utc};

/// How long a started event stays in the upcoming list.
pub const UPCOMING_GRACE_HOURS: i64 = 6;

/// How far ahead an event counts as upcoming rather than planning.
pub const UPCOMING_HORIZON_DAYS: i64 = 14;

/// Events partitioned by bucket, each list in display order.
#[derive(Debug, Clone, Default)]
pub struct CategorizedEvents {
    /// Ascending by start
    pub upcoming: Vec<NormalizedEvent>,
    /// Ascending by start
    pub planning: Vec<NormalizedEvent>,
    /// Descending by start
    pub past: Vec<NormalizedEvent>,
}

impl CategorizedEvents {
    pub fn bucket(&self, bucket: Bucket) -> &[NormalizedEvent] {
        match bucket {
            Bucket::Upcoming => &self.upcoming,
            Bucket::Planning => &self.planning,
            Bucket::Past => &self.past,
        }
    }

    pub fn len(&self) -> usize {
        self.upcoming.len() + self.planning.len() + self.past.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All events with their bucket, in section order.
    pub fn iter(&self) -> impl Iterator<Item = (Bucket, &NormalizedEvent)> {
        Bucket::ALL
            .into_iter()
            .flat_map(move |bucket| self.bucket(bucket).iter().map(move |e| (bucket, e)))
    }
}

/// Bucket for a single start instant.
pub fn classify(start: DateTime<Utc>, now: DateTime<Utc>) -> Bucket {
    let window_start = now - Duration::hours(UPCOMING_GRACE_HOURS);
    let window_end = now + Duration::days(UPCOMING_HORIZON_DAYS);

    if start > window_end {
        Bucket::Planning
    } else if start < window_start {
        Bucket::Past
    } else {
        Bucket::Upcoming
    }
}

/// Partition events relative to `now` and sort each bucket.
///
/// Sorting is stable, so events with equal start times keep feed order.
pub fn categorize(events: Vec<NormalizedEvent>, now: DateTime<Utc>) -> CategorizedEvents {
    let mut categorized = CategorizedEvents::default();

    for event in events {
        match classify(event.start, now) {
            Bucket::Upcoming => categorized.upcoming.push(event),
            Bucket::Planning => categorized.planning.push(event),
            Bucket::Past => categorized.past.push(event),
        }
    }

    categorized.upcoming.sort_by_key(|e| e.start);
    categorized.planning.sort_by_key(|e| e.start);
    categorized.past.sort_by(|a, b| b.start.cmp(&a.start));

    tracing::info!(
        upcoming = categorized.upcoming.len(),
        planning = categorized.planning.len(),
        past = categorized.past.len(),
        "Categorized events"
    );

    categorized
}
