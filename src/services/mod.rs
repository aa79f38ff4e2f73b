// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - feed processing logic.

pub mod calendar;
pub mod categorize;
pub mod feed;
pub mod markers;
pub mod normalize;
pub mod pipeline;
pub mod route;

pub use calendar::CalendarEntry;
pub use categorize::{categorize, CategorizedEvents};
pub use feed::{FeedError, FeedFetcher, FeedSource};
pub use markers::{assign_marker_shifts, MarkerGroup};
pub use normalize::normalize_feed;
pub use pipeline::Pipeline;
pub use route::RouteOverlay;
