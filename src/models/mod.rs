// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the ride board.

pub mod bucket;
pub mod event;
pub mod marker;
pub mod raw;

pub use bucket::Bucket;
pub use event::{EventLinks, NormalizedEvent, SourceKind};
pub use marker::{DateSpan, LatLng, MarkerDescriptor};
