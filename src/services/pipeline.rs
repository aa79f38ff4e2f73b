// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! One pipeline run and the artifacts it writes.
//!
//! Handles:
//! 1. Fetch the feed (the only await point)
//! 2. Normalize and categorize events relative to `now`
//! 3. Render fragments and deconflict markers
//! 4. Write the page, marker layers and calendar files

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::render::{render_error_page, render_page, RenderContext, RenderedPage};
use crate::services::calendar::{to_ics, CalendarEntry};
use crate::services::categorize::categorize;
use crate::services::feed::FeedFetcher;
use crate::services::markers::markers_geojson;
use crate::services::normalize::normalize_feed;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

pub const EVENTS_HTML: &str = "events.html";
pub const MARKERS_JSON: &str = "markers.json";
pub const MARKERS_GEOJSON: &str = "markers.geojson";
pub const CALENDAR_ICS: &str = "calendar.ics";
pub const CALENDAR_DIR: &str = "calendar";

/// Fetch-and-render pipeline.
pub struct Pipeline {
    config: Config,
    fetcher: FeedFetcher,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        let fetcher = FeedFetcher::from_config(&config.feed_sources);
        Self { config, fetcher }
    }

    pub fn with_fetcher(config: Config, fetcher: FeedFetcher) -> Self {
        Self { config, fetcher }
    }

    /// Fetch the feed and render it as of `now`.
    pub async fn run(&self, now: DateTime<Utc>) -> Result<RenderedPage> {
        let records = self.fetcher.fetch().await?;
        Ok(build_page(&records, &self.config, now))
    }
}

/// Synchronous core: raw records to a rendered page.
pub fn build_page(records: &[Value], config: &Config, now: DateTime<Utc>) -> RenderedPage {
    let events = normalize_feed(records);
    let categorized = categorize(events, now);
    let ctx = RenderContext {
        now,
        time_zone: config.time_zone,
        extra_group_ids: &config.extra_group_ids,
    };
    render_page(&categorized, &ctx)
}

/// Write every artifact for a rendered page. Returns the files written.
pub fn write_artifacts(
    page: &RenderedPage,
    out_dir: &Path,
    now: DateTime<Utc>,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)?;
    let mut written = Vec::new();

    written.push(write_file(out_dir.join(EVENTS_HTML), &page.to_html())?);
    written.push(write_file(
        out_dir.join(MARKERS_JSON),
        &serde_json::to_string_pretty(&page.markers)?,
    )?);
    written.push(write_file(
        out_dir.join(MARKERS_GEOJSON),
        &geojson::GeoJson::from(markers_geojson(&page.markers)).to_string(),
    )?);

    let calendar_dir = out_dir.join(CALENDAR_DIR);
    fs::create_dir_all(&calendar_dir)?;
    let mut stems = HashSet::new();
    for fragment in page.events() {
        let Some(entry) = &fragment.calendar else {
            continue;
        };
        let stem = file_stem(&fragment.id);
        if !stems.insert(stem.clone()) {
            tracing::warn!(
                event_id = %fragment.id,
                file = %stem,
                "Calendar file name already used, skipping"
            );
            continue;
        }
        let path = calendar_dir.join(format!("{stem}.ics"));
        written.push(write_file(path, &to_ics(std::slice::from_ref(entry), now))?);
    }

    let combined: Vec<CalendarEntry> = page
        .events()
        .filter_map(|fragment| fragment.calendar.clone())
        .collect();
    written.push(write_file(out_dir.join(CALENDAR_ICS), &to_ics(&combined, now))?);

    tracing::info!(
        dir = %out_dir.display(),
        files = written.len(),
        "Artifacts written"
    );
    Ok(written)
}

/// Write the error page in place of the lists.
pub fn write_error_artifacts(error: &AppError, out_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(out_dir)?;
    write_file(out_dir.join(EVENTS_HTML), &render_error_page(error))
}

fn write_file(path: PathBuf, contents: &str) -> Result<PathBuf> {
    fs::write(&path, contents)?;
    tracing::debug!(path = %path.display(), bytes = contents.len(), "Wrote file");
    Ok(path)
}

/// Safe file name for an element id.
fn file_stem(id: &str) -> String {
    id.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
