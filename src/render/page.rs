// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Whole-page assembly: sections, marker layer, updated label.

use crate::error::AppError;
use crate::models::{Bucket, MarkerDescriptor};
use crate::render::fragments::{render_event, EventFragment, RenderContext};
use crate::render::html::escape_html;
use crate::services::categorize::CategorizedEvents;
use crate::services::markers::{assign_marker_shifts, MarkerGroup};
use crate::time_utils::updated_label;

/// One bucket's rendered list.
#[derive(Debug, Clone)]
pub struct Section {
    pub bucket: Bucket,
    pub events: Vec<EventFragment>,
}

impl Section {
    fn heading(&self) -> String {
        let (title, alt) = match self.bucket {
            Bucket::Upcoming => ("Upcoming Events", "Green Marker"),
            Bucket::Planning => ("Planning Events", "Blue Marker"),
            Bucket::Past => ("Past Events", "Yellow Marker"),
        };
        format!(
            r#"{title} <img src="{}" alt="{alt}" />"#,
            self.bucket.icon_url()
        )
    }
}

/// Output of one render: list fragments plus the map layer.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// e.g. `Updated on 06/01/24, 05:00`
    pub updated_label: String,
    /// Upcoming, planning, past
    pub sections: Vec<Section>,
    /// Every placeable marker, shifts assigned
    pub markers: Vec<MarkerDescriptor>,
    pub marker_groups: Vec<MarkerGroup>,
}

impl RenderedPage {
    /// Look up an event fragment by element id.
    pub fn event(&self, id: &str) -> Option<&EventFragment> {
        self.sections
            .iter()
            .flat_map(|s| s.events.iter())
            .find(|e| e.id == id)
    }

    pub fn events(&self) -> impl Iterator<Item = &EventFragment> {
        self.sections.iter().flat_map(|s| s.events.iter())
    }

    /// The list container markup.
    pub fn to_html(&self) -> String {
        let mut parts = Vec::new();
        parts.push(format!(
            r#"        <div id="updated-time">{}</div>"#,
            escape_html(&self.updated_label)
        ));
        for section in &self.sections {
            parts.push(format!("        <h2>{}</h2>", section.heading()));
            parts.push("        <div class=\"events-container\">".to_string());
            for event in &section.events {
                parts.push(event.card_html.clone());
            }
            parts.push("        </div>".to_string());
        }
        parts.join("\n")
    }
}

/// Render every categorized event.
///
/// An event that fails to render is logged and left out; the rest of the
/// page still renders.
pub fn render_page(categorized: &CategorizedEvents, ctx: &RenderContext<'_>) -> RenderedPage {
    let mut sections = Vec::with_capacity(Bucket::ALL.len());
    let mut markers = Vec::new();

    for bucket in Bucket::ALL {
        let mut events = Vec::new();
        for event in categorized.bucket(bucket) {
            match render_event(event, bucket, ctx) {
                Ok(fragment) => {
                    if let Some(marker) = &fragment.marker {
                        markers.push(marker.clone());
                    } else if !event.gps_coordinates.is_empty() {
                        tracing::debug!(
                            event_id = %event.id,
                            coordinates = %event.gps_coordinates,
                            "Unparseable coordinates, no marker"
                        );
                    }
                    events.push(fragment);
                }
                Err(e) => {
                    tracing::warn!(event_id = %event.id, error = %e, "Skipping event");
                }
            }
        }
        sections.push(Section { bucket, events });
    }

    let marker_groups = assign_marker_shifts(&mut markers);

    // Fragments with markers appear in the same order as the marker list
    let mut shifted = markers.iter();
    for marker in sections
        .iter_mut()
        .flat_map(|s| s.events.iter_mut())
        .filter_map(|f| f.marker.as_mut())
    {
        if let Some(assigned) = shifted.next() {
            marker.shift = assigned.shift;
        }
    }

    tracing::info!(
        events = sections.iter().map(|s| s.events.len()).sum::<usize>(),
        markers = markers.len(),
        "Rendered page"
    );

    RenderedPage {
        updated_label: updated_label(ctx.now, ctx.time_zone),
        sections,
        markers,
        marker_groups,
    }
}

/// Markup shown instead of the lists when the feed could not be loaded.
pub fn render_error_page(error: &AppError) -> String {
    let detail = match error {
        AppError::FeedUnavailable { attempts, .. } if attempts.is_empty() => String::new(),
        AppError::FeedUnavailable { attempts, .. } => {
            format!(": {}", escape_html(&attempts.join("; ")))
        }
        other => format!(": {}", escape_html(&other.to_string())),
    };
    format!(
        "        <div id=\"updated-time\">Updated on --</div>\n        <div class=\"error\">{}{}</div>",
        AppError::FEED_UNAVAILABLE,
        detail
    )
}
