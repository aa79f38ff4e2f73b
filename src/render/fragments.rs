// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-event HTML fragments: the list card and its detail popup.

use crate::models::event::shown_participants;
use crate::models::{Bucket, MarkerDescriptor, NormalizedEvent};
use crate::render::html::{convert_urls_to_links, escape_attribute, escape_html};
use crate::services::calendar::CalendarEntry;
use crate::services::markers::build_marker;
use crate::time_utils::{relative_day_label, TimeParts};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use std::collections::HashSet;

const MILES_PER_KM: f64 = 0.621371;
const FEET_PER_METER: f64 = 3.28084;

/// Inputs shared by every fragment of one render.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub now: DateTime<Utc>,
    pub time_zone: Tz,
    pub extra_group_ids: &'a HashSet<i64>,
}

/// Everything rendered for one event.
#[derive(Debug, Clone)]
pub struct EventFragment {
    /// Element id, `event-{id}`
    pub id: String,
    pub bucket: Bucket,
    /// List card, with the hidden popup embedded
    pub card_html: String,
    /// Popup content on its own, for the detail overlay
    pub popup_html: String,
    /// Map pin; `None` when the coordinates don't parse
    pub marker: Option<MarkerDescriptor>,
    /// Calendar export for upcoming and planning events
    pub calendar: Option<CalendarEntry>,
    /// Encoded route, decoded lazily when shown
    pub route_polyline: String,
    /// Group is one of the configured extra groups
    pub is_extra: bool,
}

/// Failure rendering a single event.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Event {0} start time is out of range")]
    TimeOutOfRange(String),
}

/// Render one event's card, popup, marker and calendar entry.
pub fn render_event(
    event: &NormalizedEvent,
    bucket: Bucket,
    ctx: &RenderContext<'_>,
) -> Result<EventFragment, RenderError> {
    let id = event.element_id();
    let time = TimeParts::new(event.start, ctx.now, ctx.time_zone)
        .ok_or_else(|| RenderError::TimeOutOfRange(id.clone()))?;

    let calendar = if bucket.offers_calendar() {
        Some(
            CalendarEntry::from_event(event)
                .ok_or_else(|| RenderError::TimeOutOfRange(id.clone()))?,
        )
    } else {
        None
    };

    let is_extra = ctx.extra_group_ids.contains(&event.source_group_id);
    let popup_html = render_popup(event, bucket, &time);
    let card_html = render_card(event, ctx, &time, &popup_html, calendar.as_ref(), is_extra);

    Ok(EventFragment {
        marker: build_marker(event, bucket, &time),
        id,
        bucket,
        card_html,
        popup_html,
        calendar,
        route_polyline: event.route_polyline.clone(),
        is_extra,
    })
}

/// Markup lines, indented four spaces per nesting level.
struct Markup {
    out: String,
}

impl Markup {
    fn new() -> Self {
        Self {
            out: String::with_capacity(4096),
        }
    }

    fn line(&mut self, depth: usize, text: impl AsRef<str>) {
        for _ in 0..depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text.as_ref());
        self.out.push('\n');
    }

    /// Append already-indented markup.
    fn block(&mut self, markup: &str) {
        self.out.push_str(markup);
        self.out.push('\n');
    }

    fn finish(mut self) -> String {
        if self.out.ends_with('\n') {
            self.out.pop();
        }
        self.out
    }
}

const INDENT: &str = "    ";

const CALENDAR_BOX: &str = r#"<div class="calendar-box" data-calendar-trigger="icon">"#;
const CALENDAR_ICON: &str =
    r#"<span class="material-symbols-outlined calendar-icon" aria-hidden="true">calendar_add_on</span>"#;

fn render_card(
    event: &NormalizedEvent,
    ctx: &RenderContext<'_>,
    time: &TimeParts,
    popup_html: &str,
    calendar: Option<&CalendarEntry>,
    is_extra: bool,
) -> String {
    let id = escape_attribute(&event.element_id());
    let class = if is_extra { "extra-event" } else { "selected-event" };
    let route_url = event.route_url();
    let source_url = event.source_event_url();

    let mut attrs = format!(
        r#"class="event {class}" data-event-id="{id}" data-event-title="{}" data-event-start="{}" data-event-end="{}" data-event-location="{}" data-event-source-url="{}""#,
        escape_attribute(&event.title),
        time.calendar_start,
        time.calendar_end,
        escape_attribute(event.location()),
        escape_attribute(source_url),
    );
    if let Some(entry) = calendar {
        attrs.push_str(&format!(
            r#" data-calendar-url="{}""#,
            escape_attribute(&entry.google_calendar_url())
        ));
    }

    let mut m = Markup::new();
    m.line(2, format!("<div {attrs}>"));
    m.line(3, format!(r#"<a href="?id={id}" class="event-link"></a>"#));
    m.line(3, r#"<div class="event-section">"#);
    m.block(popup_html);

    // Date box
    m.line(4, r#"<div class="event-details">"#);
    m.line(5, r#"<div class="date-box">"#);
    m.line(6, format!(r#"<div class="date">{}</div>"#, time.day));
    m.line(6, format!(r#"<div class="month">{}</div>"#, time.month));
    if time.show_year {
        m.line(6, format!(r#"<div class="year">{}</div>"#, time.year));
    }
    m.line(
        6,
        format!(
            r#"<div class="date-relative" event-date="{}">{}</div>"#,
            time.local_iso,
            relative_day_label(event.start, ctx.now, ctx.time_zone)
        ),
    );
    if let Some(area) = event.area() {
        m.line(6, format!(r#"<div class="area-box">{area}</div>"#));
    }
    if calendar.is_some() {
        m.line(6, r#"<div class="area-calendar-separator"></div>"#);
        m.line(6, CALENDAR_BOX);
        m.line(7, CALENDAR_ICON);
        m.line(6, "</div>");
    }
    m.line(5, "</div>");
    m.line(5, "<div>");
    m.line(6, format!("<strong>{}</strong> {}<br>", time.time_label, time.weekday_en));
    m.line(
        6,
        format!(
            r#"<span class="meet-up">集合GPS:</span> {}"#,
            escape_html(&event.gps_coordinates)
        ),
    );
    m.line(5, "</div>");
    m.line(4, "</div>");

    // Meetup summary
    m.line(4, "<div>");
    m.line(
        5,
        format!(
            r#"<span class="meet-up">集合地点:</span> {} <br>"#,
            escape_html(event.location())
        ),
    );
    for (label, value) in summary_rows(event) {
        m.line(5, format!(r#"<span class="meet-up">{label}:</span> {value} <br>"#));
    }
    m.line(4, "</div>");
    m.line(3, "</div>");

    // Route image and hidden polyline
    m.line(3, r#"<div class="event-section">"#);
    if let Some(image) = route_image(event, route_url) {
        m.line(4, image);
    }
    m.line(
        4,
        format!(
            r#"<div data-event-id="{id}-route-polyline" style="display: none;">{}</div>"#,
            escape_html(&event.route_polyline)
        ),
    );
    m.line(3, "</div>");

    // Title, organizer, source
    m.line(3, r#"<div class="event-section">"#);
    m.line(
        4,
        format!(r#"<div class="event-title">{}</div> <br>"#, escape_html(&event.title)),
    );
    m.line(
        4,
        format!(
            r#"<div class="event-description">发起人: {}</div> <br>"#,
            escape_html(&event.organizer)
        ),
    );
    m.line(
        4,
        format!(
            r#"<div class="event-description">活动来源: {}</div>"#,
            source_link(event, source_url, r#" class="event-link""#)
        ),
    );
    m.line(3, "</div>");
    m.line(2, "</div>");

    m.finish()
}

fn render_popup(event: &NormalizedEvent, bucket: Bucket, time: &TimeParts) -> String {
    let id = escape_attribute(&event.element_id());
    let route_url = event.route_url();
    let source_url = event.source_event_url();

    let mut m = Markup::new();
    m.line(2, format!(r#"<div id="{id}" style="display: none;">"#));
    m.line(3, r#"<div class="event-title-row">"#);
    m.line(4, r#"<div class="date-box">"#);
    m.line(5, format!(r#"<div class="date">{}</div>"#, time.day));
    m.line(5, format!(r#"<div class="month">{}</div>"#, time.month));
    m.line(5, format!(r#"<div class="day-of-week">{}</div>"#, time.weekday_cn));
    if time.show_year {
        m.line(5, format!(r#"<div class="year">{}</div>"#, time.year));
    }
    m.line(4, "</div>");
    if bucket.offers_calendar() {
        m.line(4, CALENDAR_BOX);
        m.line(5, CALENDAR_ICON);
        m.line(4, "</div>");
        m.line(4, r#"<div class="area-vertical-separator"></div>"#);
    }
    m.line(4, format!(r#"<div class="event-title">{}</div>"#, escape_html(&event.title)));
    m.line(3, "</div>");
    m.line(
        3,
        format!(
            r#"<p class="event-description">{}</p>"#,
            convert_urls_to_links(&event.description)
        ),
    );

    let picture_link = if source_url.is_empty() { route_url } else { source_url };
    render_pictures(&mut m, 3, &event.picture_urls, picture_link);

    if let Some(image) = route_image(event, route_url) {
        m.line(3, image);
    }

    m.line(
        3,
        format!(
            "<p><strong>时间:</strong> {}, {}, {} {}, {}</p>",
            time.time_label, time.weekday_en, time.month, time.day, time.year
        ),
    );
    m.line(
        3,
        format!("<p><strong>集合GPS:</strong> {}</p>", escape_html(&event.gps_coordinates)),
    );
    if !event.location().is_empty() {
        m.line(
            3,
            format!("<p><strong>集合地点:</strong> {}</p>", escape_html(event.location())),
        );
    }
    for (label, value) in summary_rows(event) {
        m.line(3, format!("<p><strong>{label}:</strong> {value}</p>"));
    }
    m.line(
        3,
        format!("<p><strong>发起人:</strong> {}</p>", escape_html(&event.organizer)),
    );
    m.line(
        3,
        format!("<p><strong>活动来源:</strong> {}</p>", source_link(event, source_url, "")),
    );
    m.line(2, "</div>");

    m.finish()
}

/// Distance, elevation and participant rows, already escaped.
fn summary_rows(event: &NormalizedEvent) -> Vec<(&'static str, String)> {
    let mut rows = Vec::new();
    if let Some(distance) = format_distance(event.distance_meters) {
        rows.push(("总路程", distance));
    }
    if let Some(elevation) = format_elevation(event.elevation_gain_meters) {
        rows.push(("总爬坡", elevation));
    }
    if let Some(expected) = shown_participants(&event.expected_participants) {
        rows.push(("预计人数", escape_html(expected)));
    }
    if let Some(actual) = shown_participants(&event.actual_participants) {
        rows.push(("实际人数", escape_html(actual)));
    }
    rows
}

fn route_image(event: &NormalizedEvent, route_url: &str) -> Option<String> {
    if event.route_map_url.is_empty() {
        return None;
    }
    let img = format!(
        r#"<img src="{}" alt="Route Image" width="100%">"#,
        escape_attribute(&event.route_map_url)
    );
    Some(if route_url.is_empty() {
        img
    } else {
        format!(
            r#"<a href="{}" target="_blank" class="event-link">{img}</a>"#,
            escape_attribute(route_url)
        )
    })
}

fn source_link(event: &NormalizedEvent, source_url: &str, extra_attrs: &str) -> String {
    let label = escape_html(&event.source_group_label());
    if source_url.is_empty() {
        label
    } else {
        format!(
            r#"<a href="{}" target="_blank"{extra_attrs}>{label}</a>"#,
            escape_attribute(source_url)
        )
    }
}

/// One linked image, or a slideshow for several.
fn render_pictures(m: &mut Markup, depth: usize, urls: &[String], link: &str) {
    match urls {
        [] => {}
        [only] => {
            m.line(
                depth,
                format!(r#"<a href="{}" target="_blank" class="event-link">"#, escape_attribute(link)),
            );
            m.line(
                depth + 1,
                format!(r#"<img src="{}" alt="Event Image" width="100%">"#, escape_attribute(only)),
            );
            m.line(depth, "</a>");
        }
        many => {
            let count = many.len();
            m.line(depth, r#"<div class="slideshow-container">"#);
            m.line(depth + 1, format!(r#"<div class="slides-wrapper" slides-length="{count}">"#));
            for (index, url) in many.iter().enumerate() {
                let display = if index == 0 { "block" } else { "none" };
                let url = escape_attribute(url);
                m.line(
                    depth + 2,
                    format!(r#"<div class="slide" data-index="{index}" style="display: {display};">"#),
                );
                m.line(depth + 3, format!(r#"<a href="{url}" target="_blank" class="event-link">"#));
                m.line(
                    depth + 4,
                    format!(r#"<img src="{url}" alt="Event Image {}" class="slide-image">"#, index + 1),
                );
                m.line(depth + 3, "</a>");
                m.line(depth + 2, "</div>");
            }
            m.line(depth + 1, "</div>");
            m.line(
                depth + 1,
                format!(r#"<button class="slide-nav prev" onclick="moveSlide(-1, {count})">❮</button>"#),
            );
            m.line(
                depth + 1,
                format!(r#"<button class="slide-nav next" onclick="moveSlide(1, {count})">❯</button>"#),
            );
            m.line(depth + 1, r#"<div class="slide-dots">"#);
            for index in 0..count {
                m.line(
                    depth + 2,
                    format!(r#"<span class="dot" onclick="currentSlide({index}, {count})"></span>"#),
                );
            }
            m.line(depth + 1, "</div>");
            m.line(depth, "</div>");
        }
    }
}

/// `80.47 km (50.00 miles)`; `None` for non-positive distances.
pub fn format_distance(meters: f64) -> Option<String> {
    if meters <= 0.0 || !meters.is_finite() {
        return None;
    }
    let km = meters / 1000.0;
    Some(format!("{:.2} km ({:.2} miles)", km, km * MILES_PER_KM))
}

/// `1,200 m (3,937 ft)`; `None` for non-positive gains.
pub fn format_elevation(meters: f64) -> Option<String> {
    if meters <= 0.0 || !meters.is_finite() {
        return None;
    }
    Some(format!(
        "{} m ({} ft)",
        group_thousands(meters.round() as i64),
        group_thousands((meters * FEET_PER_METER).round() as i64)
    ))
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
