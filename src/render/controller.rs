// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Presentation state for the page: open popup, drawn route, extra-event
//! visibility, and which pipeline run the page came from.
//!
//! Handlers receive the controller by `&mut` instead of sharing globals.

use crate::render::fragments::EventFragment;
use crate::render::page::RenderedPage;
use crate::services::route::RouteOverlay;

/// Identifies one pipeline run. Later tickets supersede earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RunTicket(u64);

/// Owner of all mutable UI state.
#[derive(Debug, Default)]
pub struct PresentationController {
    page: Option<RenderedPage>,
    generation: u64,
    open_event: Option<String>,
    current_route: Option<RouteOverlay>,
    extra_events_hidden: bool,
}

impl PresentationController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new run. Pages from older tickets will be discarded.
    pub fn begin_run(&mut self) -> RunTicket {
        self.generation += 1;
        RunTicket(self.generation)
    }

    /// Install the page produced by `ticket`'s run.
    ///
    /// Returns `false` (and drops the page) if a newer run has started.
    /// An installed page replaces all derived state.
    pub fn apply(&mut self, ticket: RunTicket, page: RenderedPage) -> bool {
        if ticket.0 != self.generation {
            tracing::debug!(
                ticket = ticket.0,
                current = self.generation,
                "Discarding superseded render"
            );
            return false;
        }
        self.page = Some(page);
        self.open_event = None;
        self.current_route = None;
        true
    }

    pub fn page(&self) -> Option<&RenderedPage> {
        self.page.as_ref()
    }

    /// Show an event's detail popup and draw its route in place of any other.
    pub fn open_event(&mut self, id: &str) -> Option<&EventFragment> {
        let page = self.page.as_ref()?;
        let fragment = page.event(id)?;

        self.open_event = Some(fragment.id.clone());
        self.current_route = RouteOverlay::from_encoded(&fragment.id, &fragment.route_polyline);
        Some(fragment)
    }

    /// Open the popup named by a `?id=event-…` query string, if any.
    pub fn open_from_query(&mut self, query: &str) -> Option<&EventFragment> {
        let id = query
            .trim_start_matches('?')
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "id")
            .map(|(_, value)| value.replace('+', " "))
            .and_then(|value| urlencoding::decode(&value).ok().map(|v| v.into_owned()))?;
        self.open_event(&id)
    }

    /// Close the popup and remove the drawn route.
    pub fn close_popup(&mut self) {
        self.open_event = None;
        self.current_route = None;
    }

    /// Popup content for the open event.
    pub fn popup_html(&self) -> Option<&str> {
        let id = self.open_event.as_deref()?;
        self.page
            .as_ref()?
            .event(id)
            .map(|fragment| fragment.popup_html.as_str())
    }

    pub fn open_event_id(&self) -> Option<&str> {
        self.open_event.as_deref()
    }

    pub fn current_route(&self) -> Option<&RouteOverlay> {
        self.current_route.as_ref()
    }

    /// Route shown while hovering a card or marker. Does not change state.
    pub fn hover_route(&self, id: &str) -> Option<RouteOverlay> {
        let fragment = self.page.as_ref()?.event(id)?;
        RouteOverlay::from_encoded(&fragment.id, &fragment.route_polyline)
    }

    pub fn set_extra_events_hidden(&mut self, hidden: bool) {
        self.extra_events_hidden = hidden;
    }

    pub fn extra_events_hidden(&self) -> bool {
        self.extra_events_hidden
    }

    /// Events currently listed, honoring the extra-event toggle.
    pub fn visible_events(&self) -> impl Iterator<Item = &EventFragment> {
        let hide_extra = self.extra_events_hidden;
        self.page
            .iter()
            .flat_map(|page| page.events())
            .filter(move |fragment| !(hide_extra && fragment.is_extra))
    }
}
