// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Presentation layer: HTML fragments and UI state.

pub mod controller;
pub mod fragments;
pub mod html;
pub mod page;

pub use controller::{PresentationController, RunTicket};
pub use fragments::{render_event, EventFragment, RenderContext, RenderError};
pub use page::{render_error_page, render_page, RenderedPage, Section};
