// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Haoqiyou: ride and hike meetup board
//!
//! This crate turns the community event feed into the static event lists,
//! map markers and calendar files served by the haoqiyou page.

pub mod config;
pub mod error;
pub mod models;
pub mod render;
pub mod services;
pub mod time_utils;

pub use error::{AppError, Result};
