// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with a consistent user-facing message.

use crate::config::ConfigError;

/// Application error type for a pipeline run.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Every feed source failed. Carries the localized message shown to users.
    #[error("{message}")]
    FeedUnavailable {
        message: String,
        attempts: Vec<String>,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Localized message for an unreachable feed.
    pub const FEED_UNAVAILABLE: &'static str = "无法加载活动数据";

    /// Build a `FeedUnavailable` error from the per-source failure descriptions.
    pub fn feed_unavailable(attempts: Vec<String>) -> Self {
        AppError::FeedUnavailable {
            message: Self::FEED_UNAVAILABLE.to_string(),
            attempts,
        }
    }

    /// Whether this error means no feed data could be loaded at all.
    pub fn is_feed_unavailable(&self) -> bool {
        matches!(self, AppError::FeedUnavailable { .. })
    }
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, AppError>;
