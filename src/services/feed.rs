// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Event feed fetching with ordered fallback.
//!
//! Sources are tried once each, in order. The first one that responds
//! successfully with a JSON array wins.

use crate::error::{AppError, Result};
use serde_json::Value;
use std::path::PathBuf;

/// A place the feed can be loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    Url(String),
    File(PathBuf),
}

impl FeedSource {
    /// Classify a configured source string.
    pub fn parse(source: &str) -> Self {
        if source.starts_with("http://") || source.starts_with("https://") {
            FeedSource::Url(source.to_string())
        } else {
            FeedSource::File(PathBuf::from(source))
        }
    }
}

impl std::fmt::Display for FeedSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedSource::Url(url) => f.write_str(url),
            FeedSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Why a single source attempt failed.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("Failed to read file: {0}")]
    Io(String),

    #[error("Invalid feed body: {0}")]
    Parse(String),
}

/// Feed client over an ordered list of sources.
#[derive(Clone)]
pub struct FeedFetcher {
    http: reqwest::Client,
    sources: Vec<FeedSource>,
}

impl FeedFetcher {
    pub fn new(sources: Vec<FeedSource>) -> Self {
        Self {
            http: reqwest::Client::new(),
            sources,
        }
    }

    /// Build a fetcher from configured source strings.
    pub fn from_config(sources: &[String]) -> Self {
        Self::new(sources.iter().map(|s| FeedSource::parse(s)).collect())
    }

    /// Fetch raw records from the first source that works.
    pub async fn fetch(&self) -> Result<Vec<Value>> {
        let mut attempts = Vec::with_capacity(self.sources.len());

        for source in &self.sources {
            match self.fetch_one(source).await {
                Ok(records) => {
                    tracing::info!(source = %source, count = records.len(), "Feed loaded");
                    return Ok(records);
                }
                Err(e) => {
                    tracing::warn!(source = %source, error = %e, "Feed source failed");
                    attempts.push(format!("{}: {}", source, e));
                }
            }
        }

        Err(AppError::feed_unavailable(attempts))
    }

    async fn fetch_one(&self, source: &FeedSource) -> std::result::Result<Vec<Value>, FeedError> {
        let body = match source {
            FeedSource::Url(url) => {
                let response = self
                    .http
                    .get(url)
                    .send()
                    .await
                    .map_err(|e| FeedError::Transport(e.to_string()))?;

                if !response.status().is_success() {
                    return Err(FeedError::Status(response.status().as_u16()));
                }

                response
                    .text()
                    .await
                    .map_err(|e| FeedError::Transport(e.to_string()))?
            }
            FeedSource::File(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|e| FeedError::Io(e.to_string()))?,
        };

        parse_feed(&body)
    }
}

/// Parse a feed body. The top level must be a JSON array.
pub fn parse_feed(body: &str) -> std::result::Result<Vec<Value>, FeedError> {
    serde_json::from_str::<Vec<Value>>(body).map_err(|e| FeedError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_parse() {
        assert_eq!(
            FeedSource::parse("https://example.com/events.json"),
            FeedSource::Url("https://example.com/events.json".to_string())
        );
        assert_eq!(
            FeedSource::parse("storage/events.json"),
            FeedSource::File(PathBuf::from("storage/events.json"))
        );
    }

    #[test]
    fn test_parse_feed_requires_array() {
        assert_eq!(parse_feed(r#"[{"a": 1}, null]"#).unwrap().len(), 2);
        assert!(matches!(parse_feed(r#"{"a": 1}"#), Err(FeedError::Parse(_))));
        assert!(matches!(parse_feed("<html>"), Err(FeedError::Parse(_))));
    }

    #[tokio::test]
    async fn test_empty_source_list_is_unavailable() {
        let err = FeedFetcher::new(vec![]).fetch().await.unwrap_err();
        assert!(err.is_feed_unavailable());
        assert_eq!(err.to_string(), "无法加载活动数据");
    }
}
