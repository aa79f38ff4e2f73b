// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Haoqiyou board renderer
//!
//! Fetches the event feed once and writes the event lists, map marker
//! layers and calendar files for the static page.

use anyhow::Context;
use haoqiyou::{
    config::Config,
    services::pipeline::{write_artifacts, write_error_artifacts},
    services::Pipeline,
    time_utils::format_utc_rfc3339,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().context("Failed to load configuration")?;
    let now = chrono::Utc::now();
    tracing::info!(
        now = %format_utc_rfc3339(now),
        sources = config.feed_sources.len(),
        output = %config.output_dir.display(),
        time_zone = %config.time_zone,
        "Starting haoqiyou render"
    );

    let output_dir = config.output_dir.clone();
    let pipeline = Pipeline::new(config);

    match pipeline.run(now).await {
        Ok(page) => {
            write_artifacts(&page, &output_dir, now).context("Failed to write artifacts")?;
            Ok(())
        }
        Err(err) => {
            tracing::error!(error = %err, "Render failed");
            write_error_artifacts(&err, &output_dir).context("Failed to write error page")?;
            Err(err.into())
        }
    }
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("haoqiyou=debug".parse().expect("valid directive"))
                .add_directive("info".parse().expect("valid directive")),
        )
        .with(format)
        .init();
}
