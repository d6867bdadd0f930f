//! # Feed Runtime
//!
//! Simulates a user scrolling through a list with native ad slots.
//!
//! ## Startup Sequence
//!
//! 1. Initialize telemetry (from env)
//! 2. Load and validate feed and slot configuration
//! 3. Build the feed and mount one controller per ad position
//! 4. Scroll until the end of the list or Ctrl+C
//! 5. Unmount every slot and report

use ad_slot_controller::AdSlotConfig;
use ad_telemetry::{init_telemetry, TelemetryConfig};
use anyhow::{Context, Result};
use feed_runtime::{FeedConfig, FeedRuntime};
use tokio::runtime::Handle;
use tracing::{info, warn};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let _telemetry = init_telemetry(TelemetryConfig::from_env().for_service("feed-runtime"))
        .context("Failed to initialize telemetry")?;

    let feed_config = FeedConfig::from_env();
    feed_config.validate().context("Invalid feed configuration")?;
    let slot_config = AdSlotConfig::from_env();

    info!("===========================================");
    info!("  Lazy Ad Slot Feed Runtime v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");
    info!(
        items = feed_config.item_count,
        ad_stride = feed_config.ad_stride,
        viewport = feed_config.viewport_size,
        fill_rate = feed_config.fill_rate,
        "Feed configuration loaded"
    );

    let mut runtime = FeedRuntime::new(feed_config, slot_config, Handle::current())
        .context("Invalid ad slot configuration")?;

    info!("Scrolling. Press Ctrl+C to stop.");
    let summary = runtime
        .run(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await;

    runtime.shutdown();

    info!(
        ticks = summary.ticks,
        events = summary.events_published,
        loaded = summary.statuses.loaded,
        failed = summary.statuses.failed,
        never_seen = summary.statuses.idle,
        still_loading = summary.statuses.loading,
        "Feed finished"
    );

    Ok(())
}
