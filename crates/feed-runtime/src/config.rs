//! # Feed Configuration
//!
//! Shape of the simulated list and behaviour of the simulated renderer.

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationMilliSeconds};
use std::env;
use std::time::Duration;

/// Feed simulator configuration.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Number of list items.
    pub item_count: usize,
    /// Every `ad_stride`-th item is an ad.
    pub ad_stride: usize,
    /// Items on screen at once.
    pub viewport_size: usize,
    /// Items scrolled per tick.
    pub scroll_step: usize,
    /// Time between scroll ticks.
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub tick_interval: Duration,
    /// Probability that a load is filled.
    pub fill_rate: f64,
    /// Mean renderer latency.
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub renderer_latency: Duration,
    /// Seed for the renderer's random outcomes.
    pub seed: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            item_count: 60,
            ad_stride: 5,
            viewport_size: 6,
            scroll_step: 2,
            tick_interval: Duration::from_millis(250),
            fill_rate: 0.8,
            renderer_latency: Duration::from_millis(300),
            seed: 42,
        }
    }
}

impl FeedConfig {
    /// Load configuration from environment, falling back to defaults.
    ///
    /// # Environment Variables
    ///
    /// - `FEED_ITEM_COUNT`, `FEED_AD_STRIDE`, `FEED_VIEWPORT_SIZE`,
    ///   `FEED_SCROLL_STEP`: list shape
    /// - `FEED_TICK_MS`: scroll tick interval in milliseconds
    /// - `FEED_FILL_RATE`: fill probability between 0 and 1
    /// - `FEED_LATENCY_MS`: mean renderer latency in milliseconds
    /// - `FEED_SEED`: renderer seed
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(v) = parse_env("FEED_ITEM_COUNT") {
            config.item_count = v;
        }
        if let Some(v) = parse_env("FEED_AD_STRIDE") {
            config.ad_stride = v;
        }
        if let Some(v) = parse_env("FEED_VIEWPORT_SIZE") {
            config.viewport_size = v;
        }
        if let Some(v) = parse_env("FEED_SCROLL_STEP") {
            config.scroll_step = v;
        }
        if let Some(ms) = parse_env("FEED_TICK_MS") {
            config.tick_interval = Duration::from_millis(ms);
        }
        if let Some(v) = parse_env("FEED_FILL_RATE") {
            config.fill_rate = v;
        }
        if let Some(ms) = parse_env("FEED_LATENCY_MS") {
            config.renderer_latency = Duration::from_millis(ms);
        }
        if let Some(v) = parse_env("FEED_SEED") {
            config.seed = v;
        }

        config
    }

    /// Reject shapes the simulator cannot run.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.item_count > 0, "item_count must be positive");
        ensure!(self.ad_stride > 0, "ad_stride must be positive");
        ensure!(self.viewport_size > 0, "viewport_size must be positive");
        ensure!(self.scroll_step > 0, "scroll_step must be positive");
        ensure!(!self.tick_interval.is_zero(), "tick_interval must be positive");
        ensure!(
            (0.0..=1.0).contains(&self.fill_rate),
            "fill_rate must be between 0 and 1, got {}",
            self.fill_rate
        );
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}
