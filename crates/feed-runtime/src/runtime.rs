//! # Feed Runtime
//!
//! Wires one visibility channel, one controller per ad position and the
//! simulated renderer, then scrolls a viewport through the list.

use crate::config::FeedConfig;
use crate::feed::Feed;
use crate::renderer::SimulatedRenderer;
use ad_slot_controller::{
    AdSlotApi, AdSlotConfig, AdSlotController, AdSlotError, SlotContext, SlotSnapshot, SlotSpec,
    SlotStatus, TracingAdLogger,
};
use ad_telemetry::{log_event, log_slot_event};
use shared_bus::{EventPublisher, ViewabilityBus};
use std::future::Future;
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::info;

const SUBSYSTEM: &str = "feed";

/// Number of slots in each status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    /// Slots that have not requested an ad yet.
    pub idle: usize,
    /// Slots waiting on the renderer.
    pub loading: usize,
    /// Slots showing a creative.
    pub loaded: usize,
    /// Slots whose load failed.
    pub failed: usize,
}

impl StatusCounts {
    fn tally(snapshots: impl IntoIterator<Item = SlotSnapshot>) -> Self {
        snapshots
            .into_iter()
            .fold(Self::default(), |mut counts, snapshot| {
                match snapshot.status {
                    SlotStatus::Idle => counts.idle += 1,
                    SlotStatus::Loading => counts.loading += 1,
                    SlotStatus::Loaded => counts.loaded += 1,
                    SlotStatus::Failed => counts.failed += 1,
                }
                counts
            })
    }

    /// Total number of slots.
    pub fn total(&self) -> usize {
        self.idle + self.loading + self.loaded + self.failed
    }
}

/// Outcome of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedSummary {
    /// Scroll ticks performed.
    pub ticks: u64,
    /// Visibility events published.
    pub events_published: u64,
    /// Final slot statuses.
    pub statuses: StatusCounts,
}

/// The simulated list and its ad slots.
pub struct FeedRuntime {
    config: FeedConfig,
    feed: Feed,
    bus: Arc<ViewabilityBus>,
    slots: Vec<AdSlotController>,
    offset: usize,
    ticks: u64,
    finished: bool,
}

impl FeedRuntime {
    /// Build the feed and mount one lazily loading controller per ad.
    ///
    /// # Errors
    /// - any `AdSlotConfig::validate` failure
    pub fn new(
        config: FeedConfig,
        slot_config: AdSlotConfig,
        handle: Handle,
    ) -> Result<Self, AdSlotError> {
        slot_config.validate()?;

        let feed = Feed::generate(config.item_count, config.ad_stride);
        let bus = Arc::new(ViewabilityBus::new());
        let ctx = SlotContext::new(Arc::clone(&bus), slot_config, Arc::new(TracingAdLogger::new()));

        let slots: Vec<_> = feed
            .ads()
            .map(|(index, kind)| {
                let renderer = SimulatedRenderer::new(
                    handle.clone(),
                    config.renderer_latency,
                    config.fill_rate,
                    config.seed.wrapping_add(index as u64),
                );
                let slot = AdSlotController::new(
                    SlotSpec::new(index, kind).with_load_on_mount(false),
                    Box::new(renderer),
                    &ctx,
                );
                slot.mount();
                slot
            })
            .collect();

        log_event!(
            info,
            SUBSYSTEM,
            "Feed created",
            items = feed.len(),
            ad_slots = slots.len()
        );

        Ok(Self {
            config,
            feed,
            bus,
            slots,
            offset: 0,
            ticks: 0,
            finished: false,
        })
    }

    /// Controllers in list order.
    pub fn slots(&self) -> &[AdSlotController] {
        &self.slots
    }

    /// Current scroll offset.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Whether the last window has been shown.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Publish the current window, then scroll.
    pub fn tick(&mut self) -> StatusCounts {
        let window = self.feed.viewport(self.offset, self.config.viewport_size);
        let receivers = self.bus.publish(window.into());

        let last = self.feed.last_offset(self.config.viewport_size);
        if self.offset >= last {
            self.finished = true;
        } else {
            self.offset = (self.offset + self.config.scroll_step).min(last);
        }
        self.ticks += 1;

        let counts = self.status_counts();
        log_event!(
            info,
            SUBSYSTEM,
            "Scrolled",
            tick = self.ticks,
            offset = self.offset,
            receivers,
            idle = counts.idle,
            loading = counts.loading,
            loaded = counts.loaded,
            failed = counts.failed
        );
        counts
    }

    /// Current status of every slot.
    pub fn status_counts(&self) -> StatusCounts {
        StatusCounts::tally(self.slots.iter().map(AdSlotController::snapshot))
    }

    /// Scroll until the end of the list or until `shutdown` resolves, then
    /// give outstanding loads twice the mean latency to settle.
    pub async fn run<F>(&mut self, shutdown: F) -> FeedSummary
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut ticker = tokio::time::interval(self.config.tick_interval);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.tick();
                    if self.finished {
                        break;
                    }
                }
                _ = &mut shutdown => {
                    info!("Shutdown signal received");
                    break;
                }
            }
        }

        tokio::time::sleep(self.config.renderer_latency * 2).await;
        self.summary()
    }

    /// Summary of the run so far.
    pub fn summary(&self) -> FeedSummary {
        FeedSummary {
            ticks: self.ticks,
            events_published: self.bus.events_published(),
            statuses: self.status_counts(),
        }
    }

    /// Unmount every slot, logging where each one ended up.
    pub fn shutdown(&self) {
        for slot in &self.slots {
            let snapshot = slot.snapshot();
            log_slot_event!(
                debug,
                SUBSYSTEM,
                "Unmounting slot",
                snapshot.index,
                snapshot.status,
                cycle = %snapshot.cycle
            );
            slot.unmount();
        }
        log_event!(info, SUBSYSTEM, "All slots unmounted", slots = self.slots.len());
    }
}
