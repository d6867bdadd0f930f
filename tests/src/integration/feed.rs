//! # Feed End to End
//!
//! The simulated feed scrolling through a list with the asynchronous
//! renderer, on a paused clock.

#[cfg(test)]
mod tests {
    use ad_slot_controller::{AdSlotApi, AdSlotConfig, SlotStatus};
    use feed_runtime::{FeedConfig, FeedRuntime};
    use std::time::Duration;
    use tokio::runtime::Handle;

    fn config(fill_rate: f64) -> FeedConfig {
        FeedConfig {
            item_count: 30,
            ad_stride: 6,
            viewport_size: 5,
            scroll_step: 3,
            tick_interval: Duration::from_millis(200),
            fill_rate,
            renderer_latency: Duration::from_millis(80),
            seed: 11,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_scroll_settles_every_slot() {
        let mut runtime =
            FeedRuntime::new(config(1.0), AdSlotConfig::for_testing(), Handle::current()).unwrap();

        let summary = runtime.run(std::future::pending()).await;

        assert_eq!(summary.statuses.total(), 5);
        assert_eq!(summary.statuses.loaded, 5);
        assert_eq!(summary.statuses.loading, 0);
        assert_eq!(summary.events_published, summary.ticks);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_fill_leaves_slots_failed() {
        let mut runtime =
            FeedRuntime::new(config(0.0), AdSlotConfig::for_testing(), Handle::current()).unwrap();

        let summary = runtime.run(std::future::pending()).await;

        assert_eq!(summary.statuses.failed, 5);
        assert!(runtime
            .slots()
            .iter()
            .all(|slot| slot.snapshot().error.is_some()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_slot_loads_exactly_once() {
        let mut runtime =
            FeedRuntime::new(config(1.0), AdSlotConfig::for_testing(), Handle::current()).unwrap();

        runtime.run(std::future::pending()).await;

        for slot in runtime.slots() {
            let snapshot = slot.snapshot();
            assert_eq!(snapshot.status, SlotStatus::Loaded);
            assert_eq!(snapshot.cycle.value(), 0, "slot {} restarted", snapshot.index);
        }
    }
}
