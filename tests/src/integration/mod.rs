//! # Integration Tests
//!
//! Slot controllers wired to the visibility channel the way a list wires
//! them.

pub mod feed;
pub mod list;
pub mod scenarios;

use ad_slot_controller::{
    AdSlotConfig, AdSlotController, MockRenderer, RecordingLogger, SlotContext, SlotSpec,
};
use shared_bus::ViewabilityBus;
use shared_types::{SlotIndex, ViewableItem, ViewableItemsChanged};
use std::sync::Arc;

/// Shared fixtures: one bus, one logger, a test config.
pub struct TestList {
    pub bus: Arc<ViewabilityBus>,
    pub logger: RecordingLogger,
    pub ctx: SlotContext,
}

impl TestList {
    pub fn new() -> Self {
        Self::with_config(AdSlotConfig::for_testing())
    }

    pub fn with_config(config: AdSlotConfig) -> Self {
        let bus = Arc::new(ViewabilityBus::new());
        let logger = RecordingLogger::new();
        let ctx = SlotContext::new(Arc::clone(&bus), config, Arc::new(logger.clone()));
        Self { bus, logger, ctx }
    }

    /// A slot with its own mock renderer.
    pub fn slot(&self, spec: SlotSpec) -> (AdSlotController, MockRenderer) {
        let renderer = MockRenderer::new();
        let slot = AdSlotController::new(spec, Box::new(renderer.clone()), &self.ctx);
        (slot, renderer)
    }
}

impl Default for TestList {
    fn default() -> Self {
        Self::new()
    }
}

/// Visibility payload from `(key, index)` pairs.
pub fn viewable(items: &[(&str, SlotIndex)]) -> ViewableItemsChanged {
    ViewableItemsChanged::new(
        items
            .iter()
            .map(|(key, index)| ViewableItem::new(*key, *index))
            .collect(),
    )
}
