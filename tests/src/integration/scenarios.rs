//! # Load Scenarios
//!
//! One slot, driven through the visibility channel with the payloads a
//! list view emits.
//!
//! ## Flow Tested:
//!
//! 1. **Publisher → Slot**: `onViewableItemsChanged` reaches the mounted slot
//! 2. **Slot → Renderer**: exactly one load per cycle
//! 3. **Renderer → Slot**: outcome settles the slot and is logged

#[cfg(test)]
mod tests {
    use super::super::{viewable, TestList};
    use ad_slot_controller::{
        AdLogEvent, AdSlotApi, AdSlotConfig, SlotSpec, SlotStatus, TracingAdLogger,
    };
    use shared_bus::{EventPublisher, EventTopic, ViewEvent};
    use shared_types::{AdLoadError, AdMetadata, CreativeKind, ViewableItemsChanged};

    fn publish_json(list: &TestList, json: &str) -> usize {
        let payload = ViewableItemsChanged::from_json(json).unwrap();
        list.bus.publish(ViewEvent::from(payload))
    }

    // =========================================================================
    // SCENARIOS
    // =========================================================================

    #[test]
    fn test_visible_slot_loads_once() {
        let list = TestList::new();
        let (slot, renderer) =
            list.slot(SlotSpec::new(3, CreativeKind::Image).with_load_on_mount(false));
        slot.mount();
        assert_eq!(slot.snapshot().status, SlotStatus::Idle);

        let receivers = publish_json(&list, r#"{"viewableItems":[{"key":"ad-3","index":3}]}"#);

        assert_eq!(receivers, 1);
        assert_eq!(slot.snapshot().status, SlotStatus::Loading);
        assert_eq!(renderer.load_count(), 1);
    }

    #[test]
    fn test_identical_event_while_loading_is_ignored() {
        let list = TestList::new();
        let (slot, renderer) =
            list.slot(SlotSpec::new(3, CreativeKind::Image).with_load_on_mount(false));
        slot.mount();

        publish_json(&list, r#"{"viewableItems":[{"key":"ad-3","index":3}]}"#);
        publish_json(&list, r#"{"viewableItems":[{"key":"ad-3","index":3}]}"#);

        assert_eq!(slot.snapshot().status, SlotStatus::Loading);
        assert_eq!(renderer.load_count(), 1);
    }

    #[test]
    fn test_success_publishes_aspect_ratio() {
        let list = TestList::new();
        let (slot, renderer) =
            list.slot(SlotSpec::new(3, CreativeKind::Image).with_load_on_mount(false).with_media(true));
        slot.mount();
        publish_json(&list, r#"{"viewableItems":[{"key":"ad-3","index":3}]}"#);

        let metadata: AdMetadata =
            serde_json::from_str(r#"{"aspectRatio":1.5,"headline":"Hello"}"#).unwrap();
        renderer.complete(metadata);

        let snapshot = slot.snapshot();
        assert_eq!(snapshot.status, SlotStatus::Loaded);
        assert_eq!(snapshot.aspect_ratio().value(), 1.5);
        assert_eq!(snapshot.media_aspect_ratio().map(|r| r.value()), Some(1.5));
        assert_eq!(list.logger.count(AdLogEvent::Received), 1);
    }

    #[test]
    fn test_failure_is_logged_once() {
        let list = TestList::new();
        let (slot, renderer) =
            list.slot(SlotSpec::new(3, CreativeKind::Image).with_load_on_mount(false));
        slot.mount();
        publish_json(&list, r#"{"viewableItems":[{"key":"ad-3","index":3}]}"#);

        let error: AdLoadError = serde_json::from_str(r#"{"message":"no fill"}"#).unwrap();
        renderer.fail(error);
        publish_json(&list, r#"{"viewableItems":[{"key":"ad-3","index":3}]}"#);

        let snapshot = slot.snapshot();
        assert_eq!(snapshot.status, SlotStatus::Failed);
        assert_eq!(snapshot.aspect_ratio().value(), 1.0);
        assert!(snapshot.has_error());

        let failures = list.logger.find(AdLogEvent::Failed);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].message, "no fill");
        assert_eq!(renderer.load_count(), 1);
    }

    // =========================================================================
    // PAYLOAD HANDLING
    // =========================================================================

    #[test]
    fn test_malformed_entries_do_not_trigger() {
        let list = TestList::new();
        let (slot, renderer) =
            list.slot(SlotSpec::new(3, CreativeKind::Image).with_load_on_mount(false));
        slot.mount();

        publish_json(
            &list,
            r#"{"viewableItems":[{"key":"ad-3"},{"index":3},{"key":"post-3","index":3}]}"#,
        );

        assert_eq!(slot.snapshot().status, SlotStatus::Idle);
        assert_eq!(renderer.load_count(), 0);
    }

    #[test]
    fn test_bad_sibling_entry_keeps_event() {
        let list = TestList::new();
        let (slot, renderer) =
            list.slot(SlotSpec::new(3, CreativeKind::Image).with_load_on_mount(false));
        slot.mount();

        let receivers = publish_json(
            &list,
            r#"{"viewableItems":[{"key":"ad-3","index":3},{"key":"header","index":-1},{"key":42,"index":"4"}]}"#,
        );

        assert_eq!(receivers, 1);
        assert_eq!(slot.snapshot().status, SlotStatus::Loading);
        assert_eq!(renderer.load_count(), 1);
    }

    #[test]
    fn test_unparsable_payload_stays_with_publisher() {
        assert!(ViewableItemsChanged::from_json("42").is_err());
        assert!(ViewableItemsChanged::from_json(r#"{"viewableItems":"nope"}"#).is_err());
    }

    #[test]
    fn test_custom_key_marker() {
        let config = AdSlotConfig {
            ad_key_marker: "native".to_string(),
            ..AdSlotConfig::for_testing()
        };
        let list = TestList::with_config(config);
        let (slot, renderer) =
            list.slot(SlotSpec::new(2, CreativeKind::Video).with_load_on_mount(false));
        slot.mount();

        list.bus.publish(viewable(&[("ad-2", 2)]).into());
        assert_eq!(renderer.load_count(), 0);

        list.bus.publish(viewable(&[("native-2", 2)]).into());
        assert_eq!(renderer.load_count(), 1);
        assert_eq!(renderer.requests()[0].unit_id, "test-video-unit");
    }

    #[test]
    fn test_tracing_logger_as_sink() {
        let bus = std::sync::Arc::new(shared_bus::ViewabilityBus::new());
        let ctx = ad_slot_controller::SlotContext::new(
            std::sync::Arc::clone(&bus),
            AdSlotConfig::for_testing(),
            std::sync::Arc::new(TracingAdLogger::new()),
        );
        let renderer = ad_slot_controller::MockRenderer::new()
            .respond_immediately(Ok(AdMetadata::with_aspect_ratio(1.91)));
        let slot = ad_slot_controller::AdSlotController::new(
            SlotSpec::new(0, CreativeKind::Image),
            Box::new(renderer),
            &ctx,
        );

        slot.mount();
        bus.publish(viewable(&[("ad-0", 0)]).into());

        assert_eq!(slot.snapshot().status, SlotStatus::Loaded);
        assert_eq!(bus.subscriber_count(EventTopic::ViewableItemsChanged), 1);
    }
}
