//! # List Integration
//!
//! Many slots sharing one visibility channel, as in a scrolling list.
//!
//! ## Flow Tested:
//!
//! 1. **Fan-out**: one broadcast reaches every mounted slot
//! 2. **Filtering**: each slot reacts to its own index only
//! 3. **Recycling**: a recycled slot ignores its previous cycle's outcome

#[cfg(test)]
mod tests {
    use super::super::{viewable, TestList};
    use ad_slot_controller::{AdInteraction, AdLogEvent, AdSlotApi, SlotSpec, SlotStatus};
    use parking_lot::Mutex;
    use shared_bus::{EventPublisher, EventTopic};
    use shared_types::{AdLoadError, AdMetadata, CreativeKind};
    use std::sync::Arc;

    #[test]
    fn test_each_slot_reacts_to_its_own_index() {
        let list = TestList::new();
        let slots: Vec<_> = [3, 8, 13]
            .into_iter()
            .map(|index| {
                list.slot(SlotSpec::new(index, CreativeKind::Image).with_load_on_mount(false))
            })
            .collect();
        for (slot, _) in &slots {
            slot.mount();
        }
        assert_eq!(list.bus.subscriber_count(EventTopic::ViewableItemsChanged), 3);

        let receivers = list.bus.publish(
            viewable(&[("ad-3", 3), ("post-4", 4), ("post-7", 7), ("ad-8", 8)]).into(),
        );

        assert_eq!(receivers, 3);
        let statuses: Vec<_> = slots.iter().map(|(slot, _)| slot.snapshot().status).collect();
        assert_eq!(
            statuses,
            vec![SlotStatus::Loading, SlotStatus::Loading, SlotStatus::Idle]
        );
        assert_eq!(slots[2].1.load_count(), 0);

        // Slot 13 saw two other ads but not itself.
        let not_in_view = list.logger.find(AdLogEvent::NotInView);
        assert_eq!(not_in_view.len(), 1);
        assert_eq!(not_in_view[0].message, "13");
    }

    #[test]
    fn test_scrolling_past_and_back_loads_once() {
        let list = TestList::new();
        let (slot, renderer) =
            list.slot(SlotSpec::new(5, CreativeKind::Video).with_load_on_mount(false));
        slot.mount();

        list.bus.publish(viewable(&[("ad-5", 5)]).into());
        renderer.complete(AdMetadata::with_aspect_ratio(16.0 / 9.0));
        list.bus.publish(viewable(&[("post-9", 9)]).into());
        list.bus.publish(viewable(&[("ad-5", 5)]).into());

        assert_eq!(renderer.load_count(), 1);
        assert_eq!(slot.snapshot().status, SlotStatus::Loaded);
        let in_view = list.logger.find(AdLogEvent::InView);
        assert_eq!(
            in_view.iter().map(|r| r.message.as_str()).collect::<Vec<_>>(),
            vec!["Loading 5", "Loaded 5"]
        );
    }

    #[test]
    fn test_recycled_slot_ignores_previous_outcome() {
        let list = TestList::new();
        let (slot, renderer) = list.slot(SlotSpec::new(4, CreativeKind::Image));
        slot.mount();
        let old = renderer.last_callbacks().unwrap();

        slot.recycle(CreativeKind::Video);
        let new = renderer.last_callbacks().unwrap();

        old.on_failed(AdLoadError::new("timeout"));
        assert_eq!(slot.snapshot().status, SlotStatus::Loading);
        assert_eq!(list.logger.count(AdLogEvent::Failed), 0);

        new.on_loaded(AdMetadata::with_aspect_ratio(0.5625));
        let snapshot = slot.snapshot();
        assert_eq!(snapshot.status, SlotStatus::Loaded);
        assert_eq!(snapshot.kind, CreativeKind::Video);
        assert_eq!(snapshot.aspect_ratio().value(), 0.5625);
    }

    #[test]
    fn test_unmounted_slot_leaves_channel() {
        let list = TestList::new();
        let (a, _) = list.slot(SlotSpec::new(1, CreativeKind::Image).with_load_on_mount(false));
        let (b, b_renderer) =
            list.slot(SlotSpec::new(2, CreativeKind::Image).with_load_on_mount(false));
        a.mount();
        b.mount();

        b.unmount();
        let receivers = list.bus.publish(viewable(&[("ad-1", 1), ("ad-2", 2)]).into());

        assert_eq!(receivers, 1);
        assert_eq!(a.snapshot().status, SlotStatus::Loading);
        assert_eq!(b.snapshot().status, SlotStatus::Idle);
        assert_eq!(b_renderer.load_count(), 0);
    }

    #[test]
    fn test_dropped_slot_leaves_channel() {
        let list = TestList::new();
        let (slot, renderer) = list.slot(SlotSpec::new(1, CreativeKind::Image));
        slot.mount();
        let callbacks = renderer.last_callbacks().unwrap();

        drop(slot);

        assert_eq!(list.bus.subscriber_count(EventTopic::ViewableItemsChanged), 0);
        callbacks.on_loaded(AdMetadata::with_aspect_ratio(1.0));
        assert_eq!(list.logger.count(AdLogEvent::Received), 0);
    }

    #[test]
    fn test_interactions_reach_presentation_layer() {
        let list = TestList::new();
        let (slot, renderer) = list.slot(SlotSpec::new(6, CreativeKind::Image));
        let clicks = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&clicks);
        slot.set_interaction_listener(move |index, interaction| {
            if interaction == AdInteraction::Clicked {
                sink.lock().push(index);
            }
        });
        slot.mount();
        let callbacks = renderer.last_callbacks().unwrap();
        callbacks.on_loaded(AdMetadata::with_aspect_ratio(1.0));

        callbacks.on_impression();
        callbacks.on_clicked();
        callbacks.on_clicked();

        assert_eq!(*clicks.lock(), vec![6, 6]);
        assert_eq!(list.logger.count(AdLogEvent::Impression), 1);
        assert_eq!(slot.snapshot().status, SlotStatus::Loaded);
    }
}
