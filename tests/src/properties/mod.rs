//! # Slot Properties
//!
//! Random operation sequences against a single slot, checking after every
//! step that the slot's guarantees hold whatever order events arrive in.

#[cfg(test)]
mod tests {
    use super::super::integration::{viewable, TestList};
    use ad_slot_controller::{
        invariant_aspect_ratio, AdSlotApi, AdSlotController, MockRenderer, SlotSnapshot, SlotSpec,
        SlotStatus, DEFAULT_ASPECT_RATIO,
    };
    use proptest::prelude::*;
    use shared_bus::EventPublisher;
    use shared_types::{AdLoadError, AdMetadata, CreativeKind};

    const INDEX: usize = 7;

    #[derive(Clone, Debug)]
    enum Op {
        Visible,
        OtherVisible,
        Complete(f64),
        Fail,
        Recycle(bool),
        Retry,
        DeliverStale(bool),
        Unmount,
        Mount,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => Just(Op::Visible),
            2 => Just(Op::OtherVisible),
            3 => (0.1f64..4.0).prop_map(Op::Complete),
            2 => Just(Op::Fail),
            1 => any::<bool>().prop_map(Op::Recycle),
            1 => Just(Op::Retry),
            2 => any::<bool>().prop_map(Op::DeliverStale),
            1 => Just(Op::Unmount),
            1 => Just(Op::Mount),
        ]
    }

    fn kind(video: bool) -> CreativeKind {
        if video {
            CreativeKind::Video
        } else {
            CreativeKind::Image
        }
    }

    fn rank(status: SlotStatus) -> u8 {
        match status {
            SlotStatus::Idle => 0,
            SlotStatus::Loading => 1,
            SlotStatus::Loaded | SlotStatus::Failed => 2,
        }
    }

    fn lazy_slot(list: &TestList) -> (AdSlotController, MockRenderer) {
        let (slot, renderer) =
            list.slot(SlotSpec::new(INDEX, CreativeKind::Image).with_load_on_mount(false));
        slot.mount();
        (slot, renderer)
    }

    /// Apply one operation and check what it alone guarantees.
    fn apply(
        list: &TestList,
        slot: &AdSlotController,
        renderer: &MockRenderer,
        op: &Op,
    ) -> Result<(), TestCaseError> {
        let before = slot.snapshot();
        match op {
            Op::Visible => {
                list.bus.publish(viewable(&[("ad-7", INDEX)]).into());
            }
            Op::OtherVisible => {
                list.bus.publish(viewable(&[("ad-9", 9), ("post-8", 8)]).into());
            }
            Op::Complete(ratio) => {
                let current = renderer
                    .last_callbacks()
                    .map_or(false, |callbacks| callbacks.cycle() == before.cycle);
                renderer.complete(AdMetadata::with_aspect_ratio(*ratio));
                let after = slot.snapshot();
                if current && matches!(before.status, SlotStatus::Loading | SlotStatus::Loaded) {
                    prop_assert_eq!(after.status, SlotStatus::Loaded);
                    prop_assert_eq!(after.aspect_ratio().value(), *ratio);
                } else {
                    prop_assert_eq!(after, before);
                }
            }
            Op::Fail => {
                renderer.fail(AdLoadError::new("no fill").with_code(3));
            }
            Op::Recycle(video) => slot.recycle(kind(*video)),
            Op::Retry => {
                let result = slot.retry();
                prop_assert_eq!(result.is_ok(), before.status == SlotStatus::Failed);
            }
            Op::DeliverStale(success) => {
                if let Some(first) = renderer.callbacks(0) {
                    if first.cycle() != before.cycle {
                        if *success {
                            first.on_loaded(AdMetadata::with_aspect_ratio(2.5));
                        } else {
                            first.on_failed(AdLoadError::new("late"));
                        }
                        first.on_clicked();
                        prop_assert_eq!(slot.snapshot(), before);
                    }
                }
            }
            Op::Unmount => slot.unmount(),
            Op::Mount => slot.mount(),
        }
        Ok(())
    }

    fn check_aspect_ratio(snapshot: &SlotSnapshot) -> Result<(), TestCaseError> {
        prop_assert!(invariant_aspect_ratio(snapshot.status, snapshot.aspect_ratio()));
        if snapshot.status != SlotStatus::Loaded {
            prop_assert_eq!(snapshot.aspect_ratio().value(), DEFAULT_ASPECT_RATIO);
        }
        prop_assert!(snapshot.aspect_ratio().value() > 0.0);
        Ok(())
    }

    proptest! {
        #[test]
        fn prop_repeated_visibility_loads_once(repeats in 1usize..20) {
            let list = TestList::new();
            let (slot, renderer) = lazy_slot(&list);

            for _ in 0..repeats {
                list.bus.publish(viewable(&[("ad-7", INDEX)]).into());
            }

            prop_assert_eq!(renderer.load_count(), 1);
            prop_assert_eq!(slot.snapshot().status, SlotStatus::Loading);
        }

        #[test]
        fn prop_one_load_per_cycle(ops in prop::collection::vec(op_strategy(), 1..60)) {
            let list = TestList::new();
            let (slot, renderer) = lazy_slot(&list);

            for op in &ops {
                apply(&list, &slot, &renderer, op)?;
            }

            let cycles: Vec<_> = renderer.requests().iter().map(|r| r.cycle.value()).collect();
            prop_assert!(
                cycles.windows(2).all(|pair| pair[0] < pair[1]),
                "cycles not strictly increasing: {:?}",
                cycles
            );
        }

        #[test]
        fn prop_status_monotonic_within_cycle(ops in prop::collection::vec(op_strategy(), 1..60)) {
            let list = TestList::new();
            let (slot, renderer) = lazy_slot(&list);
            let mut last = slot.snapshot();

            for op in &ops {
                apply(&list, &slot, &renderer, op)?;
                let now = slot.snapshot();
                prop_assert!(now.cycle >= last.cycle);
                if now.cycle == last.cycle {
                    prop_assert!(
                        rank(now.status) >= rank(last.status),
                        "{:?} -> {:?} after {:?}",
                        last.status,
                        now.status,
                        op
                    );
                    if last.status.is_settled() {
                        prop_assert_eq!(now.status, last.status);
                    }
                }
                last = now;
            }
        }

        #[test]
        fn prop_aspect_ratio_default_unless_loaded(
            ops in prop::collection::vec(op_strategy(), 1..60)
        ) {
            let list = TestList::new();
            let (slot, renderer) = lazy_slot(&list);

            for op in &ops {
                apply(&list, &slot, &renderer, op)?;
                check_aspect_ratio(&slot.snapshot())?;
            }
        }

        #[test]
        fn prop_error_only_when_failed(ops in prop::collection::vec(op_strategy(), 1..60)) {
            let list = TestList::new();
            let (slot, renderer) = lazy_slot(&list);

            for op in &ops {
                apply(&list, &slot, &renderer, op)?;
                let snapshot = slot.snapshot();
                prop_assert_eq!(snapshot.error.is_some(), snapshot.status == SlotStatus::Failed);
            }
        }
    }
}
