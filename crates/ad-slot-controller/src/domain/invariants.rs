//! # Domain Invariants
//!
//! Rules that must always hold for a slot. The controller checks them in
//! debug builds; the test suite checks them over random event sequences.

use super::errors::AdSlotError;
use super::state::{SlotEvent, SlotStatus};
use super::value_objects::{AspectRatio, DEFAULT_ASPECT_RATIO};

/// Invariant: within one cycle status only moves forward.
///
/// Allowed edges: `Idle → Loading`, `Loading → Loaded | Failed`, any
/// self-loop, any status back to `Idle` on reset, and `Failed → Loading`
/// on an explicit retry (which opens a new cycle).
pub fn invariant_monotonic_cycle(
    from: SlotStatus,
    to: SlotStatus,
    event: SlotEvent,
) -> Result<(), AdSlotError> {
    use SlotStatus::{Failed, Idle, Loaded, Loading};

    let allowed = from == to
        || matches!(
            (from, to),
            (Idle, Loading) | (Loading, Loaded) | (Loading, Failed)
        )
        || (to == Idle && event == SlotEvent::Reset)
        || (from == Failed && to == Loading && event == SlotEvent::Retry);

    if allowed {
        Ok(())
    } else {
        Err(AdSlotError::InvalidTransition {
            from,
            operation: "move backwards within a cycle",
        })
    }
}

/// Invariant: the observable aspect ratio is the default unless loaded.
#[must_use]
pub fn invariant_aspect_ratio(status: SlotStatus, observed: AspectRatio) -> bool {
    status == SlotStatus::Loaded || observed.value() == DEFAULT_ASPECT_RATIO
}

/// Invariant: at most one outstanding load per cycle.
#[must_use]
pub fn invariant_single_load(loads_in_cycle: u32) -> bool {
    loads_in_cycle <= 1
}
