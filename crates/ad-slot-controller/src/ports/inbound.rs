//! # Inbound Ports
//!
//! API trait defining what an ad slot can do for the presentation layer.

use crate::domain::{AdSlotError, SlotSnapshot};
use shared_types::{CreativeKind, ViewableItemsChanged};

/// Ad Slot API - inbound port.
///
/// Every operation runs to completion without waiting on the renderer.
/// Load failures never surface here; they show up as
/// `SlotStatus::Failed` in the snapshot.
pub trait AdSlotApi: Send + Sync {
    /// Subscribe to visibility events and, with `load_on_mount`, start loading.
    fn mount(&self);

    /// Apply one visibility broadcast to this slot.
    fn handle_viewable_items_changed(&self, event: &ViewableItemsChanged);

    /// Reset the slot for a new list item of `kind`, then mount again.
    fn recycle(&self, kind: CreativeKind);

    /// Reset the slot and release its subscriptions.
    fn unmount(&self);

    /// Start a fresh cycle after a failure.
    ///
    /// # Errors
    /// - `InvalidTransition` unless the slot is `Failed`
    fn retry(&self) -> Result<(), AdSlotError>;

    /// Read-only state for rendering decisions.
    fn snapshot(&self) -> SlotSnapshot;
}
