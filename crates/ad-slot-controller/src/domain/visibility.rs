//! # Visibility Event Filter
//!
//! Pure predicates over a "viewable items changed" payload.
//!
//! Only entries whose key carries the ad marker count; a non-ad item never
//! triggers a load. Entries missing a key or index are skipped.

use shared_types::{SlotIndex, ViewableItemsChanged};

/// Default substring that marks a list key as an ad slot.
pub const DEFAULT_AD_KEY_MARKER: &str = "ad";

/// Whether a list key belongs to an ad slot.
#[must_use]
pub fn is_ad_key(key: &str, marker: &str) -> bool {
    key.contains(marker)
}

/// Indices of the ad slots currently on screen, in payload order.
#[must_use]
pub fn ads_in_view(event: &ViewableItemsChanged, marker: &str) -> Vec<SlotIndex> {
    event
        .viewable_items
        .iter()
        .filter_map(|item| item.parts())
        .filter(|(key, _)| is_ad_key(key, marker))
        .map(|(_, index)| index)
        .collect()
}

/// Whether the slot at `index` is currently visible.
#[must_use]
pub fn is_slot_visible(event: &ViewableItemsChanged, index: SlotIndex, marker: &str) -> bool {
    event
        .viewable_items
        .iter()
        .filter_map(|item| item.parts())
        .any(|(key, visible)| visible == index && is_ad_key(key, marker))
}
