//! # Visibility Payloads
//!
//! Shape of the "viewable items changed" broadcast emitted by a list on
//! every scroll-driven visibility recomputation.
//!
//! ```json
//! { "viewableItems": [ { "key": "ad-3", "index": 3 }, { "key": "post-4", "index": 4 } ] }
//! ```
//!
//! Entries may be malformed: a missing or wrongly typed key or index reads
//! as `None`, and an entry that is not an object at all reads as an empty
//! entry. Neither fails the payload; consumers skip such entries.

use crate::entities::SlotIndex;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnError};

/// One currently on-screen list item.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ViewableItem {
    /// List key of the item.
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub key: Option<String>,
    /// Position of the item in the list.
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub index: Option<SlotIndex>,
}

impl ViewableItem {
    /// A well-formed entry.
    pub fn new(key: impl Into<String>, index: SlotIndex) -> Self {
        Self {
            key: Some(key.into()),
            index: Some(index),
        }
    }

    /// `(key, index)` when both are present.
    #[must_use]
    pub fn parts(&self) -> Option<(&str, SlotIndex)> {
        match (&self.key, self.index) {
            (Some(key), Some(index)) => Some((key.as_str(), index)),
            _ => None,
        }
    }
}

/// Broadcast payload: every item currently on screen, in list order.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ViewableItemsChanged {
    /// All visible items across the whole list, not just ads.
    #[serde(default)]
    #[serde_as(deserialize_as = "Vec<DefaultOnError>")]
    pub viewable_items: Vec<ViewableItem>,
}

impl ViewableItemsChanged {
    /// Build a payload from visible items.
    pub fn new(viewable_items: Vec<ViewableItem>) -> Self {
        Self { viewable_items }
    }

    /// Parse a JSON payload.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error when the document itself is not a
    /// payload object or `viewableItems` is not a list. Malformed entries
    /// inside the list still parse.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Number of entries, including malformed ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.viewable_items.len()
    }

    /// Whether nothing is on screen.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.viewable_items.is_empty()
    }
}
