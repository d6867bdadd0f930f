//! # View Events
//!
//! Defines the events that flow through the visibility bus and the named
//! channels they are published on.

use serde::{Deserialize, Serialize};
use shared_types::ViewableItemsChanged;
use std::fmt;

/// All events that can be published to the visibility bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewEvent {
    /// The set of on-screen list items changed after a scroll or layout pass.
    ViewableItemsChanged(ViewableItemsChanged),
}

impl ViewEvent {
    /// Get the channel this event is published on.
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::ViewableItemsChanged(_) => EventTopic::ViewableItemsChanged,
        }
    }

    /// Visibility payload, if this is a visibility event.
    #[must_use]
    pub fn viewable_items(&self) -> Option<&ViewableItemsChanged> {
        match self {
            Self::ViewableItemsChanged(payload) => Some(payload),
        }
    }
}

impl From<ViewableItemsChanged> for ViewEvent {
    fn from(payload: ViewableItemsChanged) -> Self {
        Self::ViewableItemsChanged(payload)
    }
}

/// Named channels on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// `onViewableItemsChanged` broadcasts from a scrollable list.
    ViewableItemsChanged,
}

impl EventTopic {
    /// Channel name as used by the list that emits it.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::ViewableItemsChanged => "onViewableItemsChanged",
        }
    }

    /// Resolve a channel by name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "onViewableItemsChanged" => Some(Self::ViewableItemsChanged),
            _ => None,
        }
    }
}

impl fmt::Display for EventTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
