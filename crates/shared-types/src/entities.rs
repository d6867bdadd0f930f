//! # Core Domain Entities
//!
//! Slot identity and creative metadata shared by the publisher, the slot
//! controller and the renderer adapters.
//!
//! ## Clusters
//!
//! - **Slot identity**: `SlotIndex`, `CreativeKind`
//! - **Creative**: `AdMetadata`

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of an item inside a scrollable list.
///
/// Stable for the lifetime of a slot; used to correlate visibility events
/// with the slot that owns the position.
pub type SlotIndex = usize;

/// Creative type served into a slot.
///
/// Fixed for the lifetime of a slot. Selects which ad-unit identifier is
/// requested from the ad network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CreativeKind {
    /// Image-backed native creative.
    #[default]
    Image,
    /// Video-backed native creative.
    Video,
}

impl CreativeKind {
    /// Lowercase label used in logs and configuration keys.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            CreativeKind::Image => "image",
            CreativeKind::Video => "video",
        }
    }
}

impl fmt::Display for CreativeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata reported by the renderer once a creative has loaded.
///
/// Only `aspect_ratio` is required; the remaining fields are whatever the
/// native ad carried and are kept for logging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdMetadata {
    /// Width / height of the creative's media.
    pub aspect_ratio: f64,
    /// Headline text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    /// Tagline / body text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    /// Advertiser display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advertiser: Option<String>,
    /// Call-to-action label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_to_action: Option<String>,
    /// Store name for app-install creatives.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<String>,
    /// Star rating for app-install creatives.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    /// Whether the creative carries video content.
    #[serde(default)]
    pub video: bool,
}

impl AdMetadata {
    /// Metadata carrying only an aspect ratio.
    #[must_use]
    pub fn with_aspect_ratio(aspect_ratio: f64) -> Self {
        Self {
            aspect_ratio,
            headline: None,
            tagline: None,
            advertiser: None,
            call_to_action: None,
            store: None,
            rating: None,
            video: false,
        }
    }
}
