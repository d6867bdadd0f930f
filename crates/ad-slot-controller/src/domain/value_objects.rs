//! # Domain Value Objects
//!
//! Immutable value types for the ad slot controller.

use super::errors::AdSlotError;
use super::state::SlotStatus;
use serde::{Deserialize, Serialize};
use shared_types::{AdLoadError, CreativeKind, SlotIndex};
use std::fmt;

/// Aspect ratio used when no creative shape is known.
pub const DEFAULT_ASPECT_RATIO: f64 = 1.0;

/// Width / height of a loaded creative. Always positive and finite.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct AspectRatio(f64);

impl AspectRatio {
    /// Validate and wrap a ratio.
    ///
    /// # Errors
    /// - `InvalidAspectRatio` if the value is not a positive finite number
    pub fn new(value: f64) -> Result<Self, AdSlotError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(AdSlotError::InvalidAspectRatio(value))
        }
    }

    /// Raw ratio.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self(DEFAULT_ASPECT_RATIO)
    }
}

impl TryFrom<f64> for AspectRatio {
    type Error = AdSlotError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AspectRatio> for f64 {
    fn from(ratio: AspectRatio) -> Self {
        ratio.0
    }
}

/// Identity of one load cycle of one slot.
///
/// Monotonically increasing per slot. Callbacks capture the token at issue
/// time; a callback whose token no longer matches is stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CycleToken(u64);

impl CycleToken {
    /// Token of a freshly created slot.
    #[must_use]
    pub fn initial() -> Self {
        Self(0)
    }

    /// Token of the following cycle.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Raw counter value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for CycleToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cycle-{}", self.0)
    }
}

/// Construction parameters of a slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSpec {
    /// List position owned by the slot.
    pub index: SlotIndex,
    /// Creative kind requested for the slot.
    pub kind: CreativeKind,
    /// Load immediately on mount instead of waiting for visibility.
    pub load_on_mount: bool,
    /// Whether the presentation layer renders a media view for the slot.
    pub has_media: bool,
}

impl SlotSpec {
    /// A slot that loads on mount and has no media view.
    #[must_use]
    pub fn new(index: SlotIndex, kind: CreativeKind) -> Self {
        Self {
            index,
            kind,
            load_on_mount: true,
            has_media: false,
        }
    }

    /// Set the load-on-mount flag.
    #[must_use]
    pub fn with_load_on_mount(mut self, load_on_mount: bool) -> Self {
        self.load_on_mount = load_on_mount;
        self
    }

    /// Set the media flag.
    #[must_use]
    pub fn with_media(mut self, has_media: bool) -> Self {
        self.has_media = has_media;
        self
    }
}

/// Observability-only notifications forwarded from the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdInteraction {
    /// The network served the ad to the native view.
    AdServed,
    /// An impression was recorded.
    Impression,
    /// The user clicked the ad.
    Clicked,
    /// The ad took the user out of the application.
    LeftApplication,
}

/// Read-only view of a slot for the presentation layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlotSnapshot {
    /// List position.
    pub index: SlotIndex,
    /// Creative kind of the current cycle.
    pub kind: CreativeKind,
    /// Loading status.
    pub status: SlotStatus,
    /// Current cycle.
    pub cycle: CycleToken,
    /// Whether the slot renders a media view.
    pub has_media: bool,
    /// Ratio reported by the last success callback of this cycle.
    pub(crate) loaded_ratio: Option<AspectRatio>,
    /// Error reported by the failure callback of this cycle.
    pub error: Option<AdLoadError>,
}

impl SlotSnapshot {
    /// Aspect ratio for layout. The default unless the slot is loaded.
    #[must_use]
    pub fn aspect_ratio(&self) -> AspectRatio {
        match self.status {
            SlotStatus::Loaded => self.loaded_ratio.unwrap_or_default(),
            _ => AspectRatio::default(),
        }
    }

    /// Ratio for the media view, if the slot has one.
    #[must_use]
    pub fn media_aspect_ratio(&self) -> Option<AspectRatio> {
        self.has_media.then(|| self.aspect_ratio())
    }

    /// Whether a load is outstanding (spinner shown).
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.status == SlotStatus::Loading
    }

    /// Whether the creative loaded.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.status == SlotStatus::Loaded
    }

    /// Whether the cycle failed (error glyph shown).
    #[must_use]
    pub fn has_error(&self) -> bool {
        self.status == SlotStatus::Failed
    }

    /// Whether the neutral placeholder covers the slot.
    #[must_use]
    pub fn placeholder_visible(&self) -> bool {
        !self.content_visible()
    }

    /// Whether the creative content is shown.
    #[must_use]
    pub fn content_visible(&self) -> bool {
        self.is_loaded() && !self.is_loading() && !self.has_error()
    }
}
