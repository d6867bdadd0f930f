//! # Ad Slot Configuration
//!
//! Ad-unit identifiers and controller policy, shared by every slot of a
//! list.
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `ADSLOT_IMAGE_UNIT_ID` | test native unit | Ad unit for image creatives |
//! | `ADSLOT_VIDEO_UNIT_ID` | test native video unit | Ad unit for video creatives |
//! | `ADSLOT_REFRESH_INTERVAL_SECS` | `120` | Refresh interval handed to the renderer |
//! | `ADSLOT_AD_KEY_MARKER` | `ad` | Substring marking a list key as an ad |
//! | `ADSLOT_LOG_CATEGORY` | `AD` | Category passed to the logger |
//! | `ADSLOT_RETRY_FAILED_ON_VISIBLE` | `false` | Start a new cycle when a failed slot scrolls into view |

use crate::domain::{AdSlotError, DEFAULT_AD_KEY_MARKER};
use crate::ports::UnitIdSource;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationSeconds};
use shared_types::CreativeKind;
use std::env;
use std::time::Duration;

/// Public test ad unit for native advanced image creatives.
pub const TEST_IMAGE_UNIT_ID: &str = "ca-app-pub-3940256099942544/2247696110";

/// Public test ad unit for native advanced video creatives.
pub const TEST_VIDEO_UNIT_ID: &str = "ca-app-pub-3940256099942544/1044960115";

/// Default refresh interval (two minutes).
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(120);

/// Default log category.
pub const DEFAULT_LOG_CATEGORY: &str = "AD";

/// Mapping from creative kind to ad-unit identifier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdUnitIds {
    /// Unit requested for image creatives.
    pub image: String,
    /// Unit requested for video creatives.
    pub video: String,
}

impl AdUnitIds {
    /// Identifier for a kind, empty string when unset.
    #[must_use]
    pub fn get(&self, kind: CreativeKind) -> &str {
        match kind {
            CreativeKind::Image => &self.image,
            CreativeKind::Video => &self.video,
        }
    }
}

impl Default for AdUnitIds {
    fn default() -> Self {
        Self {
            image: TEST_IMAGE_UNIT_ID.to_string(),
            video: TEST_VIDEO_UNIT_ID.to_string(),
        }
    }
}

impl UnitIdSource for AdUnitIds {
    fn unit_id(&self, kind: CreativeKind) -> Option<&str> {
        let id = self.get(kind);
        (!id.is_empty()).then_some(id)
    }
}

/// Ad slot configuration.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AdSlotConfig {
    /// Ad-unit identifiers by creative kind.
    pub unit_ids: AdUnitIds,

    /// Refresh interval handed to the renderer with every load.
    #[serde_as(as = "DurationSeconds<u64>")]
    pub refresh_interval: Duration,

    /// Substring that marks a list key as an ad slot.
    pub ad_key_marker: String,

    /// Category passed to the logger collaborator.
    pub log_category: String,

    /// Start a new cycle when a failed slot is reported visible again.
    pub retry_failed_on_visible: bool,
}

impl Default for AdSlotConfig {
    fn default() -> Self {
        Self {
            unit_ids: AdUnitIds::default(),
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            ad_key_marker: DEFAULT_AD_KEY_MARKER.to_string(),
            log_category: DEFAULT_LOG_CATEGORY.to_string(),
            retry_failed_on_visible: false,
        }
    }
}

impl AdSlotConfig {
    /// Create a config for testing (deterministic unit ids).
    pub fn for_testing() -> Self {
        Self {
            unit_ids: AdUnitIds {
                image: "test-image-unit".to_string(),
                video: "test-video-unit".to_string(),
            },
            refresh_interval: Duration::from_secs(60),
            ..Self::default()
        }
    }

    /// Create configuration from environment variables, falling back to
    /// defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            unit_ids: AdUnitIds {
                image: env::var("ADSLOT_IMAGE_UNIT_ID").unwrap_or(defaults.unit_ids.image),
                video: env::var("ADSLOT_VIDEO_UNIT_ID").unwrap_or(defaults.unit_ids.video),
            },

            refresh_interval: env::var("ADSLOT_REFRESH_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map_or(defaults.refresh_interval, Duration::from_secs),

            ad_key_marker: env::var("ADSLOT_AD_KEY_MARKER").unwrap_or(defaults.ad_key_marker),

            log_category: env::var("ADSLOT_LOG_CATEGORY").unwrap_or(defaults.log_category),

            retry_failed_on_visible: env::var("ADSLOT_RETRY_FAILED_ON_VISIBLE")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(defaults.retry_failed_on_visible),
        }
    }

    /// Validate configuration before slots are created.
    ///
    /// # Errors
    /// - `MissingUnitId` if a creative kind has no unit id
    /// - `InvalidConfig` if the marker is empty or the refresh interval is zero
    pub fn validate(&self) -> Result<(), AdSlotError> {
        for kind in [CreativeKind::Image, CreativeKind::Video] {
            if self.unit_ids.unit_id(kind).is_none() {
                return Err(AdSlotError::MissingUnitId(kind));
            }
        }
        if self.ad_key_marker.is_empty() {
            return Err(AdSlotError::InvalidConfig(
                "ad_key_marker must not be empty".to_string(),
            ));
        }
        if self.refresh_interval.is_zero() {
            return Err(AdSlotError::InvalidConfig(
                "refresh_interval must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
