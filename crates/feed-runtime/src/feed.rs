//! # Simulated Feed
//!
//! A flat list of posts with an ad every few items, and the visibility
//! payload a list view would emit for a scroll position.

use shared_types::{CreativeKind, SlotIndex, ViewableItem, ViewableItemsChanged};

/// One list item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedItem {
    /// Regular content.
    Post {
        /// List position.
        index: SlotIndex,
    },
    /// Native ad position.
    Ad {
        /// List position.
        index: SlotIndex,
        /// Creative kind requested for the slot.
        kind: CreativeKind,
    },
}

impl FeedItem {
    /// List position.
    pub fn index(&self) -> SlotIndex {
        match self {
            Self::Post { index } | Self::Ad { index, .. } => *index,
        }
    }

    /// Key the list view reports for the item.
    pub fn key(&self) -> String {
        match self {
            Self::Post { index } => format!("post-{index}"),
            Self::Ad { index, .. } => format!("ad-{index}"),
        }
    }
}

/// The whole list.
#[derive(Debug, Clone)]
pub struct Feed {
    items: Vec<FeedItem>,
}

impl Feed {
    /// Build `item_count` items where every `ad_stride`-th one is an ad.
    /// Ad kinds alternate image, video, image...
    pub fn generate(item_count: usize, ad_stride: usize) -> Self {
        let mut ads = 0usize;
        let items = (0..item_count)
            .map(|index| {
                if ad_stride > 0 && index % ad_stride == ad_stride - 1 {
                    let kind = if ads % 2 == 0 {
                        CreativeKind::Image
                    } else {
                        CreativeKind::Video
                    };
                    ads += 1;
                    FeedItem::Ad { index, kind }
                } else {
                    FeedItem::Post { index }
                }
            })
            .collect();
        Self { items }
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Ad positions with their creative kinds.
    pub fn ads(&self) -> impl Iterator<Item = (SlotIndex, CreativeKind)> + '_ {
        self.items.iter().filter_map(|item| match item {
            FeedItem::Ad { index, kind } => Some((*index, *kind)),
            FeedItem::Post { .. } => None,
        })
    }

    /// Visibility payload for a window of `size` items starting at `offset`.
    pub fn viewport(&self, offset: usize, size: usize) -> ViewableItemsChanged {
        let start = offset.min(self.items.len());
        let end = offset.saturating_add(size).min(self.items.len());
        ViewableItemsChanged::new(
            self.items[start..end]
                .iter()
                .map(|item| ViewableItem::new(item.key(), item.index()))
                .collect(),
        )
    }

    /// Last offset at which a full window still fits.
    pub fn last_offset(&self, size: usize) -> usize {
        self.items.len().saturating_sub(size)
    }
}
