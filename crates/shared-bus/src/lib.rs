//! # Shared Bus - Visibility Event Bus
//!
//! Broadcasts "viewable items changed" facts from a scrollable list to every
//! live ad slot controller.
//!
//! ## Observer Registry
//!
//! ```text
//! ┌──────────────┐                    ┌──────────────┐
//! │ Scroll list  │                    │  Ad slot 3   │
//! │              │    publish()       │              │
//! │              │ ──────┐            │              │
//! └──────────────┘       │            └──────────────┘
//!                        ▼                    ↑
//!                  ┌──────────────┐          │
//!                  │ Viewability  │ ─────────┘
//!                  │     Bus      │  subscribe()
//!                  └──────────────┘
//! ```
//!
//! ## Lifecycle Rules
//!
//! - The bus holds **weak** handler references only.
//! - The `Subscription` guard owns the handler; dropping it deregisters.
//! - Delivery is synchronous and in registration order.
//! - Handlers only read the event; the bus state is never exposed to them.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{EventTopic, ViewEvent};
pub use publisher::{EventPublisher, ViewabilityBus};
pub use subscriber::{EventHandler, Subscription, SubscriptionError, SubscriptionId};
