//! # Event Subscriber
//!
//! Defines the subscription side of the visibility bus.
//!
//! The bus only keeps weak references to handlers. The strong reference
//! lives in the `Subscription` guard returned to the subscriber, so a
//! handler can never outlive the component that registered it.

use crate::events::{EventTopic, ViewEvent};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Weak};
use thiserror::Error;
use tracing::debug;

/// Handler invoked for every event published on a subscribed channel.
pub type EventHandler = dyn Fn(&ViewEvent) + Send + Sync;

/// Observer registry keyed by channel.
pub(crate) type Registry = RwLock<HashMap<EventTopic, Vec<Registration>>>;

/// Errors from subscription operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// No live registration with this id exists on the bus.
    #[error("Subscription {0} not found")]
    NotFound(SubscriptionId),
}

/// Identifier of one registration on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub(crate) u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One weak entry in the registry.
pub(crate) struct Registration {
    pub(crate) id: SubscriptionId,
    pub(crate) handler: Weak<EventHandler>,
}

/// Remove a registration from the registry. Returns whether it was present.
pub(crate) fn remove_registration(
    registry: &Registry,
    topic: EventTopic,
    id: SubscriptionId,
) -> bool {
    let mut topics = registry.write();
    let Some(entries) = topics.get_mut(&topic) else {
        return false;
    };
    let before = entries.len();
    entries.retain(|entry| entry.id != id);
    let removed = entries.len() != before;
    if entries.is_empty() {
        topics.remove(&topic);
    }
    removed
}

/// A subscription handle.
///
/// Owns the handler. When dropped, the registration is removed from the bus.
#[must_use = "dropping a Subscription unsubscribes its handler"]
pub struct Subscription {
    /// Registration id.
    id: SubscriptionId,

    /// Channel this handler listens on.
    topic: EventTopic,

    /// Strong reference keeping the handler alive.
    _handler: Arc<EventHandler>,

    /// Registry the handler was added to (for cleanup).
    registry: Weak<Registry>,
}

impl Subscription {
    /// Create a new subscription.
    pub(crate) fn new(
        id: SubscriptionId,
        topic: EventTopic,
        handler: Arc<EventHandler>,
        registry: Weak<Registry>,
    ) -> Self {
        Self {
            id,
            topic,
            _handler: handler,
            registry,
        }
    }

    /// Registration id.
    #[must_use]
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Channel this subscription listens on.
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        self.topic
    }

    /// Explicitly release the subscription. Equivalent to dropping it.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("topic", &self.topic)
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        remove_registration(&registry, self.topic, self.id);
        debug!(topic = %self.topic, id = %self.id, "Subscription dropped");
    }
}
