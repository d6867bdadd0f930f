//! # Event Publisher
//!
//! Defines the publishing side of the visibility bus.

use crate::events::{EventTopic, ViewEvent};
use crate::subscriber::{
    remove_registration, EventHandler, Registration, Registry, Subscription, SubscriptionError,
    SubscriptionId,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Trait for publishing events to the bus.
pub trait EventPublisher: Send + Sync {
    /// Publish an event to every live handler on its channel.
    ///
    /// Handlers run synchronously, in registration order, before this
    /// returns.
    ///
    /// # Returns
    ///
    /// The number of handlers that received the event.
    fn publish(&self, event: ViewEvent) -> usize;

    /// Get the total number of events published.
    fn events_published(&self) -> u64;
}

/// In-memory observer registry.
///
/// Handlers are stored as weak references keyed by channel. Publishing
/// snapshots the live handlers before invoking them, so a handler may
/// subscribe or unsubscribe while an event is being delivered.
pub struct ViewabilityBus {
    /// Weak handlers by channel.
    registry: Arc<Registry>,

    /// Next registration id.
    next_id: AtomicU64,

    /// Total events published.
    events_published: AtomicU64,
}

impl ViewabilityBus {
    /// Create an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Registry::new(HashMap::new())),
            next_id: AtomicU64::new(1),
            events_published: AtomicU64::new(0),
        }
    }

    /// Register a handler on a channel.
    ///
    /// The returned `Subscription` owns the handler; dropping it removes
    /// the registration.
    pub fn subscribe(&self, topic: EventTopic, handler: Arc<EventHandler>) -> Subscription {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.registry
            .write()
            .entry(topic)
            .or_default()
            .push(Registration {
                id,
                handler: Arc::downgrade(&handler),
            });

        debug!(topic = %topic, id = %id, "New subscription created");

        Subscription::new(id, topic, handler, Arc::downgrade(&self.registry))
    }

    /// Convenience wrapper around [`subscribe`](Self::subscribe) for closures.
    pub fn subscribe_fn<F>(&self, topic: EventTopic, handler: F) -> Subscription
    where
        F: Fn(&ViewEvent) + Send + Sync + 'static,
    {
        self.subscribe(topic, Arc::new(handler))
    }

    /// Remove a registration without waiting for its guard to drop.
    ///
    /// # Errors
    ///
    /// `SubscriptionError::NotFound` if the id is not registered on `topic`.
    pub fn unsubscribe(
        &self,
        topic: EventTopic,
        id: SubscriptionId,
    ) -> Result<(), SubscriptionError> {
        if remove_registration(&self.registry, topic, id) {
            debug!(topic = %topic, id = %id, "Subscription removed");
            Ok(())
        } else {
            Err(SubscriptionError::NotFound(id))
        }
    }

    /// Number of live handlers on a channel.
    #[must_use]
    pub fn subscriber_count(&self, topic: EventTopic) -> usize {
        self.registry
            .read()
            .get(&topic)
            .map_or(0, |entries| {
                entries
                    .iter()
                    .filter(|entry| entry.handler.strong_count() > 0)
                    .count()
            })
    }

    /// Upgrade the live handlers of a channel.
    fn live_handlers(&self, topic: EventTopic) -> Vec<Arc<EventHandler>> {
        self.registry.read().get(&topic).map_or_else(Vec::new, |entries| {
            entries.iter().filter_map(|e| e.handler.upgrade()).collect()
        })
    }
}

impl Default for ViewabilityBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventPublisher for ViewabilityBus {
    fn publish(&self, event: ViewEvent) -> usize {
        let topic = event.topic();

        // Always increment counter (event was attempted)
        self.events_published.fetch_add(1, Ordering::Relaxed);

        let handlers = self.live_handlers(topic);
        if handlers.is_empty() {
            debug!(topic = %topic, "Event dropped (no receivers)");
            return 0;
        }

        for handler in &handlers {
            handler(&event);
        }

        debug!(topic = %topic, receivers = handlers.len(), "Event published");
        handlers.len()
    }

    fn events_published(&self) -> u64 {
        self.events_published.load(Ordering::Relaxed)
    }
}
