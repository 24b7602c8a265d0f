//! Channel abstraction between the chat client and the messaging backend.
//!
//! ## 概要
//!
//! `ChatChannel` is the injectable channel client. The controller emits
//! outbound actions through it, and the event loop consumes inbound events
//! from a `Subscription` obtained at mount.
//!
//! ## Subscription lifecycle
//!
//! A `Subscription` is registered in a `SubscriberRegistry` when created and
//! removed from it when dropped. Holding the handle for the lifetime of the
//! mounted view guarantees that a remount never leaves a stale handler behind.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use async_trait::async_trait;
use tokio::sync::mpsc;
use uuid::Uuid;

use super::{
    error::ChannelError,
    event::{ChannelEvent, ClientAction},
};

/// Sender half handed to each subscriber
pub type EventSender = mpsc::UnboundedSender<ChannelEvent>;

/// Bidirectional event channel to the messaging backend
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatChannel: Send + Sync {
    /// Send an outbound event. Fire-and-forget: no acknowledgement is awaited.
    async fn emit(&self, action: ClientAction) -> Result<(), ChannelError>;

    /// Register a new subscriber for inbound events.
    fn subscribe(&self) -> Subscription;
}

/// Set of live subscribers keyed by subscription ID
#[derive(Debug, Clone, Default)]
pub struct SubscriberRegistry {
    subscribers: Arc<Mutex<HashMap<Uuid, EventSender>>>,
}

impl SubscriberRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber and return its scoped handle
    pub fn subscribe(&self) -> Subscription {
        let id = Uuid::new_v4();
        let (sender, receiver) = mpsc::unbounded_channel();
        self.lock().insert(id, sender);
        tracing::debug!("Subscription '{}' registered", id);

        Subscription {
            id,
            receiver,
            registry: self.clone(),
        }
    }

    /// Deliver an event to every live subscriber.
    ///
    /// Returns the number of subscribers that received it. Subscribers whose
    /// receiver is gone are pruned.
    pub fn publish(&self, event: ChannelEvent) -> usize {
        let mut subscribers = self.lock();
        let mut delivered = 0;

        subscribers.retain(|id, sender| match sender.send(event.clone()) {
            Ok(()) => {
                delivered += 1;
                true
            }
            Err(_) => {
                tracing::warn!("Subscription '{}' is gone, pruning", id);
                false
            }
        });

        delivered
    }

    /// Drop every sender so that pending `recv` calls return `None`.
    pub fn close(&self) {
        self.lock().clear();
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().len()
    }

    fn unsubscribe(&self, id: &Uuid) {
        if self.lock().remove(id).is_some() {
            tracing::debug!("Subscription '{}' released", id);
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, EventSender>> {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Scoped subscription handle; deregisters itself on drop
#[derive(Debug)]
pub struct Subscription {
    id: Uuid,
    receiver: mpsc::UnboundedReceiver<ChannelEvent>,
    registry: SubscriberRegistry,
}

impl Subscription {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Wait for the next inbound event.
    ///
    /// Returns `None` once the channel has been closed.
    pub async fn recv(&mut self) -> Option<ChannelEvent> {
        self.receiver.recv().await
    }

    /// Take the next event if one is already queued.
    pub fn try_recv(&mut self) -> Option<ChannelEvent> {
        self.receiver.try_recv().ok()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.registry.unsubscribe(&self.id);
    }
}
