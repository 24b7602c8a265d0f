//! In-memory ChatChannel.
//!
//! Records every emitted action and lets the owner inject inbound events, so
//! a `ChatClient` can run without a backend.

use std::sync::{
    Arc, Mutex, PoisonError,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;

use crate::domain::{
    ChannelError, ChannelEvent, ChatChannel, ClientAction, ServerEvent, SubscriberRegistry,
    Subscription,
};

/// Loopback channel; cloning shares the same state
#[derive(Debug, Clone, Default)]
pub struct InMemoryChannel {
    registry: SubscriberRegistry,
    emitted: Arc<Mutex<Vec<ClientAction>>>,
    closed: Arc<AtomicBool>,
}

impl InMemoryChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver an inbound event to every subscriber
    pub fn deliver(&self, event: ServerEvent) -> usize {
        self.registry.publish(ChannelEvent::Server(event))
    }

    /// Simulate a dropped connection; later emits fail with `Closed`.
    pub fn disconnect(&self, reason: &str) {
        self.closed.store(true, Ordering::SeqCst);
        self.registry
            .publish(ChannelEvent::ConnectionLost(reason.to_string()));
    }

    /// Actions emitted so far, in order
    pub fn emitted(&self) -> Vec<ClientAction> {
        self.emitted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry.subscriber_count()
    }
}

#[async_trait]
impl ChatChannel for InMemoryChannel {
    async fn emit(&self, action: ClientAction) -> Result<(), ChannelError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(ChannelError::Closed);
        }

        self.emitted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(action);
        Ok(())
    }

    fn subscribe(&self) -> Subscription {
        self.registry.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Username;

    #[tokio::test]
    async fn test_emit_records_actions_in_order() {
        // テスト項目: 送信されたアクションが順番通りに記録される
        // given (前提条件):
        let channel = InMemoryChannel::new();
        let alice = Username::new("Alice").unwrap();

        // when (操作):
        channel
            .emit(ClientAction::JoinChat(alice.clone()))
            .await
            .unwrap();
        channel.emit(ClientAction::Typing(alice.clone())).await.unwrap();

        // then (期待する結果):
        assert_eq!(
            channel.emitted(),
            vec![ClientAction::JoinChat(alice.clone()), ClientAction::Typing(alice)]
        );
    }

    #[tokio::test]
    async fn test_emit_after_disconnect_fails() {
        // テスト項目: 切断後の送信は Closed エラーになり、購読者に切断が通知される
        // given (前提条件):
        let channel = InMemoryChannel::new();
        let mut subscription = channel.subscribe();

        // when (操作):
        channel.disconnect("backend went away");
        let result = channel
            .emit(ClientAction::Typing(Username::new("Alice").unwrap()))
            .await;

        // then (期待する結果):
        assert_eq!(result, Err(ChannelError::Closed));
        assert_eq!(
            subscription.recv().await,
            Some(ChannelEvent::ConnectionLost("backend went away".to_string()))
        );
        assert!(channel.emitted().is_empty());
    }
}
