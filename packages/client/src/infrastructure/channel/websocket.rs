//! WebSocket を使った ChatChannel 実装
//!
//! ## 責務
//!
//! - WebSocket 接続の確立と、読み取り・書き込みタスクの管理
//! - 受信フレームのデコードと購読者への配信
//! - 送信イベントのエンコード
//!
//! ## 設計ノート
//!
//! The controller never touches the socket. Outbound events go through an
//! unbounded queue drained by the writer task; inbound frames are decoded by
//! the reader task and published to the `SubscriberRegistry`. When the socket
//! closes or fails, subscribers receive `ChannelEvent::ConnectionLost`.

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::{sync::mpsc, task::JoinHandle};
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use crate::{
    domain::{
        ChannelError, ChannelEvent, ChatChannel, ClientAction, ServerEvent, SubscriberRegistry,
        Subscription,
    },
    error::ClientError,
    infrastructure::dto::websocket::{ClientEnvelope, ServerEnvelope},
};

/// ChatChannel backed by a WebSocket connection
pub struct WebSocketChannel {
    /// JSON frames waiting to be written
    outbound: mpsc::UnboundedSender<String>,
    /// Inbound event subscribers
    registry: SubscriberRegistry,
    reader: JoinHandle<()>,
}

impl WebSocketChannel {
    /// Connect to the backend at `url` and start the reader and writer tasks
    pub async fn connect(url: &str) -> Result<Self, ClientError> {
        let (ws_stream, _response) = connect_async(url)
            .await
            .map_err(|e| ClientError::ConnectionError(e.to_string()))?;
        tracing::info!("Connected to {}", url);

        let (mut write, mut read) = ws_stream.split();
        let registry = SubscriberRegistry::new();
        let (outbound, mut outbound_rx) = mpsc::unbounded_channel::<String>();

        let reader_registry = registry.clone();
        let reader = tokio::spawn(async move {
            let reason = loop {
                match read.next().await {
                    Some(Ok(Message::Text(text))) => {
                        if let Some(event) = decode_frame(&text) {
                            reader_registry.publish(ChannelEvent::Server(event));
                        }
                    }
                    Some(Ok(Message::Binary(data))) => {
                        tracing::debug!("Ignoring {} bytes of binary data", data.len());
                    }
                    Some(Ok(Message::Close(_))) => {
                        break "Server closed the connection".to_string();
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => break e.to_string(),
                    None => break "Connection closed".to_string(),
                }
            };

            tracing::warn!("Connection lost: {}", reason);
            reader_registry.publish(ChannelEvent::ConnectionLost(reason));
            reader_registry.close();
        });

        // The writer ends once every outbound sender is dropped or a write fails.
        tokio::spawn(async move {
            while let Some(json) = outbound_rx.recv().await {
                if let Err(e) = write.send(Message::Text(json.into())).await {
                    tracing::warn!("Failed to send frame: {}", e);
                    break;
                }
            }
            write.close().await.ok();
        });

        Ok(Self {
            outbound,
            registry,
            reader,
        })
    }
}

impl Drop for WebSocketChannel {
    fn drop(&mut self) {
        self.reader.abort();
    }
}

#[async_trait]
impl ChatChannel for WebSocketChannel {
    async fn emit(&self, action: ClientAction) -> Result<(), ChannelError> {
        let envelope = ClientEnvelope::from(action);
        let json =
            serde_json::to_string(&envelope).map_err(|e| ChannelError::Encode(e.to_string()))?;

        self.outbound.send(json).map_err(|_| ChannelError::Closed)?;
        tracing::debug!("Queued {:?}", envelope);
        Ok(())
    }

    fn subscribe(&self) -> Subscription {
        self.registry.subscribe()
    }
}

/// Decode one text frame into a domain event.
///
/// Frames that are not valid envelopes, or carry invalid values, are logged
/// and dropped.
pub(crate) fn decode_frame(text: &str) -> Option<ServerEvent> {
    let envelope = match serde_json::from_str::<ServerEnvelope>(text) {
        Ok(envelope) => envelope,
        Err(e) => {
            tracing::warn!("Ignoring undecodable frame {:?}: {}", text, e);
            return None;
        }
    };

    match ServerEvent::try_from(envelope) {
        Ok(event) => Some(event),
        Err(e) => {
            tracing::warn!("Ignoring invalid event {:?}: {}", text, e);
            None
        }
    }
}
