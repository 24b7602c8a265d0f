//! ChatClient: the controller behind the join screen and the chat room.
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - 参加・送信・入力中通知の送信（空入力は何もしない）
//! - 受信イベント（メッセージ・ロスター・入力中）による状態更新
//! - 入力中表示の期限切れと自分自身の除外
//! - 送信失敗・切断時の接続状態の更新
//!
//! ### どのような状況を想定しているか
//! - 正常系：Alice が参加して "hi" を送信し、エコーを受信する
//! - 異常系：チャネルが閉じている状態での送信
//! - エッジケース：空白のみの入力、未参加での送信、自分の入力中通知
//!
//! The controller is a plain `&mut self` state machine. Every operation that
//! depends on elapsed time takes `now` explicitly; the event loop owns the
//! timers and calls `expire_typing` when `next_typing_deadline` passes.

use std::sync::Arc;

use chatwave_shared::time::{Clock, display_time_now};
use tokio::time::Instant;

use crate::{
    config::ClientConfig,
    domain::{
        AvatarColor, ChannelEvent, ChatChannel, ChatMessage, ClientAction, ConnectionStatus,
        IncomingMessage, MessageLog, MessageText, OnlineUser, OutgoingMessage, Roster,
        ServerEvent, Session, SessionState, Subscription, TypingThrottle, TypingTracker,
        Username,
    },
};

/// A change the view has to reflect
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiUpdate {
    /// The local user joined the room
    Joined(Username),
    /// A message was appended to the log (the view shows the newest one)
    MessageAppended(ChatMessage),
    /// The roster snapshot was replaced
    RosterReplaced,
    /// Someone started or stopped typing
    TypingChanged,
    /// The draft was cleared after sending
    DraftCleared,
    /// Connection status changed
    ConnectionChanged(ConnectionStatus),
}

/// Chat client controller
pub struct ChatClient {
    channel: Arc<dyn ChatChannel>,
    clock: Arc<dyn Clock>,
    session: Session,
    draft: String,
    messages: MessageLog,
    roster: Roster,
    typing: TypingTracker,
    typing_throttle: TypingThrottle,
    connection: ConnectionStatus,
}

impl ChatClient {
    /// Create a client with a randomly assigned avatar colour
    pub fn new(
        channel: Arc<dyn ChatChannel>,
        clock: Arc<dyn Clock>,
        config: &ClientConfig,
    ) -> Self {
        Self {
            channel,
            clock,
            session: Session::new(AvatarColor::random()),
            draft: String::new(),
            messages: MessageLog::default(),
            roster: Roster::default(),
            typing: TypingTracker::new(config.typing_ttl),
            typing_throttle: TypingThrottle::new(config.typing_cooldown),
            connection: ConnectionStatus::Connecting,
        }
    }

    /// Replace the avatar colour assigned at load
    pub fn with_avatar_color(mut self, avatar_color: AvatarColor) -> Self {
        self.session.avatar_color = avatar_color;
        self
    }

    // ========================================
    // Accessors
    // ========================================

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn messages(&self) -> &[ChatMessage] {
        self.messages.as_slice()
    }

    pub fn roster(&self) -> &[OnlineUser] {
        self.roster.users()
    }

    pub fn typing_users(&self) -> Vec<&Username> {
        self.typing.users()
    }

    pub fn connection_status(&self) -> &ConnectionStatus {
        &self.connection
    }

    /// Earliest instant at which a typing indicator expires
    pub fn next_typing_deadline(&self) -> Option<Instant> {
        self.typing.next_deadline()
    }

    // ========================================
    // Lifecycle
    // ========================================

    /// Register for inbound events. Dropping the handle unmounts.
    pub fn mount(&self) -> Subscription {
        self.channel.subscribe()
    }

    /// Record that the channel is connected
    pub fn mark_connected(&mut self) -> Vec<UiUpdate> {
        self.set_connection(ConnectionStatus::Connected)
            .into_iter()
            .collect()
    }

    /// Switch to a freshly connected channel.
    ///
    /// The log, roster and draft are kept. The returned subscription is
    /// registered on the new channel before a joined user re-announces
    /// itself, so the backend's roster reply is not missed.
    pub async fn rebind(
        &mut self,
        channel: Arc<dyn ChatChannel>,
    ) -> (Subscription, Vec<UiUpdate>) {
        self.channel = channel;
        let subscription = self.mount();
        let mut updates = self.mark_connected();

        if let Some(username) = self.session.username().cloned() {
            tracing::info!("Rejoining as '{}'", username);
            updates.extend(self.emit(ClientAction::JoinChat(username)).await);
        }

        (subscription, updates)
    }

    // ========================================
    // User actions
    // ========================================

    /// Join the room with the given name.
    ///
    /// Blank names and repeated joins are no-ops. The transition to joined is
    /// optimistic: no acknowledgement is awaited.
    pub async fn join(&mut self, input: &str) -> Vec<UiUpdate> {
        if self.session.is_joined() {
            tracing::debug!("Already joined, ignoring join request");
            return Vec::new();
        }

        let Ok(username) = Username::new(input) else {
            return Vec::new();
        };

        let mut updates = self.emit(ClientAction::JoinChat(username.clone())).await;
        tracing::info!("Joined as '{}'", username);
        self.session.state = SessionState::Joined(username.clone());
        updates.insert(0, UiUpdate::Joined(username));
        updates
    }

    /// Replace the draft text, emitting a typing signal at most once per cooldown
    pub async fn update_draft(&mut self, text: &str, now: Instant) -> Vec<UiUpdate> {
        if self.draft == text {
            return Vec::new();
        }
        self.draft = text.to_string();

        let Some(username) = self.session.username().cloned() else {
            return Vec::new();
        };

        if !self.typing_throttle.try_acquire(now) {
            return Vec::new();
        }

        self.emit(ClientAction::Typing(username)).await
    }

    /// Send the current draft. Fire-and-forget; the draft is cleared.
    ///
    /// The message is not appended locally: the backend echoes it back.
    pub async fn send_message(&mut self) -> Vec<UiUpdate> {
        let Some(username) = self.session.username().cloned() else {
            return Vec::new();
        };
        let Ok(text) = MessageText::new(&self.draft) else {
            return Vec::new();
        };

        let message = OutgoingMessage {
            username,
            text,
            timestamp: display_time_now(self.clock.as_ref()),
            avatar_color: self.session.avatar_color.clone(),
        };

        let mut updates = self.emit(ClientAction::SendMessage(message)).await;
        self.draft.clear();
        updates.push(UiUpdate::DraftCleared);
        updates
    }

    // ========================================
    // Inbound events
    // ========================================

    /// Apply one inbound channel event
    pub fn handle_event(&mut self, event: ChannelEvent, now: Instant) -> Vec<UiUpdate> {
        match event {
            ChannelEvent::Server(ServerEvent::MessageReceived(message)) => {
                vec![self.receive_message(message)]
            }
            ChannelEvent::Server(ServerEvent::RosterUpdated(users)) => {
                tracing::debug!("Roster updated: {} users online", users.len());
                self.roster.replace(users);
                vec![UiUpdate::RosterReplaced]
            }
            ChannelEvent::Server(ServerEvent::UserTyping(username)) => {
                if self.session.is_me(&username) {
                    return Vec::new();
                }
                if self.typing.notice(username, now) {
                    vec![UiUpdate::TypingChanged]
                } else {
                    Vec::new()
                }
            }
            ChannelEvent::ConnectionLost(reason) => self
                .set_connection(ConnectionStatus::Disconnected(reason))
                .into_iter()
                .collect(),
        }
    }

    /// Drop typing indicators whose deadline has passed
    pub fn expire_typing(&mut self, now: Instant) -> Vec<UiUpdate> {
        let expired = self.typing.expire(now);
        if expired.is_empty() {
            return Vec::new();
        }

        tracing::trace!("Typing expired for {:?}", expired);
        vec![UiUpdate::TypingChanged]
    }

    fn receive_message(&mut self, message: IncomingMessage) -> UiUpdate {
        // Display time is stamped on receipt; the sender's time is only logged.
        let timestamp = display_time_now(self.clock.as_ref());
        if let Some(sent_at) = &message.sent_at
            && *sent_at != timestamp
        {
            tracing::debug!(
                "Message from '{}' sent at {} displayed at {}",
                message.username,
                sent_at,
                timestamp
            );
        }

        let entry = ChatMessage {
            username: message.username,
            text: message.text,
            timestamp,
            avatar_color: message.avatar_color,
        };
        self.messages.push(entry.clone());
        UiUpdate::MessageAppended(entry)
    }

    async fn emit(&mut self, action: ClientAction) -> Vec<UiUpdate> {
        match self.channel.emit(action).await {
            Ok(()) => Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to emit event: {}", e);
                self.set_connection(ConnectionStatus::Disconnected(e.to_string()))
                    .into_iter()
                    .collect()
            }
        }
    }

    fn set_connection(&mut self, status: ConnectionStatus) -> Option<UiUpdate> {
        if self.connection == status {
            return None;
        }
        self.connection = status.clone();
        Some(UiUpdate::ConnectionChanged(status))
    }
}
