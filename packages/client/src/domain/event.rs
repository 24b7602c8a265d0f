//! Events crossing the boundary between the client and the messaging backend.

use super::{
    entity::OnlineUser,
    value_object::{AvatarColor, MessageText, Username},
};

/// A message as delivered by the backend, before it is stamped for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub username: Username,
    pub text: MessageText,
    pub avatar_color: AvatarColor,
    /// Time string attached by the sender, if any. Not used for display.
    pub sent_at: Option<String>,
}

/// A message the local user sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub username: Username,
    pub text: MessageText,
    pub timestamp: String,
    pub avatar_color: AvatarColor,
}

/// Inbound events produced by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    /// Full roster snapshot (`update_users`)
    RosterUpdated(Vec<OnlineUser>),
    /// A chat message (`receive_message`)
    MessageReceived(IncomingMessage),
    /// Someone is typing (`user_typing`)
    UserTyping(Username),
}

/// Outbound events produced by user actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientAction {
    /// `join_chat`
    JoinChat(Username),
    /// `send_message`
    SendMessage(OutgoingMessage),
    /// `typing`
    Typing(Username),
}

/// Everything a subscriber can observe on a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelEvent {
    Server(ServerEvent),
    ConnectionLost(String),
}
