//! WebSocket message DTOs.
//!
//! Every frame is a JSON envelope `{"event": <name>, "data": <payload>}`.
//! Event and field names follow the backend contract (`message` carries the
//! text, `avatarColor` is camelCase).

use serde::{Deserialize, Serialize};

/// Events sent by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEnvelope {
    /// Full roster snapshot
    UpdateUsers(Vec<OnlineUserInfo>),
    /// A chat message broadcast to the room
    ReceiveMessage(ReceivedMessage),
    /// Username of someone who is typing
    UserTyping(String),
}

/// Events sent by the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEnvelope {
    /// Username joining the room
    JoinChat(String),
    /// A chat message to broadcast
    SendMessage(SentMessage),
    /// Username of the local user who is typing
    Typing(String),
}

/// Roster entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnlineUserInfo {
    pub username: String,
}

/// Inbound chat message payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceivedMessage {
    pub username: String,
    pub message: String,
    #[serde(rename = "avatarColor", default, skip_serializing_if = "Option::is_none")]
    pub avatar_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

/// Outbound chat message payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentMessage {
    pub username: String,
    pub message: String,
    pub time: String,
    #[serde(rename = "avatarColor")]
    pub avatar_color: String,
}
