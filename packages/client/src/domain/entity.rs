//! Entities held by the chat client state.

use super::value_object::{AvatarColor, MessageText, Username};

/// Join state of the local user.
///
/// The only transition is `Unjoined -> Joined`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Unjoined,
    Joined(Username),
}

/// The local user's session, created on load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub state: SessionState,
    pub avatar_color: AvatarColor,
}

impl Session {
    pub fn new(avatar_color: AvatarColor) -> Self {
        Self {
            state: SessionState::Unjoined,
            avatar_color,
        }
    }

    pub fn is_joined(&self) -> bool {
        matches!(self.state, SessionState::Joined(_))
    }

    /// The joined username, if any.
    pub fn username(&self) -> Option<&Username> {
        match &self.state {
            SessionState::Joined(username) => Some(username),
            SessionState::Unjoined => None,
        }
    }

    /// Whether `username` is the local user.
    pub fn is_me(&self, username: &Username) -> bool {
        self.username() == Some(username)
    }
}

/// A message in the chat log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub username: Username,
    pub text: MessageText,
    /// Display time (`HH:MM`) stamped when the message was received.
    pub timestamp: String,
    pub avatar_color: AvatarColor,
}

/// Append-only message log in arrival order.
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    messages: Vec<ChatMessage>,
}

impl MessageLog {
    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn as_slice(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }
}

/// A user listed in the backend roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnlineUser {
    pub username: Username,
}

/// Snapshot of the backend roster, replaced wholesale on each update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    users: Vec<OnlineUser>,
}

impl Roster {
    pub fn replace(&mut self, users: Vec<OnlineUser>) {
        self.users = users;
    }

    pub fn users(&self) -> &[OnlineUser] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

/// Connection state shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    #[default]
    Connecting,
    Connected,
    Disconnected(String),
}
