//! Conversion logic between DTOs and domain events.

use crate::domain::{
    entity::OnlineUser,
    error::ValueObjectError,
    event::{ClientAction, IncomingMessage, ServerEvent},
    value_object::{AvatarColor, MessageText, Username},
};
use crate::infrastructure::dto::websocket as dto;

// ========================================
// DTO → Domain Event
// ========================================

impl TryFrom<dto::ServerEnvelope> for ServerEvent {
    type Error = ValueObjectError;

    fn try_from(envelope: dto::ServerEnvelope) -> Result<Self, Self::Error> {
        match envelope {
            dto::ServerEnvelope::UpdateUsers(users) => {
                // A roster entry with a blank name cannot be displayed; skip it
                // rather than reject the whole snapshot.
                let users = users
                    .into_iter()
                    .filter_map(|info| match Username::new(&info.username) {
                        Ok(username) => Some(OnlineUser { username }),
                        Err(e) => {
                            tracing::warn!("Skipping roster entry {:?}: {}", info.username, e);
                            None
                        }
                    })
                    .collect();
                Ok(ServerEvent::RosterUpdated(users))
            }
            dto::ServerEnvelope::ReceiveMessage(msg) => {
                Ok(ServerEvent::MessageReceived(IncomingMessage {
                    username: Username::new(msg.username)?,
                    text: MessageText::from_wire(msg.message),
                    avatar_color: AvatarColor::from_wire(msg.avatar_color),
                    sent_at: msg.time,
                }))
            }
            dto::ServerEnvelope::UserTyping(username) => {
                Ok(ServerEvent::UserTyping(Username::new(username)?))
            }
        }
    }
}

// ========================================
// Domain Event → DTO
// ========================================

impl From<ClientAction> for dto::ClientEnvelope {
    fn from(action: ClientAction) -> Self {
        match action {
            ClientAction::JoinChat(username) => Self::JoinChat(username.into_string()),
            ClientAction::SendMessage(msg) => Self::SendMessage(dto::SentMessage {
                username: msg.username.into_string(),
                message: msg.text.into_string(),
                time: msg.timestamp,
                avatar_color: msg.avatar_color.into_string(),
            }),
            ClientAction::Typing(username) => Self::Typing(username.into_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::event::OutgoingMessage;

    #[test]
    fn test_roster_envelope_to_domain_skips_blank_names() {
        // テスト項目: 空のユーザー名を含むロスターは該当エントリのみ除外して変換される
        // given (前提条件):
        let envelope = dto::ServerEnvelope::UpdateUsers(vec![
            dto::OnlineUserInfo {
                username: "Bob".to_string(),
            },
            dto::OnlineUserInfo {
                username: "  ".to_string(),
            },
        ]);

        // when (操作):
        let event = ServerEvent::try_from(envelope).unwrap();

        // then (期待する結果):
        assert_eq!(
            event,
            ServerEvent::RosterUpdated(vec![OnlineUser {
                username: Username::new("Bob").unwrap()
            }])
        );
    }

    #[test]
    fn test_message_envelope_to_domain() {
        // テスト項目: 受信メッセージがドメインイベントに変換され、送信側の時刻も保持される
        // given (前提条件):
        let envelope = dto::ServerEnvelope::ReceiveMessage(dto::ReceivedMessage {
            username: "Bob".to_string(),
            message: "hello".to_string(),
            avatar_color: None,
            time: Some("09:59".to_string()),
        });

        // when (操作):
        let event = ServerEvent::try_from(envelope).unwrap();

        // then (期待する結果):
        assert_eq!(
            event,
            ServerEvent::MessageReceived(IncomingMessage {
                username: Username::new("Bob").unwrap(),
                text: MessageText::new("hello").unwrap(),
                avatar_color: AvatarColor::default(),
                sent_at: Some("09:59".to_string()),
            })
        );
    }

    #[test]
    fn test_blank_message_envelope_is_kept() {
        // テスト項目: 本文が空白のみのメッセージも変換され、本文はそのまま保持される
        // given (前提条件):
        let envelope = dto::ServerEnvelope::ReceiveMessage(dto::ReceivedMessage {
            username: "Bob".to_string(),
            message: " ".to_string(),
            avatar_color: None,
            time: None,
        });

        // when (操作):
        let result = ServerEvent::try_from(envelope);

        // then (期待する結果):
        match result {
            Ok(ServerEvent::MessageReceived(msg)) => assert_eq!(msg.text.as_str(), " "),
            other => panic!("unexpected conversion result: {:?}", other),
        }
    }

    #[test]
    fn test_indented_message_envelope_keeps_whitespace() {
        // テスト項目: 先頭がインデントされたメッセージは空白を削らずに変換される
        // given (前提条件):
        let envelope = dto::ServerEnvelope::ReceiveMessage(dto::ReceivedMessage {
            username: "Bob".to_string(),
            message: "    fn main() {}\n".to_string(),
            avatar_color: Some("teal".to_string()),
            time: None,
        });

        // when (操作):
        let result = ServerEvent::try_from(envelope);

        // then (期待する結果):
        match result {
            Ok(ServerEvent::MessageReceived(msg)) => {
                assert_eq!(msg.text.as_str(), "    fn main() {}\n")
            }
            other => panic!("unexpected conversion result: {:?}", other),
        }
    }

    #[test]
    fn test_send_message_action_to_envelope() {
        // テスト項目: メッセージ送信アクションが DTO に変換される
        // given (前提条件):
        let action = ClientAction::SendMessage(OutgoingMessage {
            username: Username::new("Alice").unwrap(),
            text: MessageText::new("hi").unwrap(),
            timestamp: "10:00".to_string(),
            avatar_color: AvatarColor::from_wire(Some("pink".to_string())),
        });

        // when (操作):
        let envelope: dto::ClientEnvelope = action.into();

        // then (期待する結果):
        assert_eq!(
            envelope,
            dto::ClientEnvelope::SendMessage(dto::SentMessage {
                username: "Alice".to_string(),
                message: "hi".to_string(),
                time: "10:00".to_string(),
                avatar_color: "pink".to_string(),
            })
        );
    }

    #[test]
    fn test_typing_action_to_envelope() {
        // テスト項目: 入力中アクションが typing イベントに変換される
        // given (前提条件):
        let action = ClientAction::Typing(Username::new("Alice").unwrap());

        // when (操作):
        let envelope: dto::ClientEnvelope = action.into();

        // then (期待する結果):
        assert_eq!(envelope, dto::ClientEnvelope::Typing("Alice".to_string()));
    }
}
