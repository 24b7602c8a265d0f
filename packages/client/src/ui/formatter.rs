//! Message formatting utilities for terminal display.

use crate::{
    domain::{ChatMessage, ConnectionStatus, OnlineUser, Username},
    usecase::{ChatClient, UiUpdate},
};

const RULE: &str = "============================================================";

/// Message formatter for terminal display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format the join screen shown before the user picks a name
    ///
    /// # Arguments
    ///
    /// * `online_count` - Number of users currently in the room
    pub fn format_join_screen(online_count: usize) -> String {
        format!(
            "\n{rule}\nChatWave\nConnect and chat in real-time\n{rule}\n\
             Join the Conversation - what should we call you?\n{}\n",
            Self::format_online_count(online_count),
            rule = RULE,
        )
    }

    pub fn format_online_count(online_count: usize) -> String {
        format!("● {} users online", online_count)
    }

    /// Format the banner shown once the user has joined
    pub fn format_joined(username: &Username, avatar_color: &str) -> String {
        format!(
            "\n{rule}\nChatWave - you are [{}] {} ({})\n{rule}\n{}\n",
            username.initial(),
            username,
            avatar_color,
            Self::format_empty_log(),
            rule = RULE,
        )
    }

    pub fn format_empty_log() -> &'static str {
        "No messages yet. Start the conversation!"
    }

    /// Format the roster, marking the local user with "(you)"
    ///
    /// # Arguments
    ///
    /// * `users` - Roster snapshot in backend order
    /// * `me` - The local user, if joined
    pub fn format_roster(users: &[OnlineUser], me: Option<&Username>) -> String {
        let mut output = format!("\nOnline Users ({})\n", users.len());

        if users.is_empty() {
            output.push_str("(No users online)\n");
        } else {
            for user in users {
                let you = if Some(&user.username) == me {
                    " (you)"
                } else {
                    ""
                };
                output.push_str(&format!("  ● {}{}\n", user.username, you));
            }
        }

        output
    }

    /// Format a chat message
    ///
    /// Messages from the local user carry no avatar and are indented to the
    /// right; everyone else's show an avatar badge and the sender name.
    pub fn format_chat_message(message: &ChatMessage, me: Option<&Username>) -> String {
        if Some(&message.username) == me {
            format!(
                "\n{:>40} {}\n{:>46}\n",
                message.text.as_str(),
                "(you)",
                message.timestamp
            )
        } else {
            format!(
                "\n[{}] {}: {}\n{:>46}\n",
                message.username.initial(),
                message.username,
                message.text.as_str(),
                message.timestamp
            )
        }
    }

    /// Format the typing indicator, or `None` when nobody is typing
    pub fn format_typing_indicator(users: &[&Username]) -> Option<String> {
        match users {
            [] => None,
            [single] => Some(format!("{} is typing...", single)),
            many => {
                let names: Vec<&str> = many.iter().map(|u| u.as_str()).collect();
                Some(format!("{} are typing...", names.join(", ")))
            }
        }
    }

    /// Line printed when the last typing indicator goes away
    pub fn format_typing_cleared() -> &'static str {
        "(nobody is typing)"
    }

    /// Format a connection status change
    pub fn format_connection(status: &ConnectionStatus) -> String {
        match status {
            ConnectionStatus::Connecting => "\n… connecting\n".to_string(),
            ConnectionStatus::Connected => "\n✓ connected\n".to_string(),
            ConnectionStatus::Disconnected(reason) => {
                format!("\n✗ connection lost: {}\n", reason)
            }
        }
    }

    /// Render one update against the current client state
    ///
    /// Returns `None` for updates with nothing to print.
    pub fn render(client: &ChatClient, update: &UiUpdate) -> Option<String> {
        let me = client.session().username();

        match update {
            UiUpdate::Joined(username) => Some(Self::format_joined(
                username,
                client.session().avatar_color.as_str(),
            )),
            UiUpdate::MessageAppended(message) => Some(Self::format_chat_message(message, me)),
            UiUpdate::RosterReplaced if client.session().is_joined() => {
                Some(Self::format_roster(client.roster(), me))
            }
            UiUpdate::RosterReplaced => {
                Some(format!("\n{}\n", Self::format_online_count(client.roster().len())))
            }
            UiUpdate::TypingChanged => {
                let line = Self::format_typing_indicator(&client.typing_users())
                    .unwrap_or_else(|| Self::format_typing_cleared().to_string());
                Some(format!("\n{}\n", line))
            }
            UiUpdate::DraftCleared => None,
            UiUpdate::ConnectionChanged(status) => Some(Self::format_connection(status)),
        }
    }
}
