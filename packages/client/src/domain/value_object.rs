//! Value objects for the chat client domain.
//!
//! Each value object validates its invariant at construction, so the rest of
//! the client can hold one without re-checking.

use rand::seq::IndexedRandom;

use super::error::ValueObjectError;

/// Display name chosen by a user.
///
/// Always trimmed and non-empty. Not guaranteed unique across the room.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Username(String);

impl Username {
    /// Create a username from raw input, trimming surrounding whitespace.
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValueObjectError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValueObjectError::EmptyUsername);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// First character, uppercased, used as the avatar badge.
    pub fn initial(&self) -> String {
        self.0
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| "?".to_string())
    }
}

impl std::fmt::Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Text body of a chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageText(String);

impl MessageText {
    /// Create a message text from a draft, trimming surrounding whitespace.
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValueObjectError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValueObjectError::EmptyMessage);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Wrap text received from the backend unchanged.
    ///
    /// Inbound messages are logged exactly as delivered, blank or indented.
    pub fn from_wire(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Palette of avatar colours assigned at load.
pub const AVATAR_PALETTE: [&str; 8] = [
    "pink", "purple", "indigo", "blue", "green", "yellow", "red", "teal",
];

/// Colour used for messages that arrive without one.
pub const FALLBACK_AVATAR_COLOR: &str = "gray";

/// Cosmetic avatar colour attached to a session and to every message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarColor(String);

impl AvatarColor {
    /// Pick a random colour from the palette.
    pub fn random() -> Self {
        let color = AVATAR_PALETTE
            .choose(&mut rand::rng())
            .copied()
            .unwrap_or(FALLBACK_AVATAR_COLOR);
        Self(color.to_string())
    }

    /// Wrap a colour received from the wire.
    ///
    /// Blank values fall back to gray; other names are kept as sent.
    pub fn from_wire(value: Option<String>) -> Self {
        match value {
            Some(color) if !color.trim().is_empty() => Self(color.trim().to_string()),
            _ => Self::default(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Default for AvatarColor {
    fn default() -> Self {
        Self(FALLBACK_AVATAR_COLOR.to_string())
    }
}
