//! Client configuration.

use std::time::Duration;

use crate::domain::typing::{DEFAULT_TYPING_COOLDOWN, DEFAULT_TYPING_TTL};

/// Default backend WebSocket URL
pub const DEFAULT_URL: &str = "ws://127.0.0.1:8080/ws";

/// Settings for one client run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend WebSocket URL
    pub url: String,
    /// Join immediately with this name instead of prompting
    pub username: Option<String>,
    /// How long a remote typing notice stays visible
    pub typing_ttl: Duration,
    /// Minimum interval between two outbound typing signals
    pub typing_cooldown: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            username: None,
            typing_ttl: DEFAULT_TYPING_TTL,
            typing_cooldown: DEFAULT_TYPING_COOLDOWN,
        }
    }
}
