//! ChatWave chat client library.
//!
//! Provides the `ChatClient` controller, the channel abstraction it talks
//! through, a WebSocket channel implementation, and a terminal front end.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
pub mod error;

pub use config::ClientConfig;
pub use error::ClientError;
pub use usecase::{ChatClient, UiUpdate};
