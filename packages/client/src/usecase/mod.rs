//! Use case layer: the chat client controller.

pub mod chat_client;

pub use chat_client::{ChatClient, UiUpdate};
