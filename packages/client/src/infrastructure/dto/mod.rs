//! Data Transfer Objects (DTOs) for the chat client.
//!
//! - `websocket`: JSON envelopes exchanged over the WebSocket
//! - `conversion`: mapping between envelopes and domain events

pub mod conversion;
pub mod websocket;
