//! `ChatChannel` implementations.
//!
//! - `websocket`: JSON envelopes over a WebSocket connection
//! - `in_memory`: loopback channel for tests and embedding

pub mod in_memory;
pub mod websocket;

pub use in_memory::InMemoryChannel;
pub use websocket::WebSocketChannel;
