//! Infrastructure layer: wire DTOs and channel implementations.

pub mod channel;
pub mod dto;
