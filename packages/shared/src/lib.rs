//! Shared utilities for the ChatWave workspace.
//!
//! - `logger`: tracing subscriber setup for binaries
//! - `time`: clock abstraction and display-time formatting

pub mod logger;
pub mod time;
