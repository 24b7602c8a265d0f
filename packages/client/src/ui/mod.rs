//! Terminal front end: join screen, chat room, and reconnecting runner.

pub mod formatter;
pub mod prompt;
pub mod runner;
pub mod session;

pub use runner::run_client;
