//! Time-related utilities with clock abstraction for testability.

use chrono::{DateTime, FixedOffset, Local};

/// Format used for message timestamps shown in the chat room (2-digit hour and minute).
pub const DISPLAY_TIME_FORMAT: &str = "%H:%M";

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Get the current local wall-clock time
    fn now(&self) -> DateTime<FixedOffset>;
}

/// System clock implementation (uses actual system time in the local time zone)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: DateTime<FixedOffset>,
}

impl FixedClock {
    /// Create a new fixed clock with the given time
    pub fn new(fixed_time: DateTime<FixedOffset>) -> Self {
        Self { fixed_time }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.fixed_time
    }
}

/// Format a time as the `HH:MM` string displayed next to chat messages
pub fn format_display_time(time: &DateTime<FixedOffset>) -> String {
    time.format(DISPLAY_TIME_FORMAT).to_string()
}

/// Current local time formatted for display
pub fn display_time_now(clock: &dyn Clock) -> String {
    format_display_time(&clock.now())
}
