//! Typing indicator state.
//!
//! `TypingTracker` holds who is typing, with one refreshable expiry deadline
//! per user. `TypingThrottle` rate-limits the local user's own typing signals.
//!
//! Both are driven by explicit `now` instants so that the event loop owns the
//! timers and tests stay deterministic.

use std::time::Duration;

use tokio::time::Instant;

use super::value_object::Username;

/// How long a typing notice keeps a user in the typing set
pub const DEFAULT_TYPING_TTL: Duration = Duration::from_secs(3);

/// Minimum interval between two outbound typing signals
pub const DEFAULT_TYPING_COOLDOWN: Duration = Duration::from_secs(3);

/// Users currently typing, in the order they started
#[derive(Debug, Clone)]
pub struct TypingTracker {
    ttl: Duration,
    entries: Vec<(Username, Instant)>,
}

impl TypingTracker {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Vec::new(),
        }
    }

    /// Record a typing notice for `username`.
    ///
    /// Inserts the user if absent, and (re)arms the user's deadline to
    /// `now + ttl`. Returns `true` if the user was not already typing.
    pub fn notice(&mut self, username: Username, now: Instant) -> bool {
        let deadline = now + self.ttl;

        if let Some((_, existing)) = self.entries.iter_mut().find(|(u, _)| *u == username) {
            *existing = deadline;
            return false;
        }

        self.entries.push((username, deadline));
        true
    }

    /// Remove every user whose deadline has passed and return them.
    pub fn expire(&mut self, now: Instant) -> Vec<Username> {
        let mut expired = Vec::new();
        self.entries.retain(|(username, deadline)| {
            if *deadline <= now {
                expired.push(username.clone());
                false
            } else {
                true
            }
        });
        expired
    }

    /// Earliest pending deadline, if anyone is typing
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.iter().map(|(_, deadline)| *deadline).min()
    }

    pub fn contains(&self, username: &Username) -> bool {
        self.entries.iter().any(|(u, _)| u == username)
    }

    pub fn users(&self) -> Vec<&Username> {
        self.entries.iter().map(|(u, _)| u).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TypingTracker {
    fn default() -> Self {
        Self::new(DEFAULT_TYPING_TTL)
    }
}

/// Local cooldown for outbound typing signals
#[derive(Debug, Clone)]
pub struct TypingThrottle {
    cooldown: Duration,
    cooling_until: Option<Instant>,
}

impl TypingThrottle {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            cooling_until: None,
        }
    }

    /// Returns `true` if a signal may be emitted now, and starts the cooldown.
    pub fn try_acquire(&mut self, now: Instant) -> bool {
        if let Some(until) = self.cooling_until
            && now < until
        {
            return false;
        }

        self.cooling_until = Some(now + self.cooldown);
        true
    }
}

impl Default for TypingThrottle {
    fn default() -> Self {
        Self::new(DEFAULT_TYPING_COOLDOWN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str) -> Username {
        Username::new(name).unwrap()
    }

    #[test]
    fn test_notice_inserts_user_once() {
        // テスト項目: 同じユーザーの入力通知は 1 度だけ追加される
        // given (前提条件):
        let mut tracker = TypingTracker::default();
        let now = Instant::now();

        // when (操作):
        let first = tracker.notice(user("carol"), now);
        let second = tracker.notice(user("carol"), now + Duration::from_millis(500));

        // then (期待する結果):
        assert!(first);
        assert!(!second);
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_entry_expires_after_ttl() {
        // テスト項目: 追加のイベントがなくても TTL 経過後に削除される
        // given (前提条件):
        let mut tracker = TypingTracker::default();
        let now = Instant::now();
        tracker.notice(user("carol"), now);

        // when (操作):
        let before = tracker.expire(now + Duration::from_millis(2999));
        let after = tracker.expire(now + Duration::from_secs(3));

        // then (期待する結果):
        assert!(before.is_empty());
        assert_eq!(after, vec![user("carol")]);
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_repeated_notice_refreshes_deadline() {
        // テスト項目: 再通知で期限が延長され、古いタイマーで早期に消えない
        // given (前提条件):
        let mut tracker = TypingTracker::default();
        let start = Instant::now();
        tracker.notice(user("carol"), start);

        // when (操作):
        tracker.notice(user("carol"), start + Duration::from_secs(2));
        let at_first_deadline = tracker.expire(start + Duration::from_secs(3));

        // then (期待する結果):
        assert!(at_first_deadline.is_empty());
        assert!(tracker.contains(&user("carol")));
        assert_eq!(
            tracker.next_deadline(),
            Some(start + Duration::from_secs(5))
        );
        assert_eq!(
            tracker.expire(start + Duration::from_secs(5)),
            vec![user("carol")]
        );
    }

    #[test]
    fn test_users_expire_independently() {
        // テスト項目: ユーザーごとに独立して期限切れになる
        // given (前提条件):
        let mut tracker = TypingTracker::default();
        let start = Instant::now();
        tracker.notice(user("carol"), start);
        tracker.notice(user("dave"), start + Duration::from_secs(1));

        // when (操作):
        let expired = tracker.expire(start + Duration::from_secs(3));

        // then (期待する結果):
        assert_eq!(expired, vec![user("carol")]);
        assert_eq!(tracker.users(), vec![&user("dave")]);
        assert_eq!(
            tracker.next_deadline(),
            Some(start + Duration::from_secs(4))
        );
    }

    #[test]
    fn test_next_deadline_is_none_when_empty() {
        // テスト項目: 誰も入力中でない場合、次の期限は None
        // given (前提条件):
        let tracker = TypingTracker::default();

        // when (操作):
        let deadline = tracker.next_deadline();

        // then (期待する結果):
        assert_eq!(deadline, None);
    }

    #[test]
    fn test_throttle_suppresses_within_cooldown() {
        // テスト項目: クールダウン中は送信が抑制され、経過後に再び許可される
        // given (前提条件):
        let mut throttle = TypingThrottle::default();
        let start = Instant::now();

        // when (操作):
        let first = throttle.try_acquire(start);
        let during = throttle.try_acquire(start + Duration::from_millis(2999));
        let after = throttle.try_acquire(start + Duration::from_secs(3));

        // then (期待する結果):
        assert!(first);
        assert!(!during);
        assert!(after);
    }

    #[test]
    fn test_throttle_suppressed_attempt_does_not_extend_cooldown() {
        // テスト項目: 抑制された試行はクールダウンを延長しない
        // given (前提条件):
        let mut throttle = TypingThrottle::new(Duration::from_secs(3));
        let start = Instant::now();
        throttle.try_acquire(start);

        // when (操作):
        throttle.try_acquire(start + Duration::from_secs(2));
        let result = throttle.try_acquire(start + Duration::from_secs(3));

        // then (期待する結果):
        assert!(result);
    }
}
