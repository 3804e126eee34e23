use std::collections::VecDeque;
use std::time::{Duration, Instant};
use common::Username;

#[derive(Debug, Clone)]
struct WaitingPlayer {
    username: Username,
    queued_at: Instant,
}

/// FIFO of players waiting for an opponent. Never holds a name twice.
#[derive(Debug, Default)]
pub struct MatchmakingQueue {
    waiting: VecDeque<WaitingPlayer>,
}

impl MatchmakingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, username: &Username) -> bool {
        self.waiting.iter().any(|w| &w.username == username)
    }

    /// Returns `false` without changes if the name is already waiting.
    pub fn push(&mut self, username: Username) -> bool {
        if self.contains(&username) {
            return false;
        }
        self.waiting.push_back(WaitingPlayer {
            username,
            queued_at: Instant::now(),
        });
        true
    }

    pub fn front(&self) -> Option<&Username> {
        self.waiting.front().map(|w| &w.username)
    }

    pub fn pop(&mut self) -> Option<Username> {
        self.waiting.pop_front().map(|w| w.username)
    }

    /// Drops everyone who has been waiting for at least `timeout`.
    pub fn evict_idle(&mut self, timeout: Duration) -> Vec<Username> {
        let mut evicted = Vec::new();
        self.waiting.retain(|w| {
            if w.queued_at.elapsed() >= timeout {
                evicted.push(w.username.clone());
                false
            } else {
                true
            }
        });
        evicted
    }

    pub fn len(&self) -> usize {
        self.waiting.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waiting.is_empty()
    }

    pub fn usernames(&self) -> Vec<Username> {
        self.waiting.iter().map(|w| w.username.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> Username {
        Username::new(s)
    }

    #[test]
    fn test_fifo_order() {
        let mut queue = MatchmakingQueue::new();
        queue.push(name("a"));
        queue.push(name("b"));
        queue.push(name("c"));
        assert_eq!(queue.pop(), Some(name("a")));
        assert_eq!(queue.pop(), Some(name("b")));
        assert_eq!(queue.front(), Some(&name("c")));
    }

    #[test]
    fn test_no_duplicates() {
        let mut queue = MatchmakingQueue::new();
        assert!(queue.push(name("a")));
        assert!(!queue.push(name("a")));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_evict_idle() {
        let mut queue = MatchmakingQueue::new();
        queue.push(name("a"));
        queue.push(name("b"));
        assert!(queue.evict_idle(Duration::from_secs(3600)).is_empty());
        assert_eq!(queue.evict_idle(Duration::ZERO), vec![name("a"), name("b")]);
        assert!(queue.is_empty());
    }
}
