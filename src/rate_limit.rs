//! Sliding-window request limiter keyed by caller identity.
//!
//! Each identity keeps the timestamps of its admitted requests. Expired
//! timestamps are pruned lazily, only when that identity is checked again
//! (or by the optional background sweep).

use chrono::Utc;
use dashmap::DashMap;
use std::collections::VecDeque;
use std::time::Duration;

use crate::error::LimitError;
use crate::metrics::{TRACKED_KEYS, record_admitted, record_rejected};

const REJECT_MESSAGE: &str = "Too many requests. Please try again later.";

pub struct SlidingWindowLimiter {
    name: &'static str,
    max_requests: u32,
    window: Duration,
    window_ms: i64,
    // identity -> admitted timestamps (epoch millis), oldest first
    entries: DashMap<String, VecDeque<i64>>,
}

impl SlidingWindowLimiter {
    /// Creates an independent limiter admitting `max_requests` per `window_secs`.
    ///
    /// # Panics
    ///
    /// Panics if either threshold is zero, or if the window does not fit in
    /// `i64` milliseconds.
    pub fn new(name: &'static str, max_requests: u32, window_secs: u64) -> Self {
        assert!(max_requests > 0, "limiter {name}: max_requests must be positive");
        assert!(window_secs > 0, "limiter {name}: window_secs must be positive");

        let window = Duration::from_secs(window_secs);
        let window_ms = i64::try_from(window.as_millis())
            .unwrap_or_else(|_| panic!("limiter {name}: window_secs is out of range"));

        Self {
            name,
            max_requests,
            window,
            window_ms,
            entries: DashMap::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn check(&self, key: &str) -> Result<(), LimitError> {
        self.check_at(key, Utc::now().timestamp_millis())
    }

    /// Checks `key` against the window ending at `now_ms` and records the
    /// request when admitted.
    ///
    /// The entry guard is held for prune, compare and append, so two callers
    /// racing for the last slot of the same identity cannot both pass.
    pub fn check_at(&self, key: &str, now_ms: i64) -> Result<(), LimitError> {
        let cutoff = now_ms.saturating_sub(self.window_ms);

        let mut history = self.entries.entry(key.to_string()).or_default();
        history.retain(|&ts| ts > cutoff);

        if history.len() >= self.max_requests as usize {
            drop(history);
            record_rejected(self.name);
            tracing::debug!(limiter = self.name, key, "request rate limited");
            return Err(LimitError::TooManyRequests(REJECT_MESSAGE.to_string()));
        }

        history.push_back(now_ms);
        // len() locks every shard, so the entry guard must be gone first
        drop(history);
        record_admitted(self.name);
        self.publish_tracked_keys();
        Ok(())
    }

    pub fn sweep(&self) -> usize {
        self.sweep_at(Utc::now().timestamp_millis())
    }

    /// Prunes every identity's history and drops identities left empty.
    /// Returns how many identities were dropped.
    pub fn sweep_at(&self, now_ms: i64) -> usize {
        let cutoff = now_ms.saturating_sub(self.window_ms);
        let before = self.entries.len();

        self.entries.retain(|_, history| {
            history.retain(|&ts| ts > cutoff);
            !history.is_empty()
        });

        let remaining = self.entries.len();
        self.publish_tracked_keys();
        before.saturating_sub(remaining)
    }

    pub fn tracked_keys(&self) -> usize {
        self.entries.len()
    }

    fn publish_tracked_keys(&self) {
        TRACKED_KEYS
            .with_label_values(&[self.name])
            .set(i64::try_from(self.entries.len()).unwrap_or(i64::MAX));
    }
}
