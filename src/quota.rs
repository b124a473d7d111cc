use chrono::{Local, NaiveDate};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::LimitError;
use crate::metrics::{record_admitted, record_rejected};

// Counts are only valid for `day`; the first check on a later day clears all of them.
struct QuotaState {
    day: NaiveDate,
    counts: HashMap<i64, u32>,
}

/// Per-user allowance that resets at local midnight.
pub struct DailyQuota {
    name: &'static str,
    max_per_day: u32,
    state: Mutex<QuotaState>,
}

impl DailyQuota {
    /// # Panics
    ///
    /// Panics if `max_per_day` is zero.
    pub fn new(name: &'static str, max_per_day: u32) -> Self {
        assert!(max_per_day > 0, "quota {name}: max_per_day must be positive");

        Self {
            name,
            max_per_day,
            state: Mutex::new(QuotaState {
                day: today(),
                counts: HashMap::new(),
            }),
        }
    }

    pub fn max_per_day(&self) -> u32 {
        self.max_per_day
    }

    pub fn check(&self, user_id: i64) -> Result<u32, LimitError> {
        self.check_on(user_id, today())
    }

    /// Counts one use for `user_id` on `today` and returns how many uses the
    /// user has left that day.
    pub fn check_on(&self, user_id: i64, today: NaiveDate) -> Result<u32, LimitError> {
        let mut state = self.lock_for(today);

        let count = state.counts.get(&user_id).copied().unwrap_or(0);
        if count >= self.max_per_day {
            drop(state);
            record_rejected(self.name);
            tracing::debug!(quota = self.name, user_id, "daily quota exhausted");
            return Err(LimitError::TooManyRequests(format!(
                "Free tier limit: {} requests per day. Upgrade to Premium for unlimited access.",
                self.max_per_day
            )));
        }

        let used = count + 1;
        state.counts.insert(user_id, used);
        drop(state);
        record_admitted(self.name);
        Ok(self.max_per_day - used)
    }

    // Takes the lock, resetting every user's count when the day has rolled over.
    fn lock_for(&self, today: NaiveDate) -> MutexGuard<'_, QuotaState> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.day != today {
            tracing::info!(
                quota = self.name,
                previous_day = %state.day,
                users = state.counts.len(),
                "daily quota reset"
            );
            state.counts.clear();
            state.day = today;
        }
        state
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
