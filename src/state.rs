use crate::quota::DailyQuota;
use crate::rate_limit::SlidingWindowLimiter;

// One limiter per throttled endpoint; instances never share history.
pub struct Limiters {
    pub newsletter: SlidingWindowLimiter,
    pub tracking: SlidingWindowLimiter,
    pub auth: SlidingWindowLimiter,
    pub librarian: SlidingWindowLimiter,
}

impl Limiters {
    pub fn new() -> Self {
        Self {
            newsletter: SlidingWindowLimiter::new("newsletter", 5, 60),
            tracking: SlidingWindowLimiter::new("tracking", 60, 60),
            auth: SlidingWindowLimiter::new("auth", 5, 300),
            librarian: SlidingWindowLimiter::new("librarian", 10, 60),
        }
    }

    pub fn all(&self) -> [&SlidingWindowLimiter; 4] {
        [&self.newsletter, &self.tracking, &self.auth, &self.librarian]
    }
}

impl Default for Limiters {
    fn default() -> Self {
        Self::new()
    }
}

// app's shared state, built once in main and handed to every handler
pub struct AppState {
    pub limiters: Limiters,
    pub librarian_quota: DailyQuota, // free tier only, premium bypasses it
}

impl AppState {
    pub fn new() -> Self {
        Self {
            limiters: Limiters::new(),
            librarian_quota: DailyQuota::new("librarian_free_daily", 5),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
