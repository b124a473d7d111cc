use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::{Duration, MissedTickBehavior, interval};

use crate::metrics::SWEPT_KEYS_TOTAL;
use crate::state::AppState;

// Periodic memory hygiene for the limiters. Admission never depends on it:
// each check already prunes the history of the identity it touches.
pub fn spawn_sweeper(state: Arc<AppState>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // first tick completes immediately, nothing to sweep yet
        ticker.tick().await;

        tracing::info!(interval = ?every, "limiter sweeper started");

        loop {
            ticker.tick().await;
            sweep_all(&state);
        }
    })
}

pub fn sweep_all(state: &AppState) -> usize {
    let mut dropped = 0;

    for limiter in state.limiters.all() {
        let removed = limiter.sweep();
        if removed > 0 {
            SWEPT_KEYS_TOTAL
                .with_label_values(&[limiter.name()])
                .inc_by(removed as u64);
            tracing::debug!(
                limiter = limiter.name(),
                removed,
                remaining = limiter.tracked_keys(),
                "swept idle identities"
            );
        }
        dropped += removed;
    }

    dropped
}
