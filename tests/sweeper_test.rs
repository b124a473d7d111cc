use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;

use living_books_gateway::state::AppState;
use living_books_gateway::sweeper::{spawn_sweeper, sweep_all};

#[test]
fn sweep_all_drops_expired_identities_across_limiters() {
    let state = AppState::new();
    let long_ago = Utc::now().timestamp_millis() - 3_600_000;

    state.limiters.newsletter.check_at("203.0.113.1", long_ago).unwrap();
    state.limiters.auth.check_at("203.0.113.2", long_ago).unwrap();
    state.limiters.tracking.check("203.0.113.3").unwrap();

    assert_eq!(sweep_all(&state), 2);
    assert_eq!(state.limiters.newsletter.tracked_keys(), 0);
    assert_eq!(state.limiters.auth.tracked_keys(), 0);
    assert_eq!(state.limiters.tracking.tracked_keys(), 1);
}

#[tokio::test(start_paused = true)]
async fn background_sweeper_runs_on_its_interval() {
    let state = Arc::new(AppState::new());
    let long_ago = Utc::now().timestamp_millis() - 3_600_000;
    state.limiters.librarian.check_at("203.0.113.4", long_ago).unwrap();

    let handle = spawn_sweeper(state.clone(), Duration::from_secs(30));
    tokio::time::sleep(Duration::from_secs(31)).await;

    assert_eq!(state.limiters.librarian.tracked_keys(), 0);
    handle.abort();
}
