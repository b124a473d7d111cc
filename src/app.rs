use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::handlers::{
    click_handler, health_handler, librarian_handler, magic_link_handler, metrics_handler,
    subscribe_handler,
};
use crate::state::AppState;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/api/v1/newsletter/subscribe", post(subscribe_handler))
        .route("/api/v1/tracking/click", post(click_handler))
        .route("/api/v1/auth/magic-link", post(magic_link_handler))
        .route("/api/v1/librarian", post(librarian_handler))
        .with_state(state)
}
