use axum::{Json, extract::State};
use std::sync::Arc;

use crate::error::ApiError;
use crate::extract::ValidJson;
use crate::identity::ClientKey;
use crate::models::{ClickTrackRequest, ClickTrackResponse};
use crate::state::AppState;

// Records an affiliate link click
pub async fn click_handler(
    State(state): State<Arc<AppState>>,
    ClientKey(client): ClientKey,
    ValidJson(payload): ValidJson<ClickTrackRequest>,
) -> Result<Json<ClickTrackResponse>, ApiError> {
    state.limiters.tracking.check(&client)?;

    tracing::info!(
        book_id = payload.book_id,
        link_id = payload.link_id,
        source = %payload.source_name,
        referrer = payload.referrer.as_deref(),
        "click recorded"
    );

    Ok(Json(ClickTrackResponse { success: true }))
}
