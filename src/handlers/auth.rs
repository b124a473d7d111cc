use axum::{Json, extract::State};
use std::sync::Arc;

use crate::error::ApiError;
use crate::extract::ValidJson;
use crate::identity::ClientKey;
use crate::models::{MagicLinkRequest, MagicLinkResponse};
use crate::state::AppState;

pub async fn magic_link_handler(
    State(state): State<Arc<AppState>>,
    ClientKey(client): ClientKey,
    ValidJson(payload): ValidJson<MagicLinkRequest>,
) -> Result<Json<MagicLinkResponse>, ApiError> {
    state.limiters.auth.check(&client)?;

    let email = payload.email.trim().to_lowercase();

    tracing::info!(email = %email, "magic link requested");

    Ok(Json(MagicLinkResponse {
        message: "Check your email for a sign-in link!".to_string(),
    }))
}
