use axum::{Json, extract::State};
use std::sync::Arc;

use crate::error::ApiError;
use crate::extract::ValidJson;
use crate::identity::ClientKey;
use crate::models::{NewsletterSubscribeRequest, NewsletterSubscribeResponse};
use crate::state::AppState;

pub async fn subscribe_handler(
    State(state): State<Arc<AppState>>,
    ClientKey(client): ClientKey,
    ValidJson(payload): ValidJson<NewsletterSubscribeRequest>,
) -> Result<Json<NewsletterSubscribeResponse>, ApiError> {
    state.limiters.newsletter.check(&client)?;

    let email = payload.email.trim().to_lowercase();

    // re-subscribing the same address is a no-op downstream
    tracing::info!(
        email = %email,
        signup_source = payload.signup_source.as_deref().unwrap_or("unknown"),
        utm_campaign = payload.utm_campaign.as_deref(),
        "newsletter subscription accepted"
    );

    Ok(Json(NewsletterSubscribeResponse {
        success: true,
        message: "You're subscribed! Welcome to the Living Books community.".to_string(),
    }))
}
