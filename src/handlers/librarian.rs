use axum::{Json, extract::State, http::HeaderMap};
use serde_json::Value;
use std::sync::Arc;

use crate::error::ApiError;
use crate::extract::ValidJson;
use crate::identity::{Caller, ClientKey};
use crate::models::{LibrarianRequest, LibrarianResponse};
use crate::state::AppState;

// Order matters: body validation (in the extractor), per-IP limiter, identity,
// then the free-tier daily quota.
pub async fn librarian_handler(
    State(state): State<Arc<AppState>>,
    ClientKey(client): ClientKey,
    headers: HeaderMap,
    ValidJson(payload): ValidJson<LibrarianRequest>,
) -> Result<Json<LibrarianResponse>, ApiError> {
    state.limiters.librarian.check(&client)?;

    let caller = Caller::from_headers(&headers).ok_or(ApiError::Unauthorized)?;

    let message = payload.message.trim();

    let remaining_today = if caller.premium {
        None
    } else {
        Some(state.librarian_quota.check(caller.user_id)?)
    };

    tracing::info!(
        user_id = caller.user_id,
        premium = caller.premium,
        remaining_today,
        "librarian question accepted"
    );

    Ok(Json(LibrarianResponse {
        reply: compose_reply(message, payload.context.as_ref()),
        remaining_today,
    }))
}

fn compose_reply(message: &str, context: Option<&Value>) -> String {
    let interests = context
        .and_then(|ctx| ctx.get("interests"))
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        })
        .filter(|joined| !joined.is_empty());

    match interests {
        Some(interests) => format!(
            "Based on your interest in \"{message}\" and your family's love of {interests}, \
             here are some living books I'd recommend from our collection:"
        ),
        None => format!(
            "Based on your interest in \"{message}\", here are some living books \
             I'd recommend from our collection:"
        ),
    }
}
