use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::api::gemini;
use crate::AppState;

#[derive(Deserialize)]
pub struct AiMessageRequest {
    content: Option<String>,
    context: Option<String>,
}

#[derive(Serialize)]
pub struct AiMessageResponse {
    response: String,
}

#[derive(Serialize)]
pub struct WelcomeMessageResponse {
    message: String,
}

pub async fn get_welcome_message(
    State(state): State<Arc<AppState>>,
    Path(section): Path<String>,
) -> Json<WelcomeMessageResponse> {
    let message = gemini::welcome_message(&state.http_client, &state.gemini, &section).await;
    Json(WelcomeMessageResponse { message })
}

pub async fn send_ai_message(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AiMessageRequest>,
) -> Result<Json<AiMessageResponse>, (StatusCode, Json<serde_json::Value>)> {
    let content = match payload.content.as_deref().filter(|c| !c.is_empty()) {
        Some(content) => content,
        None => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(json!({"message": "Message content is required"})),
            ))
        }
    };
    let context = payload.context.as_deref().unwrap_or("general");

    let response = gemini::chat(&state.http_client, &state.gemini, content, context).await;

    Ok(Json(AiMessageResponse { response }))
}
