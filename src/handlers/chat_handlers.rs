use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::api::gemini;
use crate::AppState;

// Greeting the widget shows before the first exchange.
const INITIAL_GREETING: &str = "Hello! I'm your AI assistant. I can help you learn about our technology, answer questions, or assist with tasks. What would you like to know today?";

#[derive(Deserialize)]
pub struct ChatMessageRequest {
    content: Option<String>,
}

#[derive(Serialize)]
pub struct ChatMessage {
    id: String,
    role: String,
    content: String,
}

pub async fn get_chat_history() -> Json<Vec<ChatMessage>> {
    Json(vec![ChatMessage {
        id: "1".to_string(),
        role: "assistant".to_string(),
        content: INITIAL_GREETING.to_string(),
    }])
}

pub async fn send_chat_message(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ChatMessageRequest>,
) -> Result<Json<ChatMessage>, (StatusCode, Json<serde_json::Value>)> {
    let content = match payload.content.as_deref().filter(|c| !c.is_empty()) {
        Some(content) => content,
        None => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(json!({"message": "Message content is required"})),
            ))
        }
    };

    let response = gemini::chat(&state.http_client, &state.gemini, content, "general").await;

    Ok(Json(ChatMessage {
        id: Uuid::new_v4().to_string(),
        role: "assistant".to_string(),
        content: response,
    }))
}
