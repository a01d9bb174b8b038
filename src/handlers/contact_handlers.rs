use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Deserialize)]
pub struct ContactFormRequest {
    name: Option<String>,
    email: Option<String>,
    company: Option<String>,
    message: Option<String>,
}

#[derive(Serialize)]
pub struct ContactFormResponse {
    success: bool,
    message: String,
}

// Submissions are logged for follow-up, not stored.
pub async fn submit_contact_form(
    Json(payload): Json<ContactFormRequest>,
) -> Result<Json<ContactFormResponse>, (StatusCode, Json<serde_json::Value>)> {
    let required = [
        payload.name.as_deref(),
        payload.email.as_deref(),
        payload.message.as_deref(),
    ];
    if required.iter().any(|f| f.map_or(true, |v| v.is_empty())) {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "Name, email and message are required"})),
        ));
    }

    tracing::info!(
        "Contact form submission from {} <{}> (company: {}): {}",
        payload.name.as_deref().unwrap_or(""),
        payload.email.as_deref().unwrap_or(""),
        payload.company.as_deref().unwrap_or("-"),
        payload.message.as_deref().unwrap_or(""),
    );

    Ok(Json(ContactFormResponse {
        success: true,
        message: "Message received".to_string(),
    }))
}
