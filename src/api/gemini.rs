use std::time::Duration;

use serde_json::{json, Value};

use crate::utils::sections;

const DEFAULT_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent";

// Generation settings are fixed server-side, never caller-configurable.
const TEMPERATURE: f64 = 0.7;
const CHAT_MAX_OUTPUT_TOKENS: u32 = 800;
const WELCOME_MAX_OUTPUT_TOKENS: u32 = 200;

/// Bound on the single outbound call so a stalled upstream can't hold a
/// request open indefinitely.
pub const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

pub const CHAT_ERROR_FALLBACK: &str =
    "I'm sorry, I encountered an error processing your request. Please try again later.";
pub const CHAT_OFFLINE_FALLBACK: &str =
    "I apologize, but I'm having trouble connecting to my knowledge base right now. Please try again in a moment.";

pub struct GeminiConfig {
    pub api_key: String,
    pub api_url: String,
}

impl GeminiConfig {
    pub fn new() -> Self {
        Self {
            api_key: std::env::var("GEMINI_API_KEY").expect("GEMINI_API_KEY must be set"),
            api_url: std::env::var("GEMINI_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum UpstreamError {
    #[error("Gemini API returned HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("failed to reach Gemini API: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected Gemini response shape: {0}")]
    Malformed(&'static str),
}

/// One single-turn generateContent call. No retries, no history.
async fn generate(
    client: &reqwest::Client,
    config: &GeminiConfig,
    prompt: &str,
    max_output_tokens: u32,
) -> Result<String, UpstreamError> {
    let body = json!({
        "contents": [
            {
                "role": "user",
                "parts": [{ "text": prompt }]
            }
        ],
        "generationConfig": {
            "temperature": TEMPERATURE,
            "maxOutputTokens": max_output_tokens
        }
    });

    let response = client
        .post(format!("{}?key={}", config.api_url, config.api_key))
        .header("Content-Type", "application/json")
        .json(&body)
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let detail = response
            .text()
            .await
            .unwrap_or_else(|_| "<no body>".to_string());
        tracing::error!("Gemini API error: HTTP {}: {}", status, detail);
        return Err(UpstreamError::Status(status));
    }

    let data: Value = response.json().await?;
    let text = data["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .ok_or(UpstreamError::Malformed(
            "missing candidates[0].content.parts[0].text",
        ))?;

    Ok(text.to_string())
}

/// Answer a chat message in the context of a page section. Never fails: any
/// upstream problem degrades to a canned apology so the widget always has
/// something to render.
pub async fn chat(
    client: &reqwest::Client,
    config: &GeminiConfig,
    message: &str,
    context: &str,
) -> String {
    let section = sections::resolve(context);
    let prompt = sections::build_chat_prompt(section, message);

    match generate(client, config, &prompt, CHAT_MAX_OUTPUT_TOKENS).await {
        Ok(text) => text,
        Err(err @ UpstreamError::Status(_)) => {
            tracing::error!("chat generation failed: {}", err);
            CHAT_ERROR_FALLBACK.to_string()
        }
        Err(err) => {
            tracing::error!("chat generation failed: {}", err);
            CHAT_OFFLINE_FALLBACK.to_string()
        }
    }
}

/// Generate a welcome message for a section, falling back to the section's
/// configured default text when the upstream call fails in any way.
pub async fn welcome_message(
    client: &reqwest::Client,
    config: &GeminiConfig,
    section_id: &str,
) -> String {
    let section = sections::resolve(section_id);
    let prompt = sections::build_welcome_prompt(section_id);

    match generate(client, config, &prompt, WELCOME_MAX_OUTPUT_TOKENS).await {
        Ok(text) => text,
        Err(err) => {
            tracing::error!(
                "welcome message generation failed for '{}': {}",
                section_id,
                err
            );
            section.default_welcome.to_string()
        }
    }
}
