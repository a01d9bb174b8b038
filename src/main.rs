use dotenvy::dotenv;
use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

mod handlers {
    pub mod ai_handlers;
    pub mod chat_handlers;
    pub mod contact_handlers;
    pub mod recommendation_handlers;
}
mod api {
    pub mod gemini;
}
mod utils {
    pub mod sections;
}

use api::gemini::GeminiConfig;
use handlers::{ai_handlers, chat_handlers, contact_handlers, recommendation_handlers};

pub struct AppState {
    http_client: reqwest::Client,
    gemini: GeminiConfig,
}

async fn health_check() -> &'static str {
    "OK"
}

pub fn validate_env() {
    let required_vars = ["GEMINI_API_KEY"];
    for var in required_vars.iter() {
        std::env::var(var).expect(&format!("{} must be set", var));
    }
}

fn api_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/chat/history", get(chat_handlers::get_chat_history))
        .route("/api/chat/message", post(chat_handlers::send_chat_message))
        .route(
            "/api/ai/welcome-message/{section}",
            get(ai_handlers::get_welcome_message),
        )
        .route("/api/ai/message", post(ai_handlers::send_ai_message))
        .route(
            "/api/recommendations",
            get(recommendation_handlers::get_recommendations),
        )
        .route("/api/contact", post(contact_handlers::submit_contact_form))
        .with_state(state)
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    use tracing_subscriber::{fmt, EnvFilter};
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,futurelabs_backend=debug"));
    fmt().with_env_filter(filter).with_target(true).init();

    validate_env();

    let http_client = reqwest::Client::builder()
        .timeout(api::gemini::UPSTREAM_TIMEOUT)
        .build()
        .expect("Failed to build HTTP client");
    let state = Arc::new(AppState {
        http_client,
        gemini: GeminiConfig::new(),
    });

    let frontend_url =
        std::env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());
    let app = api_router(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(
            CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_origin(AllowOrigin::exact(
                    frontend_url.parse().expect("Invalid FRONTEND_URL"),
                ))
                .allow_headers([
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                    axum::http::header::ORIGIN,
                ]),
        );

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);
    tracing::info!("Starting server on port {}", port);
    let listener = TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .unwrap();
    axum::serve(listener, app.into_make_service()).await.unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::gemini;
    use crate::utils::sections;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    // State pointing at a port nothing listens on, so every upstream call
    // fails with a connection error.
    async fn state_with_dead_upstream() -> Arc<AppState> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        Arc::new(AppState {
            http_client: reqwest::Client::new(),
            gemini: GeminiConfig {
                api_key: "test-key".to_string(),
                api_url: format!("http://{}/generate", addr),
            },
        })
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn response_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn chat_history_returns_seeded_greeting() {
        let app = api_router(state_with_dead_upstream().await);
        let response = app
            .oneshot(
                Request::get("/api/chat/history")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        let messages = body.as_array().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0]["role"], "assistant");
        assert_eq!(messages[0]["id"], "1");
    }

    #[tokio::test]
    async fn chat_message_without_content_is_rejected() {
        let app = api_router(state_with_dead_upstream().await);
        let response = app
            .oneshot(json_request("POST", "/api/chat/message", json!({})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response_json(response).await;
        assert_eq!(body["message"], "Message content is required");
    }

    #[tokio::test]
    async fn chat_message_degrades_to_fallback_when_upstream_unreachable() {
        let app = api_router(state_with_dead_upstream().await);
        let response = app
            .oneshot(json_request(
                "POST",
                "/api/chat/message",
                json!({"content": "hello"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert_eq!(body["role"], "assistant");
        assert_eq!(body["content"], gemini::CHAT_OFFLINE_FALLBACK);
    }

    #[tokio::test]
    async fn ai_message_without_content_is_rejected() {
        let app = api_router(state_with_dead_upstream().await);
        let response = app
            .oneshot(json_request(
                "POST",
                "/api/ai/message",
                json!({"context": "features"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn welcome_message_uses_section_default_when_upstream_fails() {
        let app = api_router(state_with_dead_upstream().await);
        let response = app
            .oneshot(
                Request::get("/api/ai/welcome-message/features")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert_eq!(
            body["message"],
            sections::resolve("features").default_welcome
        );
    }

    #[tokio::test]
    async fn recommendations_are_static_and_idempotent() {
        let app = api_router(state_with_dead_upstream().await);

        let first = app
            .clone()
            .oneshot(
                Request::get("/api/recommendations")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let second = app
            .oneshot(
                Request::get("/api/recommendations")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(first.status(), StatusCode::OK);
        let first = response_json(first).await;
        let second = response_json(second).await;
        assert_eq!(first, second);
        assert_eq!(first.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn contact_form_accepts_submission_without_company() {
        let app = api_router(state_with_dead_upstream().await);
        let response = app
            .oneshot(json_request(
                "POST",
                "/api/contact",
                json!({"name": "A", "email": "a@b.com", "message": "hi"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert_eq!(body["success"], true);
    }

    #[tokio::test]
    async fn contact_form_requires_name_email_and_message() {
        let app = api_router(state_with_dead_upstream().await);
        let response = app
            .oneshot(json_request(
                "POST",
                "/api/contact",
                json!({"name": "A", "email": "a@b.com"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response_json(response).await;
        assert_eq!(body["message"], "Name, email and message are required");
    }
}
