//! REST API server for the apartment accountant bot
//!
//! Thin HTTP adapter over the message router. A webhook bridge (or any
//! other transport) POSTs each inbound text here and relays the replies.

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::router::IntakeRouter;

/// =============================
/// Request / Response Models
/// =============================

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MessageRequest {
    /// Channel-supplied conversation id (chat id, user handle, anything
    /// stable per conversation).
    pub session_id: String,
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageReply {
    pub replies: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub data: Option<serde_json::Value>,
    pub error: Option<String>,
    pub timestamp: String,
}

impl ApiResponse {
    pub fn success<T: Serialize>(data: T) -> Self {
        Self {
            success: true,
            data: serde_json::to_value(data).ok(),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// =============================
/// API State
/// =============================

#[derive(Clone)]
pub struct ApiState {
    pub router: Arc<IntakeRouter>,
}

/// =============================
/// Handlers
/// =============================

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn handle_message(
    State(state): State<ApiState>,
    Json(req): Json<MessageRequest>,
) -> (StatusCode, Json<ApiResponse>) {
    info!(session_id = %req.session_id, "inbound message");

    match state.router.handle_message(&req.session_id, &req.text).await {
        Ok(replies) => (
            StatusCode::OK,
            Json(ApiResponse::success(MessageReply { replies })),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Message handling failed: {}", e))),
        ),
    }
}

/// =============================
/// Router & Server Startup
/// =============================

pub fn create_router(intake: Arc<IntakeRouter>) -> Router {
    let state = ApiState { router: intake };

    Router::new()
        .route("/health", axum::routing::get(health))
        .route("/api/message", post(handle_message))
        .with_state(state)
        .layer(CorsLayer::permissive())
}

pub async fn start_server(
    intake: Arc<IntakeRouter>,
    port: u16,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let router = create_router(intake);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!("API server listening on http://0.0.0.0:{}", port);

    axum::serve(listener, router).await?;

    Ok(())
}
