use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::state::AppState;

// POST /chat
pub async fn relay_message(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<serde_json::Value>,
) -> Response {
    let Some(message) = payload.get("message").and_then(|v| v.as_str()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "Invalid input" })),
        )
            .into_response();
    };

    tracing::info!(message = %message, "relaying chat message");

    match state.relay.forward(message).await {
        Ok(reply) => Json(serde_json::json!({ "response": reply })).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "chat backend call failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": format!("Error occurred: {e:#}") })),
            )
                .into_response()
        }
    }
}
