use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::Conversation;
use crate::services::conversation;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct AskRequest {
    pub question: Option<String>,
    #[serde(default)]
    pub conversation: Conversation,
}

#[derive(Serialize)]
pub struct AskResponse {
    pub answer: String,
    pub conversation: Conversation,
}

// POST /ask
pub async fn ask(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AskRequest>,
) -> Result<Json<AskResponse>, AppError> {
    let question = payload
        .question
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or(AppError::InvalidInput)?
        .to_string();

    let (conversation, answer) = conversation::run_turn(
        state.index.as_ref(),
        state.chat.as_ref(),
        payload.conversation,
        &question,
        state.config.search_top_k,
    )
    .await?;

    Ok(Json(AskResponse {
        answer,
        conversation,
    }))
}
