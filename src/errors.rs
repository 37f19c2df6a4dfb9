use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input")]
    InvalidInput,

    #[error("index error: {0}")]
    Index(String),

    #[error("chat model error: {0}")]
    Chat(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::InvalidInput => StatusCode::BAD_REQUEST,
            AppError::Index(_) => StatusCode::BAD_GATEWAY,
            AppError::Chat(_) => StatusCode::BAD_GATEWAY,
        };

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
