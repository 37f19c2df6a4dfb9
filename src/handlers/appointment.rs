use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Local;

use crate::models::{AppointmentPayload, ValidationOutcome};
use crate::services::validation;

// POST /book_appointment
pub async fn book_appointment(Json(payload): Json<AppointmentPayload>) -> Response {
    let now = Local::now().naive_local();

    match validation::validate(&payload, now) {
        ValidationOutcome::Accepted(request) => {
            tracing::info!(name = %request.name, date = %request.date, "appointment accepted");
            // Storage would happen here; bookings are not persisted.
            Json(serde_json::json!({ "message": "Appointment booked successfully" }))
                .into_response()
        }
        ValidationOutcome::Rejected(reason) => {
            tracing::info!(reason = ?reason, "appointment rejected");
            (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": reason.message() })),
            )
                .into_response()
        }
    }
}
