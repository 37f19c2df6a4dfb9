use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Inbound booking payload. Every field is optional so that a request with
/// missing keys still deserializes and can be rejected with a proper reason.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppointmentPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

/// A payload that passed validation, with the date resolved to a calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentRequest {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    MissingField,
    InvalidEmail,
    InvalidPhone,
    InvalidDate,
    PastDate,
}

impl RejectReason {
    pub fn message(&self) -> &'static str {
        match self {
            RejectReason::MissingField => "Missing required fields",
            RejectReason::InvalidEmail => "Invalid email address",
            RejectReason::InvalidPhone => "Invalid phone number",
            RejectReason::InvalidDate => "Invalid date format",
            RejectReason::PastDate => "Date cannot be in the past",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    Accepted(AppointmentRequest),
    Rejected(RejectReason),
}
