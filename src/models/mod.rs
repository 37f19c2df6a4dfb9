pub mod appointment;
pub mod conversation;
pub mod document;

pub use appointment::{AppointmentPayload, AppointmentRequest, RejectReason, ValidationOutcome};
pub use conversation::{ChatMessage, Conversation};
pub use document::{DocChunk, SourceDocument};
