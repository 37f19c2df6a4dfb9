pub mod appointment;
pub mod ask;
pub mod chat;
pub mod health;
