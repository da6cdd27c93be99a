//! Error types for almanac.

use thiserror::Error;

use crate::appointment::AppointmentId;

/// Errors that can occur in almanac operations.
#[derive(Error, Debug)]
pub enum AlmanacError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Appointment not found: {0}")]
    NotFound(AppointmentId),

    #[error("Stored data is unreadable: {0}")]
    StorageRead(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reasons an appointment form is rejected.
///
/// These are shown to the user as-is, so the messages are written for humans.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill out all required fields! ({0} is missing)")]
    MissingField(&'static str),

    #[error("{field} must be a 24-hour HH:MM time, got '{value}'")]
    MalformedTime { field: &'static str, value: String },

    #[error("End time must be after start time! ({start} - {end})")]
    EndNotAfterStart { start: String, end: String },

    #[error("Unknown category '{0}' (expected meeting, personal or birthday)")]
    UnknownCategory(String),

    #[error("Unknown reminder '{0}' (expected 5, 15, 30 or 60 minutes)")]
    UnknownReminder(String),
}

impl From<serde_json::Error> for AlmanacError {
    fn from(e: serde_json::Error) -> Self {
        AlmanacError::Serialization(e.to_string())
    }
}

/// Result type alias for almanac operations.
pub type AlmanacResult<T> = Result<T, AlmanacError>;
