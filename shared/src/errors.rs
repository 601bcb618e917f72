//! Shared error types for target descriptions and configuration

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SharedError {
    #[error("Invalid target: {reason}")]
    InvalidTarget { reason: String },

    #[error("Invalid configuration: {field} = {value}")]
    InvalidConfig { field: String, value: String },

    #[error("Deserialization failed: {message}")]
    DeserializationError { message: String },
}

impl From<serde_json::Error> for SharedError {
    fn from(err: serde_json::Error) -> Self {
        SharedError::DeserializationError {
            message: err.to_string(),
        }
    }
}

pub type SharedResult<T> = Result<T, SharedError>;
