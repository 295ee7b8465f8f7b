//! Shared error types for the QPS limit tuner

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SharedError {
    #[error("Deserialization failed: {message}")]
    DeserializationError { message: String },

    #[error("Invalid configuration: {field} = {value}")]
    InvalidConfig { field: String, value: String },

    #[error("Unexpected response shape: {message}")]
    ProtocolError { message: String },
}

pub type SharedResult<T> = Result<T, SharedError>;
