//! Orchestrator-specific error types

use shared::{PartnerId, SharedError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrchestratorError {
    #[error("Authentication failed: {message}")]
    AuthError { status: Option<u16>, message: String },

    #[error("Partner listing failed: {message}")]
    ListError { status: Option<u16>, message: String },

    #[error("Detail fetch failed for partner {partner_id}: {message}")]
    FetchError {
        partner_id: PartnerId,
        status: Option<u16>,
        message: String,
    },

    #[error("Update submission failed for partner {partner_id}: {message}")]
    SubmitError { partner_id: PartnerId, message: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Audit write failed: {message}")]
    AuditError { message: String },

    #[error("Shared component error: {0}")]
    SharedError(#[from] SharedError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("HTTP transport error: {0}")]
    HttpError(#[from] reqwest::Error),
}

impl OrchestratorError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
        }
    }

    /// Fatal errors abort the whole run; the rest are confined to one partner
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::FetchError { .. } | Self::SubmitError { .. })
    }
}

pub type OrchestratorResult<T> = Result<T, OrchestratorError>;
