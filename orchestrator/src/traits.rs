//! Trait definitions with mockall annotations for testing
//!
//! The orchestrator talks to the outside world only through these traits:
//! the management API (split into authentication and partner operations)
//! and the audit sink. Real implementations live in `services`.

use std::path::PathBuf;

use shared::{Credentials, PartnerDetail, PartnerId, PartnerSummary, RunId, UpdatePayload};

use crate::core::AuditRecord;
use crate::error::OrchestratorResult;

/// Raw answer to an update submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitResponse {
    pub status: u16,
    pub body: String,
}

impl SubmitResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Token exchange with the management API
#[mockall::automock]
#[async_trait::async_trait]
pub trait Authenticator: Send + Sync {
    /// Exchange credentials for a bearer token
    ///
    /// # Returns
    /// The token, or `AuthError` on a non-2xx answer or when no token is present
    async fn authenticate(&self, credentials: &Credentials) -> OrchestratorResult<String>;
}

/// Partner operations on the management API
#[mockall::automock]
#[async_trait::async_trait]
pub trait PartnerClient: Send + Sync {
    /// List all partners in server order
    async fn list_partners(&self, token: &str) -> OrchestratorResult<Vec<PartnerSummary>>;

    /// Fetch the full record of one partner
    ///
    /// # Returns
    /// The record, or `FetchError` on a non-2xx answer
    async fn get_partner_detail(
        &self,
        token: &str,
        partner_id: PartnerId,
    ) -> OrchestratorResult<PartnerDetail>;

    /// Submit a full-record update
    ///
    /// Non-2xx answers are returned as a `SubmitResponse` for the caller to
    /// inspect; only transport failures are errors.
    async fn submit_update(
        &self,
        token: &str,
        partner_id: PartnerId,
        payload: &UpdatePayload,
    ) -> OrchestratorResult<SubmitResponse>;
}

/// Sink for the per-run audit trail
#[mockall::automock]
#[async_trait::async_trait]
pub trait AuditWriter: Send + Sync {
    /// Persist the run's records
    ///
    /// # Returns
    /// Path of the written file, or `None` when there was nothing to write
    async fn write_audit(
        &self,
        run: &RunId,
        records: &[AuditRecord],
    ) -> OrchestratorResult<Option<PathBuf>>;
}
