//! Management API client
//!
//! Talks to the partner management service over HTTPS with bearer tokens.
//! Every request carries the configured timeout; nothing is retried.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;
use url::Url;

use shared::{
    run_debug, run_warn, AuthResponse, Credentials, PartnerDetail, PartnerDetailResponse, PartnerId,
    PartnerListResponse, PartnerSummary, RunId, UpdatePayload,
};

use crate::config::RunConfig;
use crate::core::state::excerpt;
use crate::error::{OrchestratorError, OrchestratorResult};
use crate::traits::{Authenticator, PartnerClient, SubmitResponse};

pub const AUTH_PATH: &str = "/playdigo/auth";
pub const PARTNERS_PATH: &str = "/playdigo/dsp";

/// Longest response excerpt carried in error messages
const ERROR_BODY_CHARS: usize = 300;

/// Path of a single partner resource, used for both detail and update
pub fn partner_path(partner_id: PartnerId) -> String {
    format!("{PARTNERS_PATH}/{partner_id}")
}

/// Real management API client
#[derive(Clone)]
pub struct RealPartnerApi {
    client: Client,
    base_url: Url,
}

impl RealPartnerApi {
    /// Create a client for the given base URL with a per-request timeout
    pub fn new(base_url: Url, timeout: Duration) -> OrchestratorResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &RunConfig) -> OrchestratorResult<Self> {
        Self::new(config.base_url.clone(), config.request_timeout)
    }

    fn url(&self, path: &str) -> OrchestratorResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| OrchestratorError::config(format!("Invalid API path {path}: {e}")))
    }

    /// Status code and a short body excerpt for error messages
    async fn failure_details(response: Response) -> (u16, String) {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        (status, excerpt(&body, ERROR_BODY_CHARS))
    }
}

#[async_trait]
impl Authenticator for RealPartnerApi {
    async fn authenticate(&self, credentials: &Credentials) -> OrchestratorResult<String> {
        let auth_error =
            |status: Option<u16>, message: String| OrchestratorError::AuthError { status, message };

        let response = self
            .client
            .post(self.url(AUTH_PATH)?)
            .header("Accept", "application/json")
            .json(credentials)
            .send()
            .await
            .map_err(|e| auth_error(None, e.to_string()))?;

        if !response.status().is_success() {
            let (status, body) = Self::failure_details(response).await;
            return Err(auth_error(Some(status), format!("Auth failed [{status}]: {body}")));
        }

        let status = response.status().as_u16();
        let body: AuthResponse = response
            .json()
            .await
            .map_err(|e| auth_error(Some(status), format!("Unreadable auth response: {e}")))?;

        match body.token() {
            Some(token) => Ok(token.to_string()),
            None => {
                let body = excerpt(&body.0.to_string(), ERROR_BODY_CHARS);
                Err(auth_error(Some(status), format!("Auth OK but token missing: {body}")))
            }
        }
    }
}

#[async_trait]
impl PartnerClient for RealPartnerApi {
    async fn list_partners(&self, token: &str) -> OrchestratorResult<Vec<PartnerSummary>> {
        let list_error =
            |status: Option<u16>, message: String| OrchestratorError::ListError { status, message };

        let response = self
            .client
            .get(self.url(PARTNERS_PATH)?)
            .bearer_auth(token)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| list_error(None, e.to_string()))?;

        if !response.status().is_success() {
            let (status, body) = Self::failure_details(response).await;
            let message = format!("GET {PARTNERS_PATH} failed [{status}]: {body}");
            return Err(list_error(Some(status), message));
        }

        let body: PartnerListResponse = response
            .json()
            .await
            .map_err(|e| list_error(None, format!("Unreadable listing: {e}")))?;
        let entries = body.into_entries().map_err(|e| list_error(None, e.to_string()))?;

        let mut partners = Vec::with_capacity(entries.len());
        for entry in entries {
            match serde_json::from_value::<PartnerSummary>(entry.clone()) {
                Ok(summary) => partners.push(summary),
                Err(e) => {
                    run_warn!(
                        RunId::current(),
                        "⚠️ Skipping malformed partner entry {}: {}",
                        entry,
                        e
                    );
                }
            }
        }

        run_debug!(RunId::current(), "📥 Listed {} partners", partners.len());
        Ok(partners)
    }

    async fn get_partner_detail(
        &self,
        token: &str,
        partner_id: PartnerId,
    ) -> OrchestratorResult<PartnerDetail> {
        let path = partner_path(partner_id);
        let fetch_error = |status: Option<u16>, message: String| OrchestratorError::FetchError {
            partner_id,
            status,
            message,
        };

        let response = self
            .client
            .get(self.url(&path)?)
            .bearer_auth(token)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| fetch_error(None, e.to_string()))?;

        if !response.status().is_success() {
            let (status, body) = Self::failure_details(response).await;
            let message = format!("GET {path} failed [{status}]: {body}");
            return Err(fetch_error(Some(status), message));
        }

        let status = response.status().as_u16();
        let body: Value = response
            .json()
            .await
            .map_err(|e| fetch_error(Some(status), format!("Unreadable detail: {e}")))?;

        PartnerDetailResponse(body)
            .into_detail()
            .map_err(|e| fetch_error(Some(status), e.to_string()))
    }

    async fn submit_update(
        &self,
        token: &str,
        partner_id: PartnerId,
        payload: &UpdatePayload,
    ) -> OrchestratorResult<SubmitResponse> {
        let path = partner_path(partner_id);

        let response = self
            .client
            .put(self.url(&path)?)
            .bearer_auth(token)
            .header("Accept", "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| OrchestratorError::SubmitError {
                partner_id,
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        run_debug!(RunId::current(), "📤 PUT {} answered {}", path, status);

        Ok(SubmitResponse::new(status, body))
    }
}
