//! Test helpers and builder patterns for orchestrator tests
//!
//! This module provides convenient helper functions and builder patterns
//! to reduce test boilerplate and improve maintainability.

use std::path::PathBuf;

use qps_orchestrator::traits::{MockAuditWriter, MockAuthenticator, MockPartnerClient};
use qps_orchestrator::*;
use shared::{PartnerStatus, PartnerSummary};

use super::fixtures::TestFixtures;

/// Type alias for test orchestrator with all mocks
pub type TestOrchestrator = Orchestrator<MockAuthenticator, MockPartnerClient, MockAuditWriter>;

/// Builder pattern for creating test orchestrators with sensible defaults
///
/// The authenticator and audit writer fall back to always-succeeding mocks
/// unless a test configures them. The partner client has no defaults, so any
/// call a test did not ask for fails loudly.
pub struct OrchestratorBuilder {
    config: RunConfig,
    authenticator: MockAuthenticator,
    client: MockPartnerClient,
    audit: MockAuditWriter,
    custom_authenticator: bool,
    custom_audit: bool,
}

impl OrchestratorBuilder {
    pub fn new() -> Self {
        Self {
            config: TestFixtures::config(),
            authenticator: MockAuthenticator::new(),
            client: MockPartnerClient::new(),
            audit: MockAuditWriter::new(),
            custom_authenticator: false,
            custom_audit: false,
        }
    }

    /// Adjust the run configuration
    pub fn with_config<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut RunConfig),
    {
        setup(&mut self.config);
        self
    }

    /// Configure the authenticator mock with a setup function
    pub fn with_authenticator<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut MockAuthenticator),
    {
        setup(&mut self.authenticator);
        self.custom_authenticator = true;
        self
    }

    /// Configure the partner client mock with a setup function
    pub fn with_client<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut MockPartnerClient),
    {
        setup(&mut self.client);
        self
    }

    /// Configure the audit writer mock with a setup function
    pub fn with_audit<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut MockAuditWriter),
    {
        setup(&mut self.audit);
        self.custom_audit = true;
        self
    }

    /// Build the orchestrator with all configured mocks
    pub fn build(mut self) -> TestOrchestrator {
        if !self.custom_authenticator {
            self.authenticator
                .expect_authenticate()
                .returning(|_| Ok(TestFixtures::TOKEN.to_string()));
        }
        if !self.custom_audit {
            self.audit.expect_write_audit().returning(|_, records| {
                Ok((!records.is_empty()).then(|| PathBuf::from(TestFixtures::AUDIT_FILE)))
            });
        }

        Orchestrator::new(self.config, self.authenticator, self.client, self.audit)
    }
}

impl Default for OrchestratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper functions for common test operations
pub struct TestHelpers;

impl TestHelpers {
    /// Client mock serving the mixed listing from the fixtures
    ///
    /// `Gamma` fails its detail fetch and `Delta` gets its update rejected.
    pub fn mixed_client(client: &mut MockPartnerClient) {
        client
            .expect_list_partners()
            .times(1)
            .returning(|_| Ok(TestFixtures::mixed_partners()));

        client
            .expect_get_partner_detail()
            .withf(|_, id| *id != TestFixtures::EXCLUDED_ID)
            .times(4)
            .returning(|_, id| {
                if id == TestFixtures::BROKEN_ID {
                    return Err(OrchestratorError::FetchError {
                        partner_id: id,
                        status: Some(503),
                        message: "GET /playdigo/dsp/4 failed [503]: unavailable".to_string(),
                    });
                }
                Ok(TestFixtures::detail(id, TestFixtures::mixed_limit(id)))
            });

        client
            .expect_submit_update()
            .times(2)
            .returning(|_, id, _| {
                if id == TestFixtures::REJECTED_ID {
                    Ok(SubmitResponse::new(422, "Size is invalid"))
                } else {
                    Ok(SubmitResponse::new(200, "{\"status\":\"ok\"}"))
                }
            });
    }

    /// Client mock listing the given partners, all sharing one detail limit,
    /// with every update accepted
    pub fn uniform_client(
        client: &mut MockPartnerClient,
        partners: Vec<PartnerSummary>,
        qps_limit: u64,
    ) {
        client
            .expect_list_partners()
            .times(1)
            .returning(move |_| Ok(partners.clone()));
        client
            .expect_get_partner_detail()
            .returning(move |_, id| Ok(TestFixtures::detail(id, qps_limit)));
        client
            .expect_submit_update()
            .returning(|_, _, _| Ok(SubmitResponse::new(200, "ok")));
    }

    /// Status recorded for a partner in the last pass
    pub fn status_of(orchestrator: &TestOrchestrator, name: &str) -> Option<PartnerStatus> {
        orchestrator
            .state()
            .records()
            .iter()
            .find(|record| record.name == name)
            .map(|record| record.status)
    }

    /// Record for a partner in the last pass
    pub fn record_of<'a>(orchestrator: &'a TestOrchestrator, name: &str) -> &'a AuditRecord {
        orchestrator
            .state()
            .records()
            .iter()
            .find(|record| record.name == name)
            .unwrap_or_else(|| panic!("no audit record for {name}"))
    }
}
