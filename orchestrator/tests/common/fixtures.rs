//! Test fixtures and data for orchestrator tests
//!
//! This module provides consistent test data and fixtures used across all test suites.

use std::path::PathBuf;
use std::time::Duration;

use qps_orchestrator::{ExclusionSet, RunConfig};
use serde_json::json;
use shared::{Credentials, PartnerDetail, PartnerId, PartnerSummary};
use url::Url;

/// Standard test data and fixtures
pub struct TestFixtures;

impl TestFixtures {
    pub const TOKEN: &'static str = "test-token";
    pub const EMAIL: &'static str = "ops@example.com";
    pub const PASSWORD: &'static str = "secret";
    pub const BASE_URL: &'static str = "https://api.test.invalid";
    pub const AUDIT_FILE: &'static str = "outputs/qps_rule_engine_audit-test.csv";

    /// Partner ids used by the mixed listing
    pub const EXCLUDED_ID: PartnerId = 1;
    pub const DECREASE_ID: PartnerId = 2;
    pub const HOLD_ID: PartnerId = 3;
    pub const BROKEN_ID: PartnerId = 4;
    pub const REJECTED_ID: PartnerId = 5;

    /// Run configuration with no pacing and the default exclusion list
    pub fn config() -> RunConfig {
        RunConfig {
            credentials: Credentials::new(Self::EMAIL, Self::PASSWORD),
            base_url: Url::parse(Self::BASE_URL).unwrap(),
            request_timeout: Duration::from_secs(5),
            excluded: ExclusionSet::default(),
            pacing: Duration::ZERO,
            output_dir: PathBuf::from("outputs"),
        }
    }

    /// Listing covering every terminal state
    pub fn mixed_partners() -> Vec<PartnerSummary> {
        vec![
            PartnerSummary::new(Self::EXCLUDED_ID, "Media.Net", 2.5),
            PartnerSummary::new(Self::DECREASE_ID, "Alpha", 0.1),
            PartnerSummary::new(Self::HOLD_ID, "Beta", 1.0).with_real_qps(100.0),
            PartnerSummary::new(Self::BROKEN_ID, "Gamma", 0.5),
            PartnerSummary::new(Self::REJECTED_ID, "Delta", 0.0),
        ]
    }

    /// Detail record as the management API returns it
    pub fn detail(id: PartnerId, qps_limit: u64) -> PartnerDetail {
        PartnerDetail::from_value(json!({
            "id": id,
            "name": format!("partner-{id}"),
            "qps_limit": qps_limit,
            "api_endpoint": format!("https://bidder.example/{id}"),
            "company_id": 40 + id,
            "created_at": "2024-01-01T00:00:00Z",
            "Inventory": {"allowed": {"app": ["com.example"]}},
        }))
        .unwrap()
    }

    /// Detail record carrying only the legacy limit key
    pub fn legacy_detail(id: PartnerId, qps_limit: u64) -> PartnerDetail {
        PartnerDetail::from_value(json!({
            "id": id,
            "qps_Limit": qps_limit,
        }))
        .unwrap()
    }

    /// Limits returned by the detail endpoint for the mixed listing
    pub fn mixed_limit(id: PartnerId) -> u64 {
        match id {
            Self::DECREASE_ID => 600,
            Self::HOLD_ID => 1000,
            Self::REJECTED_ID => 800,
            _ => 0,
        }
    }
}
