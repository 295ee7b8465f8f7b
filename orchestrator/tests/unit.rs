//! Unit tests for individual orchestrator components
//!
//! These tests exercise the public building blocks (rule engine, payload
//! builder, exclusion policy and configuration) through the library API.

use std::collections::HashMap;
use std::time::Duration;

use assert_matches::assert_matches;
use qps_orchestrator::{
    build_payload, decide, ExclusionSet, OrchestratorError, RunConfig, RunOptions,
};
use serde_json::json;
use shared::{LimitAction, PartnerDetail, SharedError};

mod common;
use common::{OrchestratorBuilder, TestFixtures};

/// Test the documented rule examples end to end
#[test]
fn test_rule_examples() {
    let cases = [
        // (sRPM, real_qps, current, action, new)
        (0.0, 10_000.0, 20_000, LimitAction::Set, 50),
        (4.0, 15_000.0, 20_000, LimitAction::Increase, 23_000),
        (1.0, 14_000.0, 27_000, LimitAction::Increase, 30_000),
        (0.1, 0.0, 600, LimitAction::Decrease, 510),
        (0.1, 0.0, 550, LimitAction::Decrease, 500),
        (1.0, 100.0, 1000, LimitAction::Hold, 1000),
    ];

    for (srpm, real_qps, current, action, new_limit) in cases {
        let decision = decide(srpm, real_qps, current);
        assert_eq!(decision.action, action, "sRPM {srpm}, qps {real_qps}, limit {current}");
        assert_eq!(decision.new_limit, new_limit, "sRPM {srpm}, qps {real_qps}, limit {current}");
    }
}

/// Test that a zero current limit never triggers growth or shrinkage
#[test]
fn test_zero_limit_holds_unless_no_revenue() {
    assert_eq!(decide(5.0, 100.0, 0).action, LimitAction::Hold);
    assert_eq!(decide(0.1, 0.0, 0).action, LimitAction::Hold);
    assert_eq!(decide(0.0, 0.0, 0).action, LimitAction::Set);
}

/// Test that inventory normalization in the payload is idempotent
#[test]
fn test_payload_inventory_normalization_is_idempotent() {
    let record = PartnerDetail::from_value(json!({
        "id": 9,
        "qps_limit": 1000,
        "Inventory": {"allowed": {"app": ["x"], "site": null}, "blocked": "garbage"}
    }))
    .unwrap();

    let first = build_payload(&record, 9, 1150);
    let second = build_payload(&first.updated_data, 9, 1150);

    assert_eq!(first.updated_data.get("Inventory"), second.updated_data.get("Inventory"));
    assert_eq!(first.old_data.inventory, second.old_data.inventory);
    assert_eq!(
        first.updated_data.get("Inventory").unwrap()["blocked"]["displaymanager"],
        json!([])
    );
}

/// Test case-insensitive, trimmed exclusion matching
#[test]
fn test_exclusion_matching() {
    let set = ExclusionSet::from_csv("Media.Net, Foo Bar ,,");

    assert!(set.is_excluded("media.net"));
    assert!(set.is_excluded("  FOO BAR"));
    assert!(!set.is_excluded("Foo"));
    assert_eq!(set.len(), 2);
    assert!(ExclusionSet::default().is_excluded("MEDIA.NET"));
}

/// Test configuration assembly from an injected environment
#[test]
fn test_config_from_lookup() {
    let env: HashMap<&str, &str> = [
        ("PLAYDIGO_EMAIL", TestFixtures::EMAIL),
        ("PLAYDIGO_PASSWORD", TestFixtures::PASSWORD),
        ("HTTP_TIMEOUT", "12"),
        ("EXCLUDED_DSPS", "Alpha,Beta"),
    ]
    .into_iter()
    .collect();

    let lookup = |key: &str| env.get(key).map(|v| v.to_string());
    let config = RunConfig::from_lookup(lookup, RunOptions::default()).unwrap();

    assert_eq!(config.credentials.email, TestFixtures::EMAIL);
    assert_eq!(config.request_timeout, Duration::from_secs(12));
    assert!(config.excluded.is_excluded("beta"));
    assert!(!config.excluded.is_excluded("Media.Net"));
    assert_eq!(config.pacing, Duration::from_millis(100));
}

/// Test that missing credentials are a configuration error naming the keys
#[test]
fn test_config_missing_credentials() {
    let result = RunConfig::from_lookup(|_: &str| None, RunOptions::default());

    assert_matches!(
        result,
        Err(OrchestratorError::ConfigurationError { ref message })
            if message.contains("PLAYDIGO_EMAIL") && message.contains("PLAYDIGO_PASSWORD")
    );
}

/// Test that a malformed base URL is rejected
#[test]
fn test_config_invalid_base_url() {
    let options = RunOptions {
        base_url: "not a url".to_string(),
        ..RunOptions::default()
    };
    let result = RunConfig::from_lookup(
        |key: &str| match key {
            "PLAYDIGO_EMAIL" => Some(TestFixtures::EMAIL.to_string()),
            "PLAYDIGO_PASSWORD" => Some(TestFixtures::PASSWORD.to_string()),
            _ => None,
        },
        options,
    );

    assert_matches!(
        result,
        Err(OrchestratorError::SharedError(SharedError::InvalidConfig { ref field, .. }))
            if field == "base_url"
    );
}

/// Test that a fresh orchestrator has an empty audit trail
#[test]
fn test_orchestrator_state_before_run() {
    let orchestrator = OrchestratorBuilder::new().build();

    assert!(orchestrator.state().records().is_empty());
    assert_eq!(orchestrator.state().summary().evaluated, 0);
}
