//! Orchestrator library for tuning partner QPS limits
//!
//! This library evaluates every demand partner against a fixed rule set and
//! writes the adjusted limits back through the management API, leaving a CSV
//! audit trail of each pass.

pub mod config;
pub mod core;
pub mod error;
pub mod orchestrator;
pub mod services;
pub mod traits;

// Re-export commonly used types
pub use config::{RunConfig, RunOptions};
pub use core::{build_payload, decide, AuditRecord, Decision, ExclusionSet, RunState, RunSummary};
pub use error::{OrchestratorError, OrchestratorResult};
pub use orchestrator::{Orchestrator, RunReport};
pub use traits::{AuditWriter, Authenticator, PartnerClient, SubmitResponse};
