//! Core decision logic
//!
//! Pure components with no I/O: the rule engine, the payload builder, the
//! exclusion policy and the per-run audit state.

pub mod exclusion;
pub mod payload;
pub mod rules;
pub mod state;

pub use exclusion::ExclusionSet;
pub use payload::build_payload;
pub use rules::{decide, Decision};
pub use state::{AuditRecord, RunState, RunSummary};
