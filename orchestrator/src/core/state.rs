//! Per-run state: the audit trail and outcome counters
//!
//! Records are appended as partners reach a terminal state and are handed to
//! the audit writer once, at the end of the run.

use serde::{Deserialize, Serialize};
use shared::{LimitAction, PartnerId, PartnerStatus, PartnerSummary};
use std::collections::BTreeMap;

use super::rules::Decision;

/// Longest response excerpt kept in an audit row
pub const RESPONSE_EXCERPT_CHARS: usize = 200;

/// One audit row for an evaluated partner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub partner_id: PartnerId,
    pub name: String,
    pub status: PartnerStatus,
    pub srpm: Option<f64>,
    pub real_qps: Option<f64>,
    pub current_limit: Option<u64>,
    pub action: Option<LimitAction>,
    pub new_limit: Option<u64>,
    pub reason: Option<String>,
    pub http_status: Option<u16>,
    pub response: Option<String>,
    pub error: Option<String>,
}

impl AuditRecord {
    fn base(summary: &PartnerSummary, status: PartnerStatus) -> Self {
        Self {
            partner_id: summary.id,
            name: summary.name.clone(),
            status,
            srpm: Some(summary.srpm),
            real_qps: None,
            current_limit: None,
            action: None,
            new_limit: None,
            reason: None,
            http_status: None,
            response: None,
            error: None,
        }
    }

    /// Partner skipped by name before any remote call
    pub fn excluded(summary: &PartnerSummary) -> Self {
        Self::base(summary, PartnerStatus::SkippedExcluded)
    }

    /// Detail fetch failed; no decision was computed
    pub fn fetch_failed(summary: &PartnerSummary, error: impl std::fmt::Display) -> Self {
        Self {
            error: Some(format!("detail_get_failed: {error}")),
            ..Self::base(summary, PartnerStatus::Failed)
        }
    }

    /// Partner evaluated by the rule engine; status starts as `skipped`
    pub fn evaluated(
        summary: &PartnerSummary,
        real_qps: f64,
        current_limit: u64,
        decision: &Decision,
    ) -> Self {
        Self {
            real_qps: Some(real_qps),
            current_limit: Some(current_limit),
            action: Some(decision.action),
            new_limit: Some(decision.new_limit),
            reason: Some(decision.reason.clone()),
            ..Self::base(summary, PartnerStatus::Skipped)
        }
    }

    /// Record the remote answer to an update submission
    pub fn with_submission(mut self, http_status: u16, body: &str) -> Self {
        self.status = if (200..300).contains(&http_status) {
            PartnerStatus::Updated
        } else {
            PartnerStatus::Failed
        };
        self.http_status = Some(http_status);
        self.response = Some(excerpt(body, RESPONSE_EXCERPT_CHARS));
        self
    }

    /// Record a transport failure during submission
    pub fn with_submit_error(mut self, error: impl std::fmt::Display) -> Self {
        self.status = PartnerStatus::Failed;
        self.error = Some(format!("update_failed: {error}"));
        self
    }

    /// Populated fields keyed by audit column name.
    ///
    /// Evaluated rows always carry `http_status` and `response`, left empty
    /// when no update was submitted.
    pub fn columns(&self) -> BTreeMap<&'static str, String> {
        let mut columns = BTreeMap::new();
        columns.insert("dsp_id", self.partner_id.to_string());
        columns.insert("name", self.name.clone());
        columns.insert("status", self.status.to_string());

        let optional = [
            ("sRPM", self.srpm.map(|v| v.to_string())),
            ("real_qps", self.real_qps.map(|v| v.to_string())),
            ("current_limit", self.current_limit.map(|v| v.to_string())),
            ("action", self.action.map(|v| v.to_string())),
            ("new_limit", self.new_limit.map(|v| v.to_string())),
            ("reason", self.reason.clone()),
            ("http_status", self.http_status.map(|v| v.to_string())),
            ("response", self.response.clone()),
            ("error", self.error.clone()),
        ];
        for (column, value) in optional {
            if let Some(value) = value {
                columns.insert(column, value);
            }
        }
        if self.action.is_some() {
            columns.entry("http_status").or_default();
            columns.entry("response").or_default();
        }
        columns
    }
}

/// Truncate to at most `max_chars` characters without splitting a code point
pub fn excerpt(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Aggregate outcome counts for a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub evaluated: usize,
    pub updated: usize,
    pub failed: usize,
    pub skipped: usize,
    pub excluded: usize,
}

/// Core run state management
#[derive(Debug, Default)]
pub struct RunState {
    records: Vec<AuditRecord>,
    summary: RunSummary,
}

impl RunState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finished partner to the audit trail
    pub fn record(&mut self, record: AuditRecord) {
        self.summary.evaluated += 1;
        match record.status {
            PartnerStatus::Updated => self.summary.updated += 1,
            PartnerStatus::Failed => self.summary.failed += 1,
            PartnerStatus::Skipped => self.summary.skipped += 1,
            PartnerStatus::SkippedExcluded => self.summary.excluded += 1,
        }
        self.records.push(record);
    }

    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    pub fn records(&self) -> &[AuditRecord] {
        &self.records
    }
}
