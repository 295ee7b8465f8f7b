//! Main orchestrator implementation
//!
//! Drives one tuning pass: authenticate, list partners, then evaluate each
//! partner in listing order through exclusion, detail fetch, rule decision and
//! (when the limit changes) update submission. Collaborators are injected so
//! the whole pass can run against mocks.

use std::path::PathBuf;

use tokio::time::sleep;

use shared::{logging, run_debug, run_error, run_info, run_warn, PartnerSummary, RunId};

use crate::{
    config::RunConfig,
    core::{build_payload, decide, AuditRecord, RunState, RunSummary},
    error::{OrchestratorError, OrchestratorResult},
    traits::{AuditWriter, Authenticator, PartnerClient},
};

/// Outcome of a completed pass
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub summary: RunSummary,
    /// Written audit file, `None` when no partner was evaluated
    pub audit_path: Option<PathBuf>,
}

/// Orchestrator that evaluates every partner once per run
pub struct Orchestrator<A, C, W>
where
    A: Authenticator + 'static,
    C: PartnerClient + 'static,
    W: AuditWriter + 'static,
{
    config: RunConfig,

    /// Injected services
    authenticator: A,
    client: C,
    audit: W,

    /// Audit trail of the current pass
    state: RunState,
}

impl<A, C, W> Orchestrator<A, C, W>
where
    A: Authenticator + 'static,
    C: PartnerClient + 'static,
    W: AuditWriter + 'static,
{
    /// Create new orchestrator with injected dependencies
    pub fn new(config: RunConfig, authenticator: A, client: C, audit: W) -> Self {
        Self {
            config,
            authenticator,
            client,
            audit,
            state: RunState::new(),
        }
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// Run one full pass.
    ///
    /// Authentication, listing, the final audit write and fatal errors
    /// (see [`OrchestratorError::is_fatal`]) fail the pass without an audit
    /// file; other per-partner failures are recorded and the loop moves on.
    pub async fn run(&mut self) -> OrchestratorResult<RunReport> {
        let run = RunId::current();
        self.state = RunState::new();

        logging::log_progress(run, "Authenticating", self.config.base_url.as_str());
        let token = self.authenticator.authenticate(&self.config.credentials).await?;

        let partners = self.client.list_partners(&token).await?;
        run_info!(
            run,
            "📋 {} partners listed ({} excluded names)",
            partners.len(),
            self.config.excluded.len()
        );

        for partner in &partners {
            if self.config.excluded.is_excluded(&partner.name) {
                run_info!(run, "⏭️  [{}] {} excluded", partner.id, partner.name);
                self.state.record(AuditRecord::excluded(partner));
                continue;
            }

            let record = self.evaluate_partner(&token, partner).await?;
            self.state.record(record);

            if !self.config.pacing.is_zero() {
                sleep(self.config.pacing).await;
            }
        }

        let audit_path = self.audit.write_audit(run, self.state.records()).await?;
        let summary = self.state.summary();

        run_info!(
            run,
            "📊 Evaluated {} partners: {} updated, {} failed, {} skipped, {} excluded",
            summary.evaluated,
            summary.updated,
            summary.failed,
            summary.skipped,
            summary.excluded
        );
        if let Some(path) = &audit_path {
            run_info!(run, "💾 Audit written to {}", path.display());
        }

        Ok(RunReport { summary, audit_path })
    }

    /// Take one non-excluded partner to a terminal state
    async fn evaluate_partner(
        &self,
        token: &str,
        partner: &PartnerSummary,
    ) -> OrchestratorResult<AuditRecord> {
        let run = RunId::current();

        let detail = match self.client.get_partner_detail(token, partner.id).await {
            Ok(detail) => detail,
            Err(e) if e.is_fatal() => return Err(abort(partner, e)),
            Err(e) => {
                run_warn!(run, "❌ [{}] {} detail fetch failed: {}", partner.id, partner.name, e);
                return Ok(AuditRecord::fetch_failed(partner, e));
            }
        };

        let current_limit = detail.qps_limit();
        let real_qps = detail
            .real_qps()
            .or(partner.real_qps.filter(|qps| *qps != 0.0))
            .unwrap_or(0.0);

        let decision = decide(partner.srpm, real_qps, current_limit);
        let record = AuditRecord::evaluated(partner, real_qps, current_limit, &decision);

        if !decision.changes(current_limit) {
            run_debug!(
                run,
                "➖ [{}] {} unchanged at {} ({})",
                partner.id,
                partner.name,
                current_limit,
                decision.reason
            );
            return Ok(record);
        }

        let payload = build_payload(&detail, partner.id, decision.new_limit);
        let record = match self.client.submit_update(token, partner.id, &payload).await {
            Ok(response) => {
                if response.is_success() {
                    run_info!(
                        run,
                        "✅ [{}] {} {} → {} ({})",
                        partner.id,
                        partner.name,
                        current_limit,
                        decision.new_limit,
                        decision.reason
                    );
                } else {
                    run_warn!(
                        run,
                        "❌ [{}] {} update rejected [{}]",
                        partner.id,
                        partner.name,
                        response.status
                    );
                }
                record.with_submission(response.status, &response.body)
            }
            Err(e) if e.is_fatal() => return Err(abort(partner, e)),
            Err(e) => {
                run_warn!(run, "❌ [{}] {} update failed: {}", partner.id, partner.name, e);
                record.with_submit_error(e)
            }
        };
        Ok(record)
    }
}

/// Log an error that ends the pass while working on one partner
fn abort(partner: &PartnerSummary, error: OrchestratorError) -> OrchestratorError {
    run_error!(
        RunId::current(),
        "🛑 [{}] {} aborted the run: {}",
        partner.id,
        partner.name,
        error
    );
    error
}
