//! CSV audit writer
//!
//! Writes one file per run under the output directory. Columns are the union
//! of the fields populated on any record, sorted alphabetically; rows missing
//! a column get an empty cell.

use std::collections::BTreeSet;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use shared::{run_debug, RunId};

use crate::core::AuditRecord;
use crate::error::{OrchestratorError, OrchestratorResult};
use crate::traits::AuditWriter;

/// File name prefix of every audit file
pub const AUDIT_FILE_PREFIX: &str = "qps_rule_engine_audit";

/// Real audit writer producing CSV files
pub struct CsvAuditWriter {
    /// Directory receiving the audit files
    output_dir: PathBuf,
}

impl CsvAuditWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Audit file path for a run
    pub fn audit_path(&self, run: &RunId) -> PathBuf {
        self.output_dir.join(format!("{AUDIT_FILE_PREFIX}-{}.csv", run.stamp()))
    }
}

/// Render records as CSV with a sorted superset header
pub fn render_csv(records: &[AuditRecord]) -> OrchestratorResult<Vec<u8>> {
    let rows: Vec<_> = records.iter().map(AuditRecord::columns).collect();
    let header: BTreeSet<&'static str> = rows.iter().flat_map(|row| row.keys().copied()).collect();

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&header)?;
    for row in &rows {
        let cells = header
            .iter()
            .map(|column| row.get(column).map(String::as_str).unwrap_or(""));
        writer.write_record(cells)?;
    }

    writer.into_inner().map_err(|e| OrchestratorError::AuditError {
        message: e.to_string(),
    })
}

#[async_trait]
impl AuditWriter for CsvAuditWriter {
    async fn write_audit(
        &self,
        run: &RunId,
        records: &[AuditRecord],
    ) -> OrchestratorResult<Option<PathBuf>> {
        if records.is_empty() {
            return Ok(None);
        }

        let content = render_csv(records)?;
        fs::create_dir_all(&self.output_dir).await?;

        let path = self.audit_path(run);
        fs::write(&path, content).await?;

        run_debug!(run, "💾 Wrote {} audit rows to {}", records.len(), path.display());
        Ok(Some(path))
    }
}
