//! Main entry point for the QPS tuner binary
//!
//! Wires the real API client and CSV audit writer into the orchestrator and
//! runs a single pass.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;

use qps_orchestrator::{
    config::{DEFAULT_BASE_URL, DEFAULT_OUTPUT_DIR, DEFAULT_PACING_MS},
    services::{CsvAuditWriter, RealPartnerApi},
    Orchestrator, RunConfig, RunOptions,
};
use shared::{logging, run_debug, RunId};

/// Exit status for missing or invalid configuration
const EXIT_CONFIG: u8 = 2;
/// Exit status for a pass aborted by a fatal error
const EXIT_FATAL: u8 = 1;

/// Rule-based QPS limit tuner for demand partners
#[derive(Parser)]
#[command(name = "qps-orchestrator")]
#[command(about = "Evaluates every demand partner and adjusts its QPS limit")]
pub struct Args {
    /// Management API base URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Directory receiving the audit CSV
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,

    /// Pause after each partner that reached the API, in milliseconds
    #[arg(long, default_value_t = DEFAULT_PACING_MS)]
    pub pacing_ms: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    fn run_options(&self) -> RunOptions {
        RunOptions {
            base_url: self.base_url.clone(),
            output_dir: self.output.clone(),
            pacing: Duration::from_millis(self.pacing_ms),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let run = RunId::init();
    logging::init_tracing_with_level(Some(&args.log_level));
    logging::log_startup(run, "QPS rule engine");

    let config = match RunConfig::from_env(args.run_options()) {
        Ok(config) => config,
        Err(e) => {
            logging::log_error(run, "Configuration", &e);
            return ExitCode::from(EXIT_CONFIG);
        }
    };
    run_debug!(
        run,
        "Base URL: {}, Timeout: {:?}, Pacing: {:?}, Output: {}",
        config.base_url,
        config.request_timeout,
        config.pacing,
        config.output_dir.display()
    );

    let api = match RealPartnerApi::from_config(&config) {
        Ok(api) => api,
        Err(e) => {
            logging::log_error(run, "HTTP client setup", &e);
            return ExitCode::from(EXIT_FATAL);
        }
    };
    let audit = CsvAuditWriter::new(config.output_dir.clone());

    // Create orchestrator with dependency injection
    let mut orchestrator = Orchestrator::new(config, api.clone(), api, audit);

    match orchestrator.run().await {
        Ok(report) => {
            let summary = report.summary;
            println!(
                "Evaluated {} partners: {} updated, {} failed, {} skipped, {} excluded",
                summary.evaluated,
                summary.updated,
                summary.failed,
                summary.skipped,
                summary.excluded
            );
            if let Some(path) = report.audit_path {
                println!("Audit: {}", path.display());
            }
            logging::log_success(run, "Run completed");
            ExitCode::SUCCESS
        }
        Err(e) => {
            logging::log_error(run, "Run", &e);
            ExitCode::from(EXIT_FATAL)
        }
    }
}
