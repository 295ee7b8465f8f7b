//! Run configuration derived from the environment
//!
//! Configuration is assembled once at process start and passed into the
//! orchestrator; nothing below reads the environment afterwards.
//!
//! ## Configuration Sources
//! Values are loaded from:
//! 1. `.env` file in the current directory or parent directories (if present)
//! 2. System environment variables
//!
//! ## Required Keys
//! - `PLAYDIGO_EMAIL`: management API login
//! - `PLAYDIGO_PASSWORD`: management API password
//!
//! ## Optional Keys
//! - `HTTP_TIMEOUT`: per-request timeout in seconds (default 30)
//! - `EXCLUDED_DSPS`: comma-separated partner names to leave untouched (default `Media.Net`)

use std::path::PathBuf;
use std::time::Duration;

use shared::{Credentials, SharedError};
use url::Url;

use crate::core::ExclusionSet;
use crate::error::{OrchestratorError, OrchestratorResult};

pub const DEFAULT_BASE_URL: &str = "https://dashapi.xe.works";
pub const DEFAULT_OUTPUT_DIR: &str = "outputs";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_PACING_MS: u64 = 100;

/// Settings supplied on the command line rather than the environment
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub base_url: String,
    pub output_dir: PathBuf,
    pub pacing: Duration,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            pacing: Duration::from_millis(DEFAULT_PACING_MS),
        }
    }
}

/// Complete configuration for one tuning run
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub credentials: Credentials,
    pub base_url: Url,
    pub request_timeout: Duration,
    pub excluded: ExclusionSet,
    /// Pause between partners that reached the remote API
    pub pacing: Duration,
    pub output_dir: PathBuf,
}

impl RunConfig {
    const REQUIRED_KEYS: &'static [&'static str] = &["PLAYDIGO_EMAIL", "PLAYDIGO_PASSWORD"];

    /// Load `.env` (if present) and build the configuration from the process environment
    pub fn from_env(options: RunOptions) -> OrchestratorResult<Self> {
        // Silently ignored when no .env file exists
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok(), options)
    }

    /// Build the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F, options: RunOptions) -> OrchestratorResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let missing: Vec<&str> = Self::REQUIRED_KEYS
            .iter()
            .copied()
            .filter(|key| read(*key).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(OrchestratorError::config(format!(
                "Missing credentials: {}. These keys must be set as environment variables.",
                missing.join(", ")
            )));
        }
        let credentials = Credentials::new(
            read("PLAYDIGO_EMAIL").unwrap_or_default(),
            read("PLAYDIGO_PASSWORD").unwrap_or_default(),
        );

        let request_timeout = match read("HTTP_TIMEOUT") {
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|_| SharedError::InvalidConfig {
                    field: "HTTP_TIMEOUT".to_string(),
                    value: raw.clone(),
                })?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        // An unset or empty list falls back to the default; the raw value is
        // used untrimmed so that a whitespace-only list excludes nothing.
        let excluded = match lookup("EXCLUDED_DSPS").filter(|v| !v.is_empty()) {
            Some(list) => ExclusionSet::from_csv(&list),
            None => ExclusionSet::default(),
        };

        let base_url = Url::parse(&options.base_url).map_err(|e| SharedError::InvalidConfig {
            field: "base_url".to_string(),
            value: format!("{} ({e})", options.base_url),
        })?;

        Ok(Self {
            credentials,
            base_url,
            request_timeout,
            excluded,
            pacing: options.pacing,
            output_dir: options.output_dir,
        })
    }
}
