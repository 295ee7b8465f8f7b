//! Core types used throughout the tuner

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

pub mod inventory;
pub mod lenient;
pub mod partner;

pub use inventory::{Inventory, InventoryLists};
pub use partner::{PartnerDetail, PartnerId, PartnerSummary};

/// Global run ID singleton - set once at startup
static RUN_ID: OnceLock<RunId> = OnceLock::new();

/// Identifier for one tuning run, derived from its start time
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId {
    started_at: DateTime<Utc>,
}

impl RunId {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self { started_at }
    }

    /// Initialize the global run ID from the current time
    pub fn init() -> &'static RunId {
        RUN_ID.get_or_init(|| RunId::new(Utc::now()))
    }

    /// Get the global run ID, initializing it on first use
    pub fn current() -> &'static RunId {
        Self::init()
    }

    /// Compact UTC stamp used in audit file names
    pub fn stamp(&self) -> String {
        self.started_at.format("%Y%m%d-%H%M%S").to_string()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "run-{}", self.stamp())
    }
}

/// Limit-change action chosen by the rule engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitAction {
    Set,
    Increase,
    Decrease,
    Hold,
}

impl fmt::Display for LimitAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LimitAction::Set => write!(f, "set"),
            LimitAction::Increase => write!(f, "increase"),
            LimitAction::Decrease => write!(f, "decrease"),
            LimitAction::Hold => write!(f, "hold"),
        }
    }
}

/// Terminal outcome for one partner in a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartnerStatus {
    Updated,
    Failed,
    Skipped,
    SkippedExcluded,
}

impl fmt::Display for PartnerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartnerStatus::Updated => write!(f, "updated"),
            PartnerStatus::Failed => write!(f, "failed"),
            PartnerStatus::Skipped => write!(f, "skipped"),
            PartnerStatus::SkippedExcluded => write!(f, "skipped_excluded"),
        }
    }
}
