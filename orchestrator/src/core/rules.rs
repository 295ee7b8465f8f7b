//! Rule engine mapping partner performance to a QPS limit change
//!
//! Rules are evaluated in strict priority order and the first match wins. The
//! strong-revenue rule is checked before the moderate one, so a partner that
//! qualifies for both only ever gets the uncapped growth.

use serde::{Deserialize, Serialize};
use shared::LimitAction;

/// Limit applied when a partner reports no revenue at all
pub const ZERO_REVENUE_LIMIT: u64 = 50;
/// Ceiling for growth under the moderate-revenue rule
pub const MODERATE_GROWTH_CAP: u64 = 30_000;
/// Floor for shrinking low-revenue partners
pub const DECREASE_FLOOR: u64 = 500;

const STRONG_SRPM: f64 = 3.0;
const STRONG_SATURATION: f64 = 0.70;
const MODERATE_SRPM: f64 = 0.3;
const MODERATE_SATURATION: f64 = 0.50;
const LOW_SRPM: f64 = 0.2;
const GROWTH_FACTOR: f64 = 1.15;
const SHRINK_FACTOR: f64 = 0.85;

/// Outcome of evaluating one partner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub action: LimitAction,
    pub new_limit: u64,
    pub reason: String,
}

impl Decision {
    fn new(action: LimitAction, new_limit: u64, reason: &str) -> Self {
        Self {
            action,
            new_limit,
            reason: reason.to_string(),
        }
    }

    /// Whether applying this decision would change the remote limit
    pub fn changes(&self, current_limit: u64) -> bool {
        self.action != LimitAction::Hold && self.new_limit != current_limit
    }
}

/// Decide the next limit for a partner.
///
/// `srpm` and `real_qps` are expected to be already coerced (missing values as
/// `0.0`); non-finite inputs are treated as zero as well.
pub fn decide(srpm: f64, real_qps: f64, current_limit: u64) -> Decision {
    let srpm = finite_or_zero(srpm);
    let real_qps = finite_or_zero(real_qps);
    let current = current_limit as f64;

    if srpm == 0.0 {
        return Decision::new(LimitAction::Set, ZERO_REVENUE_LIMIT, "sRPM==0 → set 50");
    }
    if srpm > STRONG_SRPM && current_limit > 0 && real_qps >= STRONG_SATURATION * current {
        return Decision::new(
            LimitAction::Increase,
            scale_up(current_limit, GROWTH_FACTOR),
            "sRPM>3 & ≥70% → +15% (no cap)",
        );
    }
    if srpm > MODERATE_SRPM && current_limit > 0 && real_qps >= MODERATE_SATURATION * current {
        return Decision::new(
            LimitAction::Increase,
            scale_up(current_limit, GROWTH_FACTOR).min(MODERATE_GROWTH_CAP),
            "sRPM>0.3 & ≥50% → +15% (cap 30000)",
        );
    }
    if srpm < LOW_SRPM && current_limit > 0 {
        return Decision::new(
            LimitAction::Decrease,
            scale_up(current_limit, SHRINK_FACTOR).max(DECREASE_FLOOR),
            "sRPM<0.2 → −15% (floor 500)",
        );
    }
    Decision::new(LimitAction::Hold, current_limit, "no change")
}

// Ceiling, so a warranted change always moves the limit by at least one unit
fn scale_up(limit: u64, factor: f64) -> u64 {
    (limit as f64 * factor).ceil() as u64
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
