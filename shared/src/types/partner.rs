//! Partner records as returned by the management API

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::lenient;

/// Remote identifier of a demand-side partner
pub type PartnerId = i64;

/// Lightweight listing entry for one partner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartnerSummary {
    #[serde(deserialize_with = "lenient::id")]
    pub id: PartnerId,

    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub name: String,

    /// Site revenue per mille; absent or null reads as zero
    #[serde(rename = "sRPM", default, deserialize_with = "lenient::f64_or_zero")]
    pub srpm: f64,

    /// Observed throughput, when the listing carries it
    #[serde(
        default,
        deserialize_with = "lenient::opt_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub real_qps: Option<f64>,
}

impl PartnerSummary {
    pub fn new(id: PartnerId, name: impl Into<String>, srpm: f64) -> Self {
        Self {
            id,
            name: name.into(),
            srpm,
            real_qps: None,
        }
    }

    pub fn with_real_qps(mut self, real_qps: f64) -> Self {
        self.real_qps = Some(real_qps);
        self
    }
}

/// Full remote record for one partner.
///
/// The record is open-ended: only a handful of fields are interpreted here and
/// everything else is carried through untouched, since the update endpoint
/// expects the whole object back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartnerDetail(Map<String, Value>);

impl PartnerDetail {
    /// Canonical limit field
    pub const LIMIT_KEY: &'static str = "qps_limit";
    /// Legacy-cased limit field still read by parts of the backend
    pub const LEGACY_LIMIT_KEY: &'static str = "qps_Limit";
    pub const REAL_QPS_KEY: &'static str = "real_qps";

    /// Wrap a JSON value, returning `None` unless it is an object
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self(fields)),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Field value when present and not null
    pub fn present(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Copy of the record without the given keys
    pub fn without_keys(&self, keys: &[&str]) -> Self {
        Self(
            self.0
                .iter()
                .filter(|(k, _)| !keys.contains(&k.as_str()))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }

    /// Current limit: the canonical field when non-zero, then the legacy field, then 0
    pub fn qps_limit(&self) -> u64 {
        [Self::LIMIT_KEY, Self::LEGACY_LIMIT_KEY]
            .iter()
            .filter_map(|key| self.get(key).and_then(lenient::value_as_limit))
            .find(|limit| *limit > 0)
            .unwrap_or(0)
    }

    /// Observed throughput when the record carries a non-zero value
    pub fn real_qps(&self) -> Option<f64> {
        self.get(Self::REAL_QPS_KEY)
            .and_then(lenient::value_as_f64)
            .filter(|qps| *qps != 0.0)
    }

    /// Write the limit under both the canonical and the legacy-cased key.
    ///
    /// The backend schema is inconsistent about which casing it reads, so both
    /// are always set to the same value.
    pub fn set_qps_limit(&mut self, limit: u64) {
        self.insert(Self::LIMIT_KEY, Value::from(limit));
        self.insert(Self::LEGACY_LIMIT_KEY, Value::from(limit));
    }
}
