//! Partner listing, detail and update messages

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{SharedError, SharedResult};
use crate::types::{Inventory, PartnerDetail, PartnerId};

/// Body of the partner listing endpoint: either a bare array or an object
/// carrying the entries under `data` or `items`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartnerListResponse(pub Value);

impl PartnerListResponse {
    /// Raw listing entries in server order
    pub fn into_entries(self) -> SharedResult<Vec<Value>> {
        match self.0 {
            Value::Array(entries) => Ok(entries),
            Value::Object(mut envelope) => {
                for key in ["data", "items"] {
                    match envelope.remove(key) {
                        Some(Value::Array(entries)) if !entries.is_empty() => return Ok(entries),
                        _ => continue,
                    }
                }
                Ok(Vec::new())
            }
            other => Err(SharedError::ProtocolError {
                message: format!("partner listing is neither an array nor an object: {other}"),
            }),
        }
    }
}

/// Body of the partner detail endpoint: the record itself or `{"data": record}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartnerDetailResponse(pub Value);

impl PartnerDetailResponse {
    pub fn into_detail(self) -> SharedResult<PartnerDetail> {
        let record = match self.0 {
            Value::Object(mut envelope) if envelope.contains_key("data") => {
                envelope.remove("data").unwrap_or(Value::Null)
            }
            other => other,
        };

        PartnerDetail::from_value(record).ok_or_else(|| SharedError::DeserializationError {
            message: "partner detail is not a JSON object".to_string(),
        })
    }
}

/// Minimal snapshot of what the server is assumed to currently hold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OldDataSnapshot {
    pub id: PartnerId,
    pub api_endpoint: Value,
    #[serde(rename = "Company")]
    pub company: Value,
    #[serde(rename = "Size")]
    pub size: Value,
    #[serde(rename = "OperatingSystem")]
    pub operating_system: Value,
    #[serde(rename = "Country")]
    pub country: Value,
    #[serde(rename = "blockedSsp")]
    pub blocked_ssp: Value,
    #[serde(rename = "Inventory")]
    pub inventory: Inventory,
}

/// Full before/after body expected by the update endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdatePayload {
    #[serde(rename = "oldData")]
    pub old_data: OldDataSnapshot,
    #[serde(rename = "updatedData")]
    pub updated_data: PartnerDetail,
}
