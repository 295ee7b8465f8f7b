//! Full-record update payload construction
//!
//! The update endpoint replaces the whole partner object and expects a
//! before/after pair, so the payload is rebuilt from the fetched record with
//! every structured field present and well-formed. Nothing here can fail:
//! malformed shapes are coerced to defaults instead of rejected.

use serde_json::{json, Map, Value};
use shared::{Inventory, OldDataSnapshot, PartnerDetail, PartnerId, UpdatePayload};

/// System-managed keys that must never be sent back to the server
pub const READ_ONLY_KEYS: &[&str] = &[
    "created_at",
    "updated_at",
    "createdAt",
    "updatedAt",
    "last_update",
    "lastUpdate",
    "_id",
];

const SIZE_KEY: &str = "Size";
const OPERATING_SYSTEM_KEY: &str = "OperatingSystem";
const COUNTRY_KEY: &str = "Country";
const BLOCKED_SSP_KEY: &str = "blockedSsp";

/// Placeholder meaning "no size constraint"; the API rejects an empty list here
pub fn default_size() -> Value {
    json!([{"code": "string"}])
}

/// Placeholder meaning "no operating-system constraint"
pub fn default_operating_system() -> Value {
    json!([{"key": "string", "name": "string"}])
}

/// Placeholder meaning "no country constraint"
pub fn default_country() -> Value {
    json!([{"country_code": "str"}])
}

/// Structured fields shared verbatim by `oldData` and `updatedData`
#[derive(Debug, Clone, PartialEq)]
struct StructuredFields {
    inventory: Inventory,
    size: Value,
    operating_system: Value,
    country: Value,
    blocked_ssp: Value,
}

impl StructuredFields {
    fn from_base(base: &PartnerDetail) -> Self {
        let or_default =
            |key: &str, default: fn() -> Value| base.present(key).cloned().unwrap_or_else(default);

        Self {
            inventory: Inventory::from_record(base.fields()),
            size: or_default(SIZE_KEY, default_size),
            operating_system: or_default(OPERATING_SYSTEM_KEY, default_operating_system),
            country: or_default(COUNTRY_KEY, default_country),
            blocked_ssp: or_default(BLOCKED_SSP_KEY, || Value::Array(Vec::new())),
        }
    }
}

/// Drop system-managed keys from a fetched record
pub fn scrub_read_only(detail: &PartnerDetail) -> PartnerDetail {
    detail.without_keys(READ_ONLY_KEYS)
}

/// Build the `oldData`/`updatedData` pair for a limit change
pub fn build_payload(
    detail: &PartnerDetail,
    partner_id: PartnerId,
    new_limit: u64,
) -> UpdatePayload {
    let base = scrub_read_only(detail);
    let structured = StructuredFields::from_base(&base);

    let old_data = OldDataSnapshot {
        id: partner_id,
        api_endpoint: api_endpoint(&base),
        company: company(&base),
        size: structured.size.clone(),
        operating_system: structured.operating_system.clone(),
        country: structured.country.clone(),
        blocked_ssp: structured.blocked_ssp.clone(),
        inventory: structured.inventory.clone(),
    };

    let mut updated_data = base;
    updated_data.insert("id", Value::from(partner_id));
    updated_data.insert(Inventory::KEY, structured.inventory.to_value());
    updated_data.insert(SIZE_KEY, structured.size);
    updated_data.insert(OPERATING_SYSTEM_KEY, structured.operating_system);
    updated_data.insert(COUNTRY_KEY, structured.country);
    updated_data.insert(BLOCKED_SSP_KEY, structured.blocked_ssp);
    updated_data.set_qps_limit(new_limit);

    UpdatePayload { old_data, updated_data }
}

/// Endpoint URL, read from `api_endpoint` or the older `endpoint` key
fn api_endpoint(base: &PartnerDetail) -> Value {
    base.get("api_endpoint")
        .or_else(|| base.get("endpoint"))
        .cloned()
        .unwrap_or_else(|| Value::String(String::new()))
}

/// Nested company object, synthesized from flat fields when absent
fn company(base: &PartnerDetail) -> Value {
    if let Some(company) = base.get("Company") {
        return company.clone();
    }

    let field = |key: &str, default: Value| base.get(key).cloned().unwrap_or(default);
    let mut synthesized = Map::new();
    synthesized.insert("id".to_string(), field("company_id", Value::from(0)));
    synthesized.insert("name".to_string(), field("company_name", Value::String(String::new())));
    synthesized.insert("api_key".to_string(), field("api_key", Value::String(String::new())));
    Value::Object(synthesized)
}
