//! Inventory allow/block lists attached to a partner record

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The six inventory categories, each a list of opaque entries
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryLists {
    pub app: Vec<Value>,
    pub site: Vec<Value>,
    pub publisher: Vec<Value>,
    pub crid: Vec<Value>,
    pub adomain: Vec<Value>,
    pub displaymanager: Vec<Value>,
}

impl InventoryLists {
    /// Rebuild the lists from an arbitrary value; each category is kept only
    /// when it is an array, otherwise it becomes empty.
    pub fn from_value(value: Option<&Value>) -> Self {
        let fields = value.and_then(Value::as_object);
        let list = |key: &str| -> Vec<Value> {
            fields
                .and_then(|f| f.get(key))
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default()
        };

        Self {
            app: list("app"),
            site: list("site"),
            publisher: list("publisher"),
            crid: list("crid"),
            adomain: list("adomain"),
            displaymanager: list("displaymanager"),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.app.is_empty()
            && self.site.is_empty()
            && self.publisher.is_empty()
            && self.crid.is_empty()
            && self.adomain.is_empty()
            && self.displaymanager.is_empty()
    }
}

/// Normalized `Inventory` sub-object with `allowed` and `blocked` sides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    pub allowed: InventoryLists,
    pub blocked: InventoryLists,
}

impl Inventory {
    pub const KEY: &'static str = "Inventory";

    /// Normalize an `Inventory` value of any shape
    pub fn from_value(value: Option<&Value>) -> Self {
        let fields = value.and_then(Value::as_object);
        Self {
            allowed: InventoryLists::from_value(fields.and_then(|f| f.get("allowed"))),
            blocked: InventoryLists::from_value(fields.and_then(|f| f.get("blocked"))),
        }
    }

    /// Normalize the `Inventory` field of a record
    pub fn from_record(record: &Map<String, Value>) -> Self {
        Self::from_value(record.get(Self::KEY))
    }

    pub fn to_value(&self) -> Value {
        // Derived Serialize on plain vectors of JSON values cannot fail
        serde_json::to_value(self).unwrap_or_else(|_| Value::Object(Map::new()))
    }
}
