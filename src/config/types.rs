//! Raw config types matching the mock schema JSON.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Top-level config: `{ "schema": [ ... ] }`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MockConfig {
    #[serde(default)]
    pub schema: Vec<TableConfig>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TableConfig {
    pub table: String,
    /// Number of rows generated at startup and on re-seed.
    #[serde(default)]
    pub seed: u32,
    /// Field name to definition, in declaration order.
    #[serde(default)]
    pub fields: IndexMap<String, FieldDef>,
}

/// One field definition as written in config. Interpreted once by
/// [`crate::config::interpret`]; nothing downstream reads this type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldDef {
    /// `"pk"`, `"fk:users.id"`, `"faker.person.fullName"` or literal text.
    Text(String),
    /// `{ "type": "enum", "values": [...] }` or `{ "type": "faker.*", "options": {...} }`.
    Object(Map<String, Value>),
    /// Numbers, booleans, null, arrays: stored verbatim.
    Other(Value),
}

impl From<&str> for FieldDef {
    fn from(s: &str) -> Self {
        FieldDef::Text(s.to_string())
    }
}

impl From<Value> for FieldDef {
    fn from(v: Value) -> Self {
        match v {
            Value::String(s) => FieldDef::Text(s),
            Value::Object(m) => FieldDef::Object(m),
            other => FieldDef::Other(other),
        }
    }
}
