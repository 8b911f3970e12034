//! Generic filtering and pagination driven only by table metadata.

use crate::config::{StorageType, TableDescriptor};
use serde_json::Value;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 1000;

/// Query keys with their own meaning; never treated as filters.
pub const RESERVED_PARAMS: &[&str] = &["include", "page", "limit"];

/// Key that always addresses the key column, whatever it is named.
pub const ID_PARAM: &str = "id";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    /// `column LIKE '%value%'`
    Contains,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Predicate {
    pub column: String,
    pub op: FilterOp,
    pub value: Value,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterSet {
    pub predicates: Vec<Predicate>,
}

impl FilterSet {
    pub fn matched(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

/// Build predicates from request parameters. Keys that are neither a
/// declared field nor `id` are ignored.
pub fn apply_filters<'a, I>(table: &TableDescriptor, params: I) -> FilterSet
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let key_column = table.key_column();
    let mut predicates = Vec::new();
    for (key, raw) in params {
        if RESERVED_PARAMS.contains(&key) {
            continue;
        }
        let column = if key == ID_PARAM { key_column } else { key };
        let Some(storage) = table.storage_type(column) else {
            continue;
        };
        let predicate = if column == key_column {
            Predicate {
                column: column.to_string(),
                op: FilterOp::Eq,
                value: coerce(raw, StorageType::Integer),
            }
        } else if storage == StorageType::Text {
            Predicate {
                column: column.to_string(),
                op: FilterOp::Contains,
                value: Value::String(format!("%{}%", raw)),
            }
        } else {
            Predicate {
                column: column.to_string(),
                op: FilterOp::Eq,
                value: coerce(raw, storage),
            }
        };
        predicates.push(predicate);
    }
    FilterSet { predicates }
}

/// Coerce a query-string value for an equality predicate. Unparseable
/// input stays text and simply matches nothing.
pub fn coerce(raw: &str, storage: StorageType) -> Value {
    match storage {
        StorageType::Integer => raw
            .trim()
            .parse::<i64>()
            .map(Value::from)
            .unwrap_or_else(|_| Value::String(raw.to_string())),
        StorageType::Boolean => match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Value::from(1),
            "false" | "0" => Value::from(0),
            _ => Value::String(raw.to_string()),
        },
        StorageType::Text => Value::String(raw.to_string()),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    /// Parse `page`/`limit`; missing, unparseable or non-positive values
    /// fall back to the defaults. `limit` is capped at [`MAX_LIMIT`].
    pub fn from_params(page: Option<&str>, limit: Option<&str>) -> Self {
        Pagination {
            page: positive(page).unwrap_or(DEFAULT_PAGE),
            limit: positive(limit).unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT),
        }
    }

    pub fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.limit as u64
    }

    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.limit as u64)
    }
}

fn positive(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|n| *n > 0)
        .map(|n| n.min(u32::MAX as i64) as u32)
}
