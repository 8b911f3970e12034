//! Resolved schema model: config interpreted and validated for runtime use.

use crate::config::{FieldDescriptor, StorageType};
use serde::Serialize;

/// Key column created for tables that declare no `"pk"` field.
pub const IMPLICIT_KEY: &str = "id";

#[derive(Clone, Debug)]
pub struct TableDescriptor {
    pub name: String,
    /// Fields in declaration order.
    pub fields: Vec<FieldDescriptor>,
    pub seed: u32,
}

impl TableDescriptor {
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// True when the key column is a declared `"pk"` field.
    pub fn has_declared_key(&self) -> bool {
        self.fields.iter().any(FieldDescriptor::is_primary_key)
    }

    pub fn key_column(&self) -> &str {
        self.fields
            .iter()
            .find(|f| f.is_primary_key())
            .map(|f| f.name.as_str())
            .unwrap_or(IMPLICIT_KEY)
    }

    /// Physical columns in order: implicit key (if any), then declared fields.
    pub fn column_names(&self) -> Vec<&str> {
        let mut cols = Vec::with_capacity(self.fields.len() + 1);
        if !self.has_declared_key() {
            cols.push(IMPLICIT_KEY);
        }
        cols.extend(self.fields.iter().map(|f| f.name.as_str()));
        cols
    }

    pub fn storage_type(&self, column: &str) -> Option<StorageType> {
        match self.field(column) {
            Some(f) => Some(f.storage_type()),
            None if column == self.key_column() => Some(StorageType::Integer),
            None => None,
        }
    }

    pub fn boolean_columns(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|f| f.storage_type() == StorageType::Boolean)
            .map(|f| f.name.as_str())
    }

    pub fn foreign_keys(&self) -> impl Iterator<Item = (&FieldDescriptor, &str, &str)> {
        self.fields
            .iter()
            .filter_map(|f| f.foreign_key().map(|(t, c)| (f, t, c)))
    }
}

/// Immutable for the life of the process; re-seeding only touches rows.
#[derive(Clone, Debug, Default)]
pub struct SchemaDescriptor {
    pub tables: Vec<TableDescriptor>,
}

impl SchemaDescriptor {
    pub fn table(&self, name: &str) -> Option<&TableDescriptor> {
        self.tables.iter().find(|t| t.name == name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.tables.iter().position(|t| t.name == name)
    }

    pub fn summary(&self) -> Vec<TableSummary> {
        self.tables
            .iter()
            .map(|t| TableSummary {
                name: t.name.clone(),
                key_column: t.key_column().to_string(),
                seed: t.seed,
                fields: t
                    .fields
                    .iter()
                    .map(|f| FieldSummary {
                        name: f.name.clone(),
                        kind: f.kind_name(),
                        storage: f.storage_type().sql_type(),
                        boolean: f.storage_type() == StorageType::Boolean,
                        references: f.foreign_key().map(|(t, c)| format!("{}.{}", t, c)),
                    })
                    .collect(),
            })
            .collect()
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSummary {
    pub name: String,
    pub key_column: String,
    pub seed: u32,
    pub fields: Vec<FieldSummary>,
}

#[derive(Clone, Debug, Serialize)]
pub struct FieldSummary {
    pub name: String,
    pub kind: &'static str,
    pub storage: &'static str,
    pub boolean: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub references: Option<String>,
}
