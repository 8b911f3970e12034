//! Config validation: identifiers, uniqueness and foreign-key integrity.

use crate::config::{MockConfig, SchemaDescriptor};
use crate::error::ConfigError;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier regex"));

pub fn is_identifier(s: &str) -> bool {
    IDENTIFIER.is_match(s)
}

/// Checks on the raw config, before fields are interpreted.
pub fn validate(config: &MockConfig) -> Result<(), ConfigError> {
    let mut names = HashSet::new();
    for t in &config.schema {
        if !is_identifier(&t.table) {
            return Err(ConfigError::InvalidIdentifier(t.table.clone()));
        }
        if !names.insert(t.table.as_str()) {
            return Err(ConfigError::DuplicateTable(t.table.clone()));
        }
        for field in t.fields.keys() {
            if !is_identifier(field) {
                return Err(ConfigError::InvalidIdentifier(format!("{}.{}", t.table, field)));
            }
        }
    }
    Ok(())
}

/// Every foreign key must target a table of this schema, and that table's
/// key column. SQLite rejects inserts against a foreign key whose parent
/// column is neither a primary key nor UNIQUE.
pub fn validate_references(schema: &SchemaDescriptor) -> Result<(), ConfigError> {
    for table in &schema.tables {
        for (field, target_table, target_column) in table.foreign_keys() {
            let target = schema
                .table(target_table)
                .ok_or_else(|| ConfigError::UndefinedTarget {
                    table: table.name.clone(),
                    field: field.name.clone(),
                    target: target_table.to_string(),
                })?;
            if !target.column_names().contains(&target_column) {
                return Err(ConfigError::UndefinedTargetColumn {
                    table: table.name.clone(),
                    field: field.name.clone(),
                    target: target_table.to_string(),
                    column: target_column.to_string(),
                });
            }
            if target_column != target.key_column() {
                return Err(ConfigError::NonKeyTarget {
                    table: table.name.clone(),
                    field: field.name.clone(),
                    target: target_table.to_string(),
                    column: target_column.to_string(),
                });
            }
        }
    }
    Ok(())
}
