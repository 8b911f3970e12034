//! Load config from JSON and resolve it into a [`SchemaDescriptor`].

use crate::config::{interpret, validate, validate_references, MockConfig, SchemaDescriptor, TableDescriptor};
use crate::error::ConfigError;
use std::path::Path;

/// Build the schema descriptor from config. Validates identifiers, field
/// definitions and foreign-key integrity; any failure is fatal.
pub fn resolve(config: &MockConfig) -> Result<SchemaDescriptor, ConfigError> {
    validate(config)?;

    let mut tables = Vec::with_capacity(config.schema.len());
    for t in &config.schema {
        let fields = t
            .fields
            .iter()
            .map(|(name, def)| interpret(name, def))
            .collect::<Result<Vec<_>, _>>()?;
        if fields.iter().filter(|f| f.is_primary_key()).count() > 1 {
            return Err(ConfigError::MultiplePrimaryKeys(t.table.clone()));
        }
        tables.push(TableDescriptor {
            name: t.table.clone(),
            fields,
            seed: t.seed,
        });
    }

    let schema = SchemaDescriptor { tables };
    validate_references(&schema)?;
    Ok(schema)
}

pub fn parse_config(json: &str) -> Result<MockConfig, ConfigError> {
    serde_json::from_str(json).map_err(|e| ConfigError::Load(e.to_string()))
}

pub async fn load_from_path(path: impl AsRef<Path>) -> Result<MockConfig, ConfigError> {
    let path = path.as_ref();
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ConfigError::Load(format!("{}: {}", path.display(), e)))?;
    parse_config(&text)
}
