//! Field type interpretation: raw field definitions into typed descriptors.

use crate::config::FieldDef;
use crate::error::ConfigError;
use crate::generator::registry;
use serde_json::{Map, Value};

pub const PRIMARY_KEY: &str = "pk";
pub const FOREIGN_KEY_PREFIX: &str = "fk:";
pub const GENERATOR_PREFIX: &str = "faker.";

#[derive(Clone, Debug, PartialEq)]
pub enum FieldKind {
    PrimaryKey,
    ForeignKey {
        target_table: String,
        target_column: String,
    },
    Enum {
        values: Vec<Value>,
    },
    Generated {
        path: String,
        options: Value,
    },
    Literal {
        value: Value,
    },
}

/// Column type a field is stored as. SQLite has no boolean, so booleans
/// live in an INTEGER column as 0/1 and are mapped back on presentation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageType {
    Integer,
    Boolean,
    Text,
}

impl StorageType {
    pub fn sql_type(self) -> &'static str {
        match self {
            StorageType::Integer | StorageType::Boolean => "INTEGER",
            StorageType::Text => "TEXT",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
}

impl FieldDescriptor {
    pub fn storage_type(&self) -> StorageType {
        match &self.kind {
            FieldKind::PrimaryKey | FieldKind::ForeignKey { .. } => StorageType::Integer,
            FieldKind::Enum { .. } | FieldKind::Literal { .. } => StorageType::Text,
            FieldKind::Generated { path, .. } => storage_type_for_path(path),
        }
    }

    pub fn is_primary_key(&self) -> bool {
        matches!(self.kind, FieldKind::PrimaryKey)
    }

    /// `(target_table, target_column)` for foreign keys.
    pub fn foreign_key(&self) -> Option<(&str, &str)> {
        match &self.kind {
            FieldKind::ForeignKey {
                target_table,
                target_column,
            } => Some((target_table.as_str(), target_column.as_str())),
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            FieldKind::PrimaryKey => "primary_key",
            FieldKind::ForeignKey { .. } => "foreign_key",
            FieldKind::Enum { .. } => "enum",
            FieldKind::Generated { .. } => "generated",
            FieldKind::Literal { .. } => "literal",
        }
    }
}

/// Storage type for a generator path. Boolean is checked before number.
/// Numbers are matched per path segment so `faker.internet.*` stays text.
pub fn storage_type_for_path(path: &str) -> StorageType {
    if path.contains("boolean") {
        StorageType::Boolean
    } else if path.split('.').any(|seg| seg == "number" || seg == "int") {
        StorageType::Integer
    } else {
        StorageType::Text
    }
}

/// Interpret one field definition. The kind follows from the shape alone.
pub fn interpret(name: &str, def: &FieldDef) -> Result<FieldDescriptor, ConfigError> {
    let kind = match def {
        FieldDef::Text(s) if s == PRIMARY_KEY => FieldKind::PrimaryKey,
        FieldDef::Text(s) if s.starts_with(FOREIGN_KEY_PREFIX) => parse_foreign_key(name, s)?,
        FieldDef::Text(s) if s.starts_with(GENERATOR_PREFIX) => {
            generated(name, s, Value::Object(Map::new()))?
        }
        FieldDef::Text(s) => FieldKind::Literal {
            value: Value::String(s.clone()),
        },
        FieldDef::Object(obj) => interpret_object(name, obj)?,
        FieldDef::Other(v) => FieldKind::Literal { value: v.clone() },
    };
    Ok(FieldDescriptor {
        name: name.to_string(),
        kind,
    })
}

fn interpret_object(name: &str, obj: &Map<String, Value>) -> Result<FieldKind, ConfigError> {
    let type_ = obj.get("type").and_then(Value::as_str).ok_or_else(|| {
        ConfigError::UnknownFieldType {
            field: name.to_string(),
            kind: "<missing>".into(),
        }
    })?;
    if type_ == "enum" {
        let values = match obj.get("values") {
            Some(Value::Array(values)) if !values.is_empty() => values.clone(),
            _ => {
                return Err(ConfigError::EmptyEnum {
                    field: name.to_string(),
                })
            }
        };
        return Ok(FieldKind::Enum { values });
    }
    if type_.starts_with(GENERATOR_PREFIX) {
        let options = obj
            .get("options")
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new()));
        return generated(name, type_, options);
    }
    Err(ConfigError::UnknownFieldType {
        field: name.to_string(),
        kind: type_.to_string(),
    })
}

fn generated(name: &str, path: &str, options: Value) -> Result<FieldKind, ConfigError> {
    if registry::lookup(path).is_none() {
        return Err(ConfigError::UnknownGenerator {
            field: name.to_string(),
            path: path.to_string(),
        });
    }
    registry::check_options(path, &options).map_err(|reason| ConfigError::InvalidGeneratorOptions {
        field: name.to_string(),
        path: path.to_string(),
        reason,
    })?;
    Ok(FieldKind::Generated {
        path: path.to_string(),
        options,
    })
}

fn parse_foreign_key(name: &str, def: &str) -> Result<FieldKind, ConfigError> {
    let invalid = || ConfigError::InvalidForeignKey {
        field: name.to_string(),
        definition: def.to_string(),
    };
    let target = &def[FOREIGN_KEY_PREFIX.len()..];
    let mut parts = target.split('.');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(table), Some(column), None) if !table.is_empty() && !column.is_empty() => {
            Ok(FieldKind::ForeignKey {
                target_table: table.to_string(),
                target_column: column.to_string(),
            })
        }
        _ => Err(invalid()),
    }
}
