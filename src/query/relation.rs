//! Relation resolution: maps an `include` token to a belongs-to or has-many
//! embedding, using only the schema.
//!
//! Matching is a naming heuristic:
//! - belongs-to (checked first, in the source table's field order): the
//!   token equals the referenced table name, or the foreign-key field name
//!   with a trailing `Id` removed (`authorId` -> `author`);
//! - has-many: the token names a table holding a foreign key to the source
//!   table; its first such field is used.
//!
//! First match wins. Several foreign keys into the same table under the
//! same stripped name are not disambiguated.

use crate::config::{SchemaDescriptor, TableDescriptor};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RelationKind {
    /// Source holds `fk_field`, matched against `related.target_column`.
    BelongsTo { fk_field: String, target_column: String },
    /// Related rows hold `fk_field`, matched against `source.source_column`.
    HasMany { fk_field: String, source_column: String },
}

/// One relation to embed under `name`.
#[derive(Clone, Debug)]
pub struct Include<'a> {
    pub name: String,
    pub related: &'a TableDescriptor,
    pub kind: RelationKind,
}

const ID_SUFFIX: &str = "Id";

/// Relation name a foreign-key field is known by: `authorId` -> `author`.
pub fn belongs_to_name(field: &str) -> &str {
    match field.strip_suffix(ID_SUFFIX) {
        Some(stem) if !stem.is_empty() => stem,
        _ => field,
    }
}

/// Resolve one token. `None` means no relation matches; callers leave the
/// query unchanged rather than failing.
pub fn resolve<'a>(schema: &'a SchemaDescriptor, source: &TableDescriptor, token: &str) -> Option<Include<'a>> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }

    for (field, target_table, target_column) in source.foreign_keys() {
        if token == target_table || token == belongs_to_name(&field.name) {
            let related = schema.table(target_table)?;
            return Some(Include {
                name: token.to_string(),
                related,
                kind: RelationKind::BelongsTo {
                    fk_field: field.name.clone(),
                    target_column: target_column.to_string(),
                },
            });
        }
    }

    let related = schema.table(token)?;
    let (field, _, source_column) = related
        .foreign_keys()
        .find(|(_, target_table, _)| *target_table == source.name)?;
    Some(Include {
        name: token.to_string(),
        related,
        kind: RelationKind::HasMany {
            fk_field: field.name.clone(),
            source_column: source_column.to_string(),
        },
    })
}

/// Resolve a comma-separated `include` value by resolving each token in
/// turn. Unresolvable tokens and repeats are dropped.
pub fn resolve_all<'a>(schema: &'a SchemaDescriptor, source: &TableDescriptor, include: &str) -> Vec<Include<'a>> {
    let mut out: Vec<Include<'a>> = Vec::new();
    for token in include.split(',') {
        match resolve(schema, source, token) {
            Some(inc) if !out.iter().any(|i| i.name == inc.name) => out.push(inc),
            Some(_) => {}
            None => {
                tracing::debug!(table = %source.name, token = %token.trim(), "include not resolvable, ignored");
            }
        }
    }
    out
}
