//! Synthetic row generation for one table.

use crate::config::{FieldKind, TableDescriptor};
use crate::generator::registry;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// One generated row: column name to storable value. Key columns are absent.
pub type Row = Map<String, Value>;

/// Committed values of each foreign key's target column, keyed by the
/// referencing field name.
pub type ForeignKeyPools = HashMap<String, Vec<Value>>;

/// Generate `count` rows for `table`. Foreign keys draw uniformly from
/// `pools`; a field with no (or an empty) pool gets `null`.
pub fn generate(table: &TableDescriptor, count: u32, pools: &ForeignKeyPools, rng: &mut StdRng) -> Vec<Row> {
    (0..count).map(|_| generate_row(table, pools, rng)).collect()
}

fn generate_row(table: &TableDescriptor, pools: &ForeignKeyPools, rng: &mut StdRng) -> Row {
    let mut row = Map::new();
    for field in &table.fields {
        let value = match &field.kind {
            FieldKind::PrimaryKey => continue,
            FieldKind::ForeignKey { .. } => pools
                .get(&field.name)
                .and_then(|keys| keys.choose(rng))
                .cloned()
                .unwrap_or(Value::Null),
            FieldKind::Enum { values } => values.choose(rng).cloned().unwrap_or(Value::Null),
            FieldKind::Generated { path, options } => match registry::lookup(path) {
                Some(gen) => gen(options, rng),
                None => Value::Null,
            },
            FieldKind::Literal { value } => value.clone(),
        };
        row.insert(field.name.clone(), storable(value));
    }
    row
}

/// SQLite has no boolean or JSON column type: booleans become 1/0 and
/// arrays/objects are stored as JSON text.
pub fn storable(value: Value) -> Value {
    match value {
        Value::Bool(b) => Value::from(b as i64),
        Value::Array(_) | Value::Object(_) => Value::String(value.to_string()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{parse_config, resolve};
    use rand::SeedableRng;
    use serde_json::json;

    fn table() -> TableDescriptor {
        let config = parse_config(
            r#"{ "schema": [
                { "table": "users", "fields": { "id": "pk" } },
                { "table": "posts", "fields": {
                    "id": "pk",
                    "authorId": "fk:users.id",
                    "status": { "type": "enum", "values": ["draft", "published"] },
                    "published": "faker.datatype.boolean",
                    "views": { "type": "faker.number.int", "options": { "min": 0, "max": 10 } },
                    "kind": "article",
                    "meta": { "type": "faker.lorem.word" }
                } }
            ] }"#,
        )
        .unwrap();
        resolve(&config).unwrap().table("posts").unwrap().clone()
    }

    #[test]
    fn rows_follow_field_kinds() {
        let table = table();
        let mut pools = ForeignKeyPools::new();
        pools.insert("authorId".into(), vec![json!(1), json!(2), json!(3)]);
        let mut rng = StdRng::seed_from_u64(11);
        let rows = generate(&table, 25, &pools, &mut rng);
        assert_eq!(rows.len(), 25);
        for row in &rows {
            assert!(!row.contains_key("id"));
            assert!([json!(1), json!(2), json!(3)].contains(&row["authorId"]));
            assert!(["draft", "published"].contains(&row["status"].as_str().unwrap()));
            assert!(row["published"] == json!(0) || row["published"] == json!(1));
            let views = row["views"].as_i64().unwrap();
            assert!((0..=10).contains(&views));
            assert_eq!(row["kind"], json!("article"));
            assert!(row["meta"].is_string());
        }
    }

    #[test]
    fn empty_target_degrades_to_null() {
        let table = table();
        let mut rng = StdRng::seed_from_u64(2);
        let rows = generate(&table, 3, &ForeignKeyPools::new(), &mut rng);
        assert!(rows.iter().all(|r| r["authorId"].is_null()));

        let mut pools = ForeignKeyPools::new();
        pools.insert("authorId".into(), Vec::new());
        let rows = generate(&table, 3, &pools, &mut rng);
        assert!(rows.iter().all(|r| r["authorId"].is_null()));
    }

    #[test]
    fn zero_count_generates_nothing() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(generate(&table(), 0, &ForeignKeyPools::new(), &mut rng).is_empty());
    }

    #[test]
    fn storable_coerces_booleans_and_documents() {
        assert_eq!(storable(json!(true)), json!(1));
        assert_eq!(storable(json!(false)), json!(0));
        assert_eq!(storable(json!(["a"])), json!("[\"a\"]"));
        assert_eq!(storable(json!("x")), json!("x"));
    }
}
