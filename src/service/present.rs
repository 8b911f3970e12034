//! Map stored rows to their API shape: 0/1 booleans become `true`/`false`
//! and embedded relations are decoded from JSON text.

use crate::config::TableDescriptor;
use crate::query::{Include, RelationKind};
use serde_json::Value;

/// Present one row of `table`, including any embedded relations.
pub fn present_row(table: &TableDescriptor, includes: &[Include<'_>], mut row: Value) -> Value {
    if let Some(obj) = row.as_object_mut() {
        for col in table.boolean_columns() {
            if let Some(v) = obj.get_mut(col) {
                *v = as_bool(v.take());
            }
        }
        for inc in includes {
            if let Some(v) = obj.get_mut(&inc.name) {
                *v = embedded(inc, v.take());
            }
        }
    }
    row
}

fn as_bool(v: Value) -> Value {
    match v {
        Value::Number(n) => Value::Bool(n.as_i64().map(|i| i != 0).unwrap_or(false)),
        other => other,
    }
}

fn embedded(inc: &Include<'_>, raw: Value) -> Value {
    let decoded = match raw {
        Value::String(s) => serde_json::from_str(&s).unwrap_or(Value::Null),
        other => other,
    };
    match (&inc.kind, decoded) {
        (RelationKind::BelongsTo { .. }, Value::Object(o)) => present_row(inc.related, &[], Value::Object(o)),
        (RelationKind::BelongsTo { .. }, _) => Value::Null,
        (RelationKind::HasMany { .. }, Value::Array(items)) => Value::Array(
            items
                .into_iter()
                .map(|item| present_row(inc.related, &[], item))
                .collect(),
        ),
        (RelationKind::HasMany { .. }, _) => Value::Array(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{parse_config, resolve, SchemaDescriptor};
    use crate::query::resolve_relation;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn schema() -> SchemaDescriptor {
        let config = parse_config(
            r#"{ "schema": [
                { "table": "users", "fields": { "id": "pk", "active": "faker.datatype.boolean" } },
                { "table": "posts", "fields": { "id": "pk", "authorId": "fk:users.id", "draft": "faker.datatype.boolean" } }
            ] }"#,
        )
        .unwrap();
        resolve(&config).unwrap()
    }

    #[test]
    fn booleans_are_mapped() {
        let schema = schema();
        let users = schema.table("users").unwrap();
        assert_eq!(
            present_row(users, &[], json!({"id": 1, "active": 1})),
            json!({"id": 1, "active": true})
        );
        assert_eq!(
            present_row(users, &[], json!({"id": 2, "active": 0})),
            json!({"id": 2, "active": false})
        );
        assert_eq!(
            present_row(users, &[], json!({"id": 3, "active": null})),
            json!({"id": 3, "active": null})
        );
    }

    #[test]
    fn embedded_rows_are_decoded_and_mapped() {
        let schema = schema();
        let posts = schema.table("posts").unwrap();
        let users = schema.table("users").unwrap();

        let author = resolve_relation(&schema, posts, "author").unwrap();
        let row = json!({"id": 1, "authorId": 4, "draft": 1, "author": "{\"id\":4,\"active\":0}"});
        assert_eq!(
            present_row(posts, &[author.clone()], row),
            json!({"id": 1, "authorId": 4, "draft": true, "author": {"id": 4, "active": false}})
        );

        let row = json!({"id": 2, "authorId": null, "draft": 0, "author": null});
        assert_eq!(present_row(posts, &[author], row)["author"], Value::Null);

        let many = resolve_relation(&schema, users, "posts").unwrap();
        let row = json!({"id": 4, "active": 1, "posts": "[{\"id\":1,\"authorId\":4,\"draft\":0}]"});
        assert_eq!(
            present_row(users, &[many.clone()], row)["posts"],
            json!([{"id": 1, "authorId": 4, "draft": false}])
        );
        let row = json!({"id": 5, "active": 1, "posts": "[]"});
        assert_eq!(present_row(users, &[many], row)["posts"], json!([]));
    }
}
