//! Apply the schema to the store: drop every existing user table, then
//! CREATE TABLE for each configured table in declaration order.
//!
//! Foreign keys are declared inline. SQLite resolves `REFERENCES` by table
//! name when the constraint is enforced, so a table may reference one that
//! is declared after it.

use crate::config::{validate_references, FieldKind, SchemaDescriptor, TableDescriptor};
use crate::error::AppError;
use crate::sql::quoted;
use sqlx::{SqliteConnection, SqlitePool};

/// Column definition for one field.
fn column_def(name: &str, kind: &FieldKind, storage: &str) -> String {
    match kind {
        FieldKind::PrimaryKey => format!("{} INTEGER PRIMARY KEY AUTOINCREMENT", quoted(name)),
        FieldKind::ForeignKey {
            target_table,
            target_column,
        } => format!(
            "{} INTEGER REFERENCES {}({}) ON DELETE CASCADE",
            quoted(name),
            quoted(target_table),
            quoted(target_column)
        ),
        _ => format!("{} {}", quoted(name), storage),
    }
}

/// CREATE TABLE statement for `table`, columns in field order. Tables without
/// a declared key get an implicit autoincrement key column first.
pub fn create_table_sql(table: &TableDescriptor) -> String {
    let mut col_defs = Vec::with_capacity(table.fields.len() + 1);
    if !table.has_declared_key() {
        col_defs.push(column_def(table.key_column(), &FieldKind::PrimaryKey, "INTEGER"));
    }
    for f in &table.fields {
        col_defs.push(column_def(&f.name, &f.kind, f.storage_type().sql_type()));
    }
    format!("CREATE TABLE {} ({})", quoted(&table.name), col_defs.join(", "))
}

/// Rebuild the store from `schema`. Runs on a single connection so the
/// foreign-key pragma covers every statement. Any DDL failure is returned
/// and the store is left partially built.
pub async fn compile(pool: &SqlitePool, schema: &SchemaDescriptor) -> Result<(), AppError> {
    validate_references(schema)?;

    let mut conn = pool.acquire().await?;
    sqlx::query("PRAGMA foreign_keys = OFF").execute(&mut *conn).await?;
    let result = rebuild(&mut conn, schema).await;
    sqlx::query("PRAGMA foreign_keys = ON").execute(&mut *conn).await?;
    result?;

    tracing::info!(tables = schema.tables.len(), "schema compiled");
    Ok(())
}

async fn rebuild(conn: &mut SqliteConnection, schema: &SchemaDescriptor) -> Result<(), AppError> {
    let existing: Vec<(String,)> = sqlx::query_as(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%'",
    )
    .fetch_all(&mut *conn)
    .await?;
    for (name,) in existing {
        let sql = format!("DROP TABLE IF EXISTS {}", quoted(&name));
        tracing::debug!(sql = %sql, "drop");
        sqlx::query(&sql).execute(&mut *conn).await?;
    }

    for table in &schema.tables {
        let sql = create_table_sql(table);
        tracing::debug!(sql = %sql, "create");
        sqlx::query(&sql).execute(&mut *conn).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{parse_config, resolve};
    use pretty_assertions::assert_eq;

    fn schema(json: &str) -> SchemaDescriptor {
        resolve(&parse_config(json).unwrap()).unwrap()
    }

    #[test]
    fn ddl_follows_field_order_and_kinds() {
        let schema = schema(
            r#"{ "schema": [
                { "table": "users", "fields": { "id": "pk", "name": "faker.person.fullName", "age": "faker.number.int", "active": "faker.datatype.boolean" } },
                { "table": "posts", "fields": { "id": "pk", "authorId": "fk:users.id", "status": { "type": "enum", "values": ["a"] }, "lang": "en" } }
            ] }"#,
        );
        assert_eq!(
            create_table_sql(&schema.tables[0]),
            "CREATE TABLE \"users\" (\"id\" INTEGER PRIMARY KEY AUTOINCREMENT, \"name\" TEXT, \"age\" INTEGER, \"active\" INTEGER)"
        );
        assert_eq!(
            create_table_sql(&schema.tables[1]),
            "CREATE TABLE \"posts\" (\"id\" INTEGER PRIMARY KEY AUTOINCREMENT, \
             \"authorId\" INTEGER REFERENCES \"users\"(\"id\") ON DELETE CASCADE, \"status\" TEXT, \"lang\" TEXT)"
        );
    }

    #[test]
    fn implicit_key_comes_first() {
        let schema = schema(r#"{ "schema": [ { "table": "tags", "fields": { "label": "faker.lorem.word" } } ] }"#);
        assert_eq!(
            create_table_sql(&schema.tables[0]),
            "CREATE TABLE \"tags\" (\"id\" INTEGER PRIMARY KEY AUTOINCREMENT, \"label\" TEXT)"
        );
    }

    #[tokio::test]
    async fn compile_replaces_existing_tables() {
        let pool = crate::store::connect("sqlite::memory:").await.unwrap();
        sqlx::query("CREATE TABLE stale (x INTEGER)").execute(&pool).await.unwrap();

        let schema = schema(
            r#"{ "schema": [
                { "table": "posts", "fields": { "id": "pk", "authorId": "fk:users.id" } },
                { "table": "users", "fields": { "id": "pk" } }
            ] }"#,
        );
        compile(&pool, &schema).await.unwrap();
        compile(&pool, &schema).await.unwrap();

        let names: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();
        let names: Vec<_> = names.into_iter().map(|(n,)| n).collect();
        assert_eq!(names, ["posts", "users"]);
    }
}
