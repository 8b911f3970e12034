mod common;

use common::{count, state, BLOG};
use mockbase::{parse_config, resolve, AppError, ConfigError};
use pretty_assertions::assert_eq;
use std::collections::HashSet;

#[tokio::test]
async fn seeds_configured_counts_with_valid_foreign_keys() {
    let state = state(BLOG, None).await;
    assert_eq!(count(&state, "users").await, 5);
    assert_eq!(count(&state, "posts").await, 10);

    let users: Vec<(i64,)> = sqlx::query_as("SELECT id FROM users").fetch_all(&state.pool).await.unwrap();
    let ids: HashSet<i64> = users.into_iter().map(|(id,)| id).collect();
    let authors: Vec<(Option<i64>,)> = sqlx::query_as("SELECT authorId FROM posts")
        .fetch_all(&state.pool)
        .await
        .unwrap();
    for (author,) in authors {
        let author = author.expect("every post has an author");
        assert!(ids.contains(&author), "dangling authorId {}", author);
    }
}

#[tokio::test]
async fn booleans_are_stored_as_zero_or_one() {
    let state = state(BLOG, Some(9)).await;
    let (bad,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE active NOT IN (0, 1)")
        .fetch_one(&state.pool)
        .await
        .unwrap();
    assert_eq!(bad, 0);
}

#[tokio::test]
async fn clear_twice_empties_and_reseed_restarts_keys() {
    let state = state(BLOG, Some(1)).await;
    state.seeder.clear().await;
    state.seeder.clear().await;
    assert_eq!(count(&state, "users").await, 0);
    assert_eq!(count(&state, "posts").await, 0);

    let report = state.seeder.reseed().await.unwrap();
    let counts: Vec<_> = report.iter().map(|r| (r.table.as_str(), r.rows)).collect();
    assert_eq!(counts, [("users", 5), ("posts", 10)]);

    let (min, max): (i64, i64) = sqlx::query_as("SELECT MIN(id), MAX(id) FROM users")
        .fetch_one(&state.pool)
        .await
        .unwrap();
    assert_eq!((min, max), (1, 5));
}

#[tokio::test]
async fn concurrent_reseed_is_rejected() {
    let state = state(BLOG, Some(2)).await;
    let (first, second) = tokio::join!(state.seeder.reseed(), state.seeder.reseed());
    assert!(first.is_ok());
    assert!(matches!(second, Err(AppError::Conflict(_))));
    assert_eq!(count(&state, "posts").await, 10);
}

#[tokio::test]
async fn forward_reference_seeds_null_first_time() {
    let config = r#"{ "schema": [
        { "table": "posts", "seed": 4, "fields": { "id": "pk", "authorId": "fk:users.id" } },
        { "table": "users", "seed": 3, "fields": { "id": "pk", "name": "faker.person.firstName" } }
    ] }"#;
    let state = state(config, Some(5)).await;
    assert_eq!(count(&state, "posts").await, 4);
    assert_eq!(count(&state, "users").await, 3);
    let (nulls,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM posts WHERE authorId IS NULL")
        .fetch_one(&state.pool)
        .await
        .unwrap();
    assert_eq!(nulls, 4);
}

#[tokio::test]
async fn fixed_rng_seed_is_reproducible() {
    let a = state(BLOG, Some(77)).await;
    let b = state(BLOG, Some(77)).await;
    let sql = "SELECT id, name, email, active FROM users ORDER BY id";
    let rows_a: Vec<(i64, String, String, i64)> = sqlx::query_as(sql).fetch_all(&a.pool).await.unwrap();
    let rows_b: Vec<(i64, String, String, i64)> = sqlx::query_as(sql).fetch_all(&b.pool).await.unwrap();
    assert_eq!(rows_a, rows_b);
}

#[tokio::test]
async fn zero_seed_and_literals() {
    let config = r#"{ "schema": [
        { "table": "settings", "seed": 2, "fields": { "theme": "dark", "tags": ["a", "b"], "flag": true } },
        { "table": "audit", "fields": { "id": "pk", "note": "faker.lorem.word" } }
    ] }"#;
    let state = state(config, None).await;
    assert_eq!(count(&state, "audit").await, 0);
    let rows: Vec<(i64, String, String, String)> =
        sqlx::query_as("SELECT id, theme, tags, CAST(flag AS TEXT) FROM settings ORDER BY id")
            .fetch_all(&state.pool)
            .await
            .unwrap();
    assert_eq!(
        rows,
        vec![
            (1, "dark".into(), "[\"a\",\"b\"]".into(), "1".into()),
            (2, "dark".into(), "[\"a\",\"b\"]".into(), "1".into()),
        ]
    );
}

#[test]
fn undefined_targets_are_integrity_errors() {
    let missing_table = r#"{ "schema": [ { "table": "posts", "fields": { "authorId": "fk:people.id" } } ] }"#;
    let err = resolve(&parse_config(missing_table).unwrap()).unwrap_err();
    assert!(err.is_integrity());
    assert!(matches!(err, ConfigError::UndefinedTarget { ref target, .. } if target == "people"));

    let missing_column = r#"{ "schema": [
        { "table": "users", "fields": { "id": "pk" } },
        { "table": "posts", "fields": { "authorId": "fk:users.uuid" } }
    ] }"#;
    let err = resolve(&parse_config(missing_column).unwrap()).unwrap_err();
    assert!(matches!(err, ConfigError::UndefinedTargetColumn { ref column, .. } if column == "uuid"));
}

#[test]
fn malformed_fields_fail_fast() {
    for bad in [
        r#"{ "schema": [ { "table": "t", "fields": { "x": "fk:users" } } ] }"#,
        r#"{ "schema": [ { "table": "t", "fields": { "x": { "type": "enum", "values": [] } } } ] }"#,
        r#"{ "schema": [ { "table": "t", "fields": { "x": "faker.does.notExist" } } ] }"#,
        r#"{ "schema": [ { "table": "t", "fields": { "x": { "type": "widget" } } } ] }"#,
        r#"{ "schema": [ { "table": "t", "fields": { "x": { "type": "faker.date.past", "options": { "years": 400000 } } } } ] }"#,
        r#"{ "schema": [ { "table": "t", "fields": { "a": "pk", "b": "pk" } } ] }"#,
        r#"{ "schema": [ { "table": "t" }, { "table": "t" } ] }"#,
        r#"{ "schema": [ { "table": "bad name" } ] }"#,
    ] {
        let result = parse_config(bad).and_then(|c| resolve(&c));
        assert!(result.is_err(), "accepted: {}", bad);
    }
}
