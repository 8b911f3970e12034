#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use mockbase::{compile, connect, parse_config, resolve, router, AppState, SeedOptions};
use serde_json::Value;
use tower::ServiceExt;

pub const BLOG: &str = r#"{ "schema": [
    { "table": "users", "seed": 5, "fields": {
        "id": "pk",
        "name": "faker.person.fullName",
        "email": "faker.internet.email",
        "active": "faker.datatype.boolean"
    } },
    { "table": "posts", "seed": 10, "fields": {
        "id": "pk",
        "authorId": "fk:users.id",
        "title": "faker.lorem.sentence",
        "published": "faker.datatype.boolean"
    } }
] }"#;

/// Compile `config` into a fresh in-memory store and seed it.
pub async fn state(config: &str, rng_seed: Option<u64>) -> AppState {
    let schema = resolve(&parse_config(config).expect("parse")).expect("resolve");
    let pool = connect("sqlite::memory:").await.expect("connect");
    compile(&pool, &schema).await.expect("compile");
    let state = AppState::new(pool, schema, SeedOptions { rng_seed });
    state.seeder.seed_all().await.expect("seed");
    state
}

pub async fn blog() -> (Router, AppState) {
    let state = state(BLOG, Some(42)).await;
    (router(state.clone()), state)
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            req = req.header(header::CONTENT_TYPE, "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let resp = app
        .clone()
        .oneshot(req.body(body).expect("request"))
        .await
        .expect("response");
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.expect("body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, json)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

pub async fn count(state: &AppState, table: &str) -> i64 {
    let (n,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM \"{}\"", table))
        .fetch_one(&state.pool)
        .await
        .expect("count");
    n
}
