//! Entity CRUD handlers: list, read, create, update, delete for any
//! configured table.

use crate::config::TableDescriptor;
use crate::error::AppError;
use crate::extractors::RequestParams;
use crate::query::{apply_filters, resolve_includes, Include};
use crate::response::{PageMeta, Paginated};
use crate::service::CrudService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::{json, Map, Value};

fn table<'a>(state: &'a AppState, name: &str) -> Result<&'a TableDescriptor, AppError> {
    state
        .schema
        .table(name)
        .ok_or_else(|| AppError::NotFound(format!("table '{}'", name)))
}

fn parse_id(id_str: &str) -> Result<Value, AppError> {
    let n: i64 = id_str
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid id '{}'", id_str)))?;
    Ok(Value::from(n))
}

fn body_to_map(value: Value) -> Result<Map<String, Value>, AppError> {
    match value {
        Value::Object(m) => Ok(m),
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}

fn includes<'a>(state: &'a AppState, table: &TableDescriptor, params: &RequestParams) -> Vec<Include<'a>> {
    match params.include.as_deref() {
        Some(include) => resolve_includes(&state.schema, table, include),
        None => Vec::new(),
    }
}

pub async fn list(
    State(state): State<AppState>,
    Path(table_name): Path<String>,
    params: RequestParams,
) -> Result<Json<Paginated<Value>>, AppError> {
    let table = table(&state, &table_name)?;
    let filters = apply_filters(table, params.filter_pairs());
    let pagination = params.pagination();
    let includes = includes(&state, table, &params);

    let (rows, total) = CrudService::list(&state.pool, table, &filters, &pagination, &includes).await?;
    Ok(Json(Paginated {
        data: rows,
        meta: PageMeta {
            total,
            page: pagination.page,
            limit: pagination.limit,
            total_pages: pagination.total_pages(total),
        },
    }))
}

pub async fn read(
    State(state): State<AppState>,
    Path((table_name, id_str)): Path<(String, String)>,
    params: RequestParams,
) -> Result<Json<Value>, AppError> {
    let table = table(&state, &table_name)?;
    let id = parse_id(&id_str)?;
    let includes = includes(&state, table, &params);
    let row = CrudService::read(&state.pool, table, &id, &includes)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} {}", table_name, id_str)))?;
    Ok(Json(row))
}

pub async fn create(
    State(state): State<AppState>,
    Path(table_name): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AppError> {
    let table = table(&state, &table_name)?;
    let body = body_to_map(body)?;
    let row = CrudService::create(&state.pool, table, &body).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

pub async fn update(
    State(state): State<AppState>,
    Path((table_name, id_str)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, AppError> {
    let table = table(&state, &table_name)?;
    let id = parse_id(&id_str)?;
    let body = body_to_map(body)?;
    let row = CrudService::update(&state.pool, table, &id, &body)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} {}", table_name, id_str)))?;
    Ok(Json(row))
}

pub async fn delete(
    State(state): State<AppState>,
    Path((table_name, id_str)): Path<(String, String)>,
) -> Result<Json<Value>, AppError> {
    let table = table(&state, &table_name)?;
    let id = parse_id(&id_str)?;
    if !CrudService::delete(&state.pool, table, &id).await? {
        return Err(AppError::NotFound(format!("{} {}", table_name, id_str)));
    }
    Ok(Json(json!({ "success": true })))
}
