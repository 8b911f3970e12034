//! Builds parameterized SELECT, COUNT, INSERT, UPDATE, DELETE from table descriptors.

use crate::config::TableDescriptor;
use crate::query::{FilterOp, FilterSet, Include, Pagination, RelationKind};
use serde_json::{Map, Value};

const BASE_ALIAS: &str = "base";
const REL_ALIAS: &str = "rel";

/// Quote identifier for SQLite (safe: only from config).
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[derive(Debug, Default)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<Value>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf::default()
    }

    fn push_param(&mut self, v: Value) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

/// SELECT list of the table's own columns, qualified by `alias`.
fn select_column_list(table: &TableDescriptor, alias: &str) -> String {
    table
        .column_names()
        .iter()
        .map(|c| format!("{}.{} AS {}", alias, quoted(c), quoted(c)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// RETURNING list: plain column names.
fn returning_list(table: &TableDescriptor) -> String {
    table
        .column_names()
        .iter()
        .map(|c| quoted(c))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `json_object('col', rel."col", ...)` over the related table's declared columns.
fn json_object_expr(table: &TableDescriptor) -> String {
    let pairs = table
        .column_names()
        .iter()
        .map(|c| format!("'{}', {}.{}", c, REL_ALIAS, quoted(c)))
        .collect::<Vec<_>>()
        .join(", ");
    format!("json_object({})", pairs)
}

/// Scalar subquery embedding one include as JSON text: an object (or NULL)
/// for belongs-to, an array (possibly empty) for has-many.
fn include_subquery(inc: &Include<'_>) -> String {
    let rel_table = quoted(&inc.related.name);
    let obj = json_object_expr(inc.related);
    match &inc.kind {
        RelationKind::BelongsTo {
            fk_field,
            target_column,
        } => format!(
            "(SELECT {} FROM {} AS {} WHERE {}.{} = {}.{} LIMIT 1)",
            obj,
            rel_table,
            REL_ALIAS,
            REL_ALIAS,
            quoted(target_column),
            BASE_ALIAS,
            quoted(fk_field)
        ),
        RelationKind::HasMany {
            fk_field,
            source_column,
        } => format!(
            "(SELECT json_group_array(json(sub.obj)) FROM (SELECT {} AS obj FROM {} AS {} WHERE {}.{} = {}.{} ORDER BY {}.{}) AS sub)",
            obj,
            rel_table,
            REL_ALIAS,
            REL_ALIAS,
            quoted(fk_field),
            BASE_ALIAS,
            quoted(source_column),
            REL_ALIAS,
            quoted(inc.related.key_column())
        ),
    }
}

fn select_parts(table: &TableDescriptor, includes: &[Include<'_>]) -> String {
    let mut parts = vec![select_column_list(table, BASE_ALIAS)];
    for inc in includes {
        parts.push(format!("{} AS {}", include_subquery(inc), quoted(&inc.name)));
    }
    parts.join(", ")
}

/// WHERE clause for the filter set, binding values into `q`. The list and
/// count queries both go through here so they always agree.
pub fn where_clause(filters: &FilterSet, q: &mut QueryBuf) -> String {
    if filters.is_empty() {
        return String::new();
    }
    let parts: Vec<String> = filters
        .predicates
        .iter()
        .map(|p| {
            let n = q.push_param(p.value.clone());
            let op = match p.op {
                FilterOp::Eq => "=",
                FilterOp::Contains => "LIKE",
            };
            format!("{}.{} {} ?{}", BASE_ALIAS, quoted(&p.column), op, n)
        })
        .collect();
    format!(" WHERE {}", parts.join(" AND "))
}

/// SELECT by key column with includes. Caller's id is the sole param.
pub fn select_by_id(table: &TableDescriptor, id: &Value, includes: &[Include<'_>]) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(id.clone());
    q.sql = format!(
        "SELECT {} FROM {} AS {} WHERE {}.{} = ?{}",
        select_parts(table, includes),
        quoted(&table.name),
        BASE_ALIAS,
        BASE_ALIAS,
        quoted(table.key_column()),
        n
    );
    q
}

/// SELECT page of rows matching filters, ordered by key, with includes.
pub fn select_list(
    table: &TableDescriptor,
    filters: &FilterSet,
    pagination: &Pagination,
    includes: &[Include<'_>],
) -> QueryBuf {
    let mut q = QueryBuf::new();
    let where_sql = where_clause(filters, &mut q);
    q.sql = format!(
        "SELECT {} FROM {} AS {}{} ORDER BY {}.{} LIMIT {} OFFSET {}",
        select_parts(table, includes),
        quoted(&table.name),
        BASE_ALIAS,
        where_sql,
        BASE_ALIAS,
        quoted(table.key_column()),
        pagination.limit,
        pagination.offset()
    );
    q
}

/// COUNT(*) over the same filters as [`select_list`], without pagination.
pub fn count(table: &TableDescriptor, filters: &FilterSet) -> QueryBuf {
    let mut q = QueryBuf::new();
    let where_sql = where_clause(filters, &mut q);
    q.sql = format!("SELECT COUNT(*) FROM {} AS {}{}", quoted(&table.name), BASE_ALIAS, where_sql);
    q
}

/// INSERT of declared columns present in `body`. The key column is written
/// only when the body supplies it; otherwise the store assigns it.
pub fn insert(table: &TableDescriptor, body: &Map<String, Value>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = Vec::new();
    let mut placeholders = Vec::new();
    for c in table.column_names() {
        let Some(val) = body.get(c) else { continue };
        let n = q.push_param(val.clone());
        cols.push(quoted(c));
        placeholders.push(format!("?{}", n));
    }
    let returning = returning_list(table);
    q.sql = if cols.is_empty() {
        format!("INSERT INTO {} DEFAULT VALUES RETURNING {}", quoted(&table.name), returning)
    } else {
        format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
            quoted(&table.name),
            cols.join(", "),
            placeholders.join(", "),
            returning
        )
    };
    q
}

/// UPDATE by id: SET only declared non-key columns present in `body`.
/// With nothing to set this degrades to a SELECT of the row.
pub fn update(table: &TableDescriptor, id: &Value, body: &Map<String, Value>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let key = table.key_column();
    let mut sets = Vec::new();
    for c in table.column_names() {
        if c == key {
            continue;
        }
        let Some(val) = body.get(c) else { continue };
        let n = q.push_param(val.clone());
        sets.push(format!("{} = ?{}", quoted(c), n));
    }
    let returning = returning_list(table);
    let id_param = q.push_param(id.clone());
    q.sql = if sets.is_empty() {
        format!(
            "SELECT {} FROM {} WHERE {} = ?{}",
            returning,
            quoted(&table.name),
            quoted(key),
            id_param
        )
    } else {
        format!(
            "UPDATE {} SET {} WHERE {} = ?{} RETURNING {}",
            quoted(&table.name),
            sets.join(", "),
            quoted(key),
            id_param,
            returning
        )
    };
    q
}

/// DELETE by id, returning the key of the deleted row.
pub fn delete(table: &TableDescriptor, id: &Value) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(id.clone());
    let key = quoted(table.key_column());
    q.sql = format!("DELETE FROM {} WHERE {} = ?{} RETURNING {}", quoted(&table.name), key, n, key);
    q
}

/// All non-null values of one column, for foreign-key generation.
pub fn select_column_values(table: &TableDescriptor, column: &str) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} IS NOT NULL ORDER BY {}",
        quoted(column),
        quoted(&table.name),
        quoted(column),
        quoted(table.key_column())
    );
    q
}

pub fn delete_all(table: &TableDescriptor) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!("DELETE FROM {}", quoted(&table.name));
    q
}
