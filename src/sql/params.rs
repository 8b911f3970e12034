//! Convert serde_json::Value to values sqlx can bind for SQLite.

use serde_json::Value;
use sqlx::encode::{Encode, IsNull};
use sqlx::sqlite::{Sqlite, SqliteTypeInfo};
use sqlx::Database;

/// A value bindable to a SQLite statement. Booleans bind as 1/0 and
/// arrays/objects as JSON text, matching how rows are stored.
#[derive(Clone, Debug, PartialEq)]
pub enum SqliteBindValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl SqliteBindValue {
    pub fn from_json(v: &Value) -> Self {
        match v {
            Value::Null => SqliteBindValue::Null,
            Value::Bool(b) => SqliteBindValue::Integer(*b as i64),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    SqliteBindValue::Integer(i)
                } else if let Some(f) = n.as_f64() {
                    SqliteBindValue::Real(f)
                } else {
                    SqliteBindValue::Text(n.to_string())
                }
            }
            Value::String(s) => SqliteBindValue::Text(s.clone()),
            Value::Array(_) | Value::Object(_) => SqliteBindValue::Text(v.to_string()),
        }
    }
}

impl<'q> Encode<'q, Sqlite> for SqliteBindValue {
    fn encode_by_ref(
        &self,
        buf: &mut <Sqlite as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, Box<dyn std::error::Error + Send + Sync>> {
        match self {
            SqliteBindValue::Null => <Option<i64> as Encode<Sqlite>>::encode_by_ref(&None, buf),
            SqliteBindValue::Integer(n) => <i64 as Encode<Sqlite>>::encode_by_ref(n, buf),
            SqliteBindValue::Real(n) => <f64 as Encode<Sqlite>>::encode_by_ref(n, buf),
            SqliteBindValue::Text(s) => <String as Encode<Sqlite>>::encode_by_ref(s, buf),
        }
    }
}

impl sqlx::Type<Sqlite> for SqliteBindValue {
    fn type_info() -> SqliteTypeInfo {
        <String as sqlx::Type<Sqlite>>::type_info()
    }
}
