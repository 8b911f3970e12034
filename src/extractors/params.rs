//! Extract list/detail query parameters: `include`, `page`, `limit` and
//! field filters, in request order.

use crate::error::AppError;
use crate::query::Pagination;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestParams {
    /// All `include` values joined with commas.
    pub include: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
    /// Every other key/value pair.
    pub filters: Vec<(String, String)>,
}

impl RequestParams {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = RequestParams::default();
        let mut includes: Vec<String> = Vec::new();
        for (k, v) in pairs {
            match k.as_str() {
                "include" => includes.push(v),
                "page" => params.page = Some(v),
                "limit" => params.limit = Some(v),
                _ => params.filters.push((k, v)),
            }
        }
        if !includes.is_empty() {
            params.include = Some(includes.join(","));
        }
        params
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::from_params(self.page.as_deref(), self.limit.as_deref())
    }

    pub fn filter_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.filters.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestParams
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map_err(|e| AppError::BadRequest(format!("invalid query string: {}", e)))?;
        Ok(RequestParams::from_pairs(pairs))
    }
}
