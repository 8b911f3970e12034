//! Response envelopes.

use serde::Serialize;

/// `{ "data": ... }` for admin endpoints.
#[derive(Serialize)]
pub struct SuccessOne<T> {
    pub data: T,
}

/// List response: one page of rows plus totals for the whole filtered set.
#[derive(Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    #[serde(rename = "totalPages")]
    pub total_pages: u64,
}

pub fn success_one<T: Serialize>(data: T) -> SuccessOne<T> {
    SuccessOne { data }
}
