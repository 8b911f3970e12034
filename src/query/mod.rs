//! Request-time query augmentation: filters, pagination and relations.

pub mod filters;
pub mod relation;

pub use filters::{apply_filters, FilterOp, FilterSet, Pagination, Predicate};
pub use relation::{resolve as resolve_relation, resolve_all as resolve_includes, Include, RelationKind};
