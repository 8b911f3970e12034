//! HTTP handlers for entity CRUD and admin operations.

pub mod admin;
pub mod entity;
