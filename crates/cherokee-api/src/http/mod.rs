//! HTTP/REST API layer for Cherokee.
//!
//! Axum-based JSON API under `/api/llm/` with permissive CORS.

pub mod error;
pub mod handlers;
pub mod router;
