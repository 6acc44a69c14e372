//! REST API request handlers.

pub mod llm;
