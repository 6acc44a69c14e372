//! Observability setup for Cherokee: structured logging, the provider error
//! log, and optional OpenTelemetry span export.

pub mod tracing_setup;
