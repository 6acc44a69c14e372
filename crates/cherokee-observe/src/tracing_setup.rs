//! Tracing subscriber initialization with structured logging, a provider
//! error log, and optional OpenTelemetry trace export.
//!
//! # Usage
//!
//! ```no_run
//! use cherokee_observe::tracing_setup::{TracingOptions, init_tracing};
//!
//! // Console logging plus the ERROR-only file at logs/llm_errors.log.
//! // Keep the guard alive until exit so buffered lines reach the file.
//! let _guard = init_tracing(TracingOptions::default()).unwrap();
//! ```

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Where provider failures are appended by default.
pub const DEFAULT_ERROR_LOG: &str = "logs/llm_errors.log";

/// Stores the OTel tracer provider so it can be shut down cleanly on exit.
static TRACER_PROVIDER: OnceLock<SdkTracerProvider> = OnceLock::new();

#[derive(Debug, Clone)]
pub struct TracingOptions {
    /// Filter directive used when `RUST_LOG` is unset (e.g. "info", "debug").
    pub default_directive: String,
    /// Bridge spans to OpenTelemetry with a stdout exporter.
    pub otel: bool,
    /// File receiving ERROR-level events only. `None` disables it.
    pub error_log: Option<PathBuf>,
}

impl Default for TracingOptions {
    fn default() -> Self {
        Self {
            default_directive: "info".to_string(),
            otel: false,
            error_log: Some(PathBuf::from(DEFAULT_ERROR_LOG)),
        }
    }
}

/// Initialize the global tracing subscriber.
///
/// - Always installs a structured `fmt` layer on stderr with target
///   visibility and span close timing.
/// - When `error_log` is set, appends ERROR events (provider failures,
///   unknown providers) to that file without ANSI colors. Lines are handed
///   to a background writer thread; the returned [`WorkerGuard`] flushes it
///   on drop. If the file cannot be opened, a warning is logged and the
///   file layer is skipped.
/// - When `otel` is true, additionally bridges tracing spans to
///   OpenTelemetry using a stdout exporter.
/// - Respects `RUST_LOG`, falling back to `default_directive`.
///
/// # Errors
///
/// Returns an error if the global subscriber has already been set.
pub fn init_tracing(options: TracingOptions) -> Result<Option<WorkerGuard>, Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&options.default_directive))?;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_span_events(FmtSpan::CLOSE);

    let (error_writer, open_failure) = match options.error_log.as_deref().map(error_log_writer) {
        Some(Ok(writer)) => (Some(writer), None),
        Some(Err(err)) => (None, Some(err)),
        None => (None, None),
    };
    let (error_layer, guard) = match error_writer {
        Some((writer, guard)) => (
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_target(true)
                    .with_writer(writer)
                    .with_filter(LevelFilter::ERROR),
            ),
            Some(guard),
        ),
        None => (None, None),
    };

    let otel_layer = if options.otel {
        let provider = SdkTracerProvider::builder()
            .with_simple_exporter(opentelemetry_stdout::SpanExporter::default())
            .build();
        let tracer = provider.tracer("cherokee");

        // Store the provider for shutdown and register it globally.
        let _ = TRACER_PROVIDER.set(provider.clone());
        opentelemetry::global::set_tracer_provider(provider);

        Some(tracing_opentelemetry::layer().with_tracer(tracer))
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(error_layer)
        .with(otel_layer)
        .try_init()?;

    if let (Some(path), Some(err)) = (options.error_log.as_deref(), open_failure) {
        tracing::warn!(path = %path.display(), error = %err, "Error log unavailable, provider errors go to stderr only");
    }

    Ok(guard)
}

/// Open `path` and wrap it in a non-blocking writer.
pub fn error_log_writer(path: &Path) -> std::io::Result<(NonBlocking, WorkerGuard)> {
    Ok(tracing_appender::non_blocking(open_error_log(path)?))
}

/// Open `path` for appending, creating it and its parent directories.
pub fn open_error_log(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Flush pending traces and shut down the OpenTelemetry tracer provider.
///
/// Safe to call even when OTel was not enabled (no-op in that case).
pub fn shutdown_tracing() {
    if let Some(provider) = TRACER_PROVIDER.get() {
        if let Err(e) = provider.shutdown() {
            eprintln!("Warning: OTel tracer provider shutdown error: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_default_options_log_errors_to_file() {
        let options = TracingOptions::default();
        assert_eq!(options.default_directive, "info");
        assert!(!options.otel);
        assert_eq!(options.error_log, Some(PathBuf::from("logs/llm_errors.log")));
    }

    #[test]
    fn test_open_error_log_creates_parent_dirs_and_appends() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("logs").join("llm_errors.log");

        writeln!(open_error_log(&path).unwrap(), "first").unwrap();
        writeln!(open_error_log(&path).unwrap(), "second").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "first\nsecond\n");
    }

    #[test]
    fn test_error_log_writer_flushes_on_guard_drop() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("llm_errors.log");

        let (mut writer, guard) = error_log_writer(&path).unwrap();
        writer.write_all(b"provider failed\n").unwrap();
        drop(guard);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "provider failed\n");
    }

    #[test]
    fn test_error_log_writer_fails_when_parent_is_a_file() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("logs");
        std::fs::write(&blocker, "not a directory").unwrap();

        assert!(error_log_writer(&blocker.join("llm_errors.log")).is_err());
    }

    #[test]
    fn test_init_tracing_skips_unopenable_error_log() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("logs");
        std::fs::write(&blocker, "not a directory").unwrap();

        let guard = init_tracing(TracingOptions {
            default_directive: "warn".to_string(),
            otel: false,
            error_log: Some(blocker.join("llm_errors.log")),
        })
        .unwrap();
        assert!(guard.is_none());
    }

    #[test]
    fn test_shutdown_without_otel_is_noop() {
        shutdown_tracing();
    }
}
