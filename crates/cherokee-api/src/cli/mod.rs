//! CLI command definitions for the `cherokee` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod generate;
pub mod providers;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Generate trading code through a chain of LLM providers.
#[derive(Parser)]
#[command(name = "cherokee", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the config file (default: $CHEROKEE_CONFIG, then ./cherokee.toml).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Log errors only (overridden by -v).
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export spans to stdout via OpenTelemetry.
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Log filter directive used when `RUST_LOG` is unset.
    pub fn log_directive(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "warn",
            1 => "info,cherokee=debug",
            _ => "trace",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Port to listen on.
        #[arg(short, long, default_value = "5000")]
        port: u16,

        /// Host to bind to.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// Run one prompt through the fallback chain and print the result.
    #[command(alias = "gen")]
    Generate {
        /// Prompt sent to the providers.
        prompt: String,

        /// Provider to try, in order. Repeat for a custom chain; omit for the default order.
        #[arg(short = 'p', long = "provider", value_name = "ID")]
        providers: Vec<String>,

        /// Generation settings as a JSON object (e.g. '{"temperature": 0.5}').
        #[arg(long, value_name = "JSON")]
        settings: Option<String>,
    },

    /// List configured providers and the default fallback order.
    Providers,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
