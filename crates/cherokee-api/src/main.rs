//! Cherokee CLI and REST API entry point.
//!
//! Binary name: `cherokee`
//!
//! Parses CLI arguments, loads provider configuration, then dispatches to the
//! requested command or starts the REST API server.

mod cli;
mod history;
mod http;
mod state;

use std::path::PathBuf;

use clap::Parser;
use clap_complete::generate;

use cherokee_observe::tracing_setup::{
    DEFAULT_ERROR_LOG, TracingOptions, init_tracing, shutdown_tracing,
};

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need logging or app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "cherokee", &mut std::io::stdout());
        return Ok(());
    }

    // Held until exit so the error log's background writer flushes
    let _error_log_guard = match init_tracing(TracingOptions {
        default_directive: cli.log_directive().to_string(),
        otel: cli.otel,
        error_log: Some(PathBuf::from(DEFAULT_ERROR_LOG)),
    }) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Warning: failed to initialize tracing: {e}");
            None
        }
    };

    let state = AppState::init(cli.config.as_deref()).await;
    let result = run(cli.command, state, cli.json).await;

    shutdown_tracing();
    result
}

async fn run(command: Commands, state: AppState, json: bool) -> anyhow::Result<()> {
    match command {
        Commands::Serve { port, host } => {
            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            println!(
                "  {} Cherokee API listening on {}",
                console::style("⚡").bold(),
                console::style(format!("http://{addr}")).cyan()
            );
            println!("  {}", console::style("Press Ctrl+C to stop").dim());

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            println!("\n  Server stopped.");
        }

        Commands::Generate {
            prompt,
            providers,
            settings,
        } => {
            cli::generate::generate(&state, &prompt, providers, settings.as_deref(), json).await?;
        }

        Commands::Providers => {
            cli::providers::list_providers(&state, json)?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
