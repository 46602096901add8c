// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use hello_pipeline::{app, logging, state::AppState};
use hello_pipeline_config::{AppConfig, Args, load_env_file};

#[cfg(not(target_os = "windows"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
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
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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

    tracing::info!("Shutdown signal received, draining connections");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse_args();
    let env_file_loaded = load_env_file(&args.env_file)?;

    let config = AppConfig::from_env()?;
    let _log_guard = logging::init_with_config(&config.log)?;

    if env_file_loaded {
        tracing::info!("Loaded environment from {}", args.env_file);
    }

    let bind_addr = format!("{}:{}", config.server.bind_host, config.server.port);
    let log_level = config.log.level.clone();
    let port = config.server.port;

    let state = AppState::new(config)?;
    let app = app::create_app(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Server running on port {}", port);
    tracing::info!("Listening on {}", listener.local_addr()?);
    tracing::info!("Log level: {}", log_level);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
