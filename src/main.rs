// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;
#[cfg(test)]
mod test_utils;

use anyhow::Context;
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing::info;

use crate::application::sample_service::SampleService;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::dataset_loader::load_dataset;
use crate::infrastructure::logging::init_tracing;
use crate::infrastructure::memory_repository::InMemoryRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::router::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = load_app_config()?;

    // Load the dataset once; it is never written afterwards
    let dataset = load_dataset(&config.dataset).await?;
    let repository = Arc::new(InMemoryRepository::new(dataset));

    let sample_service = SampleService::new(repository);
    let state = Arc::new(AppState { sample_service });

    let router = build_router(state, &config.server.index_path);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| {
            format!(
                "Invalid listen address {}:{}",
                config.server.host, config.server.port
            )
        })?;
    info!("Starting belly-button-biodiversity service on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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

    info!("Signal received, starting graceful shutdown");
}
