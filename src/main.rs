//! Simscreen HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use simscreen::config::Config;
use simscreen::document::Document;
use simscreen::embedding::{EmbedderConfig, SemanticCapability};
use simscreen::engine::SimilarityEngine;
use simscreen::extract::ContentExtractor;
use simscreen::gateway::{HandlerState, create_router_with_state};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        "Simscreen starting"
    );

    let semantic = if config.stub_embedder {
        tracing::warn!("Running embedder in stub mode (SIMSCREEN_STUB_EMBEDDER set)");
        SemanticCapability::stub()
    } else if let Some(path) = &config.model_path {
        SemanticCapability::new(EmbedderConfig::new(path.clone()))
    } else {
        tracing::warn!("No SIMSCREEN_MODEL_PATH configured, running in lexical-only mode");
        SemanticCapability::unavailable()
    };

    let extractor = ContentExtractor::with_timeout(Duration::from_secs(config.fetch_timeout_secs))?;
    let engine = Arc::new(SimilarityEngine::new(Arc::new(semantic), extractor));

    let sample_corpus = load_sample_corpus(&config);
    if !sample_corpus.is_empty() {
        tracing::info!(size = sample_corpus.len(), "Loaded fallback corpus");
    }

    let state = HandlerState::new(engine, sample_corpus);
    let app = create_router_with_state(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Simscreen shutdown complete");
    Ok(())
}

fn load_sample_corpus(config: &Config) -> Vec<Document> {
    let Some(path) = &config.sample_data_path else {
        return Vec::new();
    };

    match std::fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(corpus) => corpus,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to parse sample data");
                Vec::new()
            }
        },
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to read sample data");
            Vec::new()
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
