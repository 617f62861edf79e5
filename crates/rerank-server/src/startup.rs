//! Process bootstrap shared by the `rerank-http` and `rerank-grpc` binaries.

use std::time::Duration;

use rerank::{Config, CrossEncoder, Reranker, RerankerError};
use tokio::signal;
use tracing_subscriber::EnvFilter;

const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(1);

/// Installs the global `tracing` subscriber. `RUST_LOG` overrides the `info` default.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Reads `RERANK_*` configuration and validates it.
pub fn load_config() -> anyhow::Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

/// Loads the cross-encoder named by `config`. Any failure is fatal to the caller.
pub fn load_reranker(config: &Config) -> Result<Reranker<CrossEncoder>, RerankerError> {
    let encoder = CrossEncoder::load(config.cross_encoder_config())?;
    Ok(Reranker::new(encoder))
}

/// Probes `GET /health` on the local HTTP service. Returns the process exit code.
pub async fn run_health_check(port: u16) -> i32 {
    let url = format!("http://127.0.0.1:{}/health", port);

    let client = match reqwest::Client::builder()
        .timeout(HEALTH_CHECK_TIMEOUT)
        .build()
    {
        Ok(client) => client,
        Err(_) => return 1,
    };

    match client.get(&url).send().await {
        Ok(res) if res.status().is_success() => 0,
        _ => 1,
    }
}

/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
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
