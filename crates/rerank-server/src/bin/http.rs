//! HTTP rerank service entrypoint.

use mimalloc::MiMalloc;
use tokio::net::TcpListener;

use rerank::Config;
use rerank_server::gateway::{HandlerState, create_router_with_state};
use rerank_server::startup::{
    init_tracing, load_config, load_reranker, run_health_check, shutdown_signal,
};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "--health-check") {
        let port = Config::from_env()
            .map(|config| config.http_port)
            .unwrap_or(rerank::constants::DEFAULT_HTTP_PORT);
        std::process::exit(run_health_check(port).await);
    }

    init_tracing();

    let config = load_config()?;
    let addr = config.http_socket_addr();

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.http_port,
        model_path = %config.model_path.display(),
        "Rerank HTTP service starting"
    );

    let reranker = load_reranker(&config)?;
    let app = create_router_with_state(HandlerState::new(reranker));

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Rerank HTTP service shutdown complete");
    Ok(())
}
