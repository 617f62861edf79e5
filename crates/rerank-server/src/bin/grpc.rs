//! gRPC rerank service entrypoint.

use mimalloc::MiMalloc;
use tokio::net::TcpListener;

use rerank_server::grpc::{RerankerGrpcService, serve};
use rerank_server::startup::{init_tracing, load_config, load_reranker, shutdown_signal};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = load_config()?;
    let addr = config.grpc_socket_addr();

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.grpc_port,
        workers = config.grpc_workers,
        model_path = %config.model_path.display(),
        "Rerank gRPC service starting"
    );

    let reranker = load_reranker(&config)?;
    let service = RerankerGrpcService::new(reranker, config.grpc_workers);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "gRPC server started");

    serve(listener, service, shutdown_signal()).await?;

    tracing::info!("Rerank gRPC service shutdown complete");
    Ok(())
}
