//! Test server harness.
//!
//! Spawns the real HTTP router or gRPC server on an ephemeral localhost port with a
//! [`MockScorer`] in place of the cross-encoder, so no model artifacts are needed.

use rerank::{MockScorer, Reranker};
use rerank_server::gateway::{HandlerState, create_router_with_state};
use rerank_server::grpc::{self, RerankerGrpcService};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

const STARTUP_WAIT_TIMEOUT_SECS: u64 = 5;
const STARTUP_POLL_INTERVAL_MS: u64 = 50;

pub struct TestServer {
    pub addr: SocketAddr,
    server_handle: Option<JoinHandle<()>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.server_handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServerStartupError {
    #[error("Server failed to start within timeout")]
    Timeout,
    #[error("Failed to bind to address: {0}")]
    BindError(#[from] std::io::Error),
}

pub async fn wait_for_server_ready(
    addr: SocketAddr,
    timeout: Duration,
    interval: Duration,
) -> Result<(), ServerStartupError> {
    let start = std::time::Instant::now();

    loop {
        if start.elapsed() > timeout {
            return Err(ServerStartupError::Timeout);
        }

        match tokio::net::TcpStream::connect(addr).await {
            Ok(_) => return Ok(()),
            Err(_) => {
                tokio::time::sleep(interval).await;
            }
        }
    }
}

async fn bind_local() -> Result<(TcpListener, SocketAddr), ServerStartupError> {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
    let addr = listener.local_addr()?;
    Ok((listener, addr))
}

async fn finish_startup(
    addr: SocketAddr,
    server_handle: JoinHandle<()>,
    shutdown_tx: oneshot::Sender<()>,
) -> Result<TestServer, ServerStartupError> {
    wait_for_server_ready(
        addr,
        Duration::from_secs(STARTUP_WAIT_TIMEOUT_SECS),
        Duration::from_millis(STARTUP_POLL_INTERVAL_MS),
    )
    .await?;

    Ok(TestServer {
        addr,
        server_handle: Some(server_handle),
        shutdown_tx: Some(shutdown_tx),
    })
}

/// Spawns the HTTP service backed by `scorer`.
pub async fn spawn_http_server(scorer: MockScorer) -> Result<TestServer, ServerStartupError> {
    let (listener, addr) = bind_local().await?;

    let state = HandlerState::new(Reranker::new(scorer));
    let app = create_router_with_state(state);

    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .unwrap();
    });

    finish_startup(addr, server_handle, shutdown_tx).await
}

/// Spawns the gRPC service backed by `scorer` with `workers` inference slots.
pub async fn spawn_grpc_server(
    scorer: MockScorer,
    workers: usize,
) -> Result<TestServer, ServerStartupError> {
    let (listener, addr) = bind_local().await?;

    let service = RerankerGrpcService::new(Reranker::new(scorer), workers);

    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let server_handle = tokio::spawn(async move {
        grpc::serve(listener, service, async {
            let _ = shutdown_rx.await;
        })
        .await
        .unwrap();
    });

    finish_startup(addr, server_handle, shutdown_tx).await
}
