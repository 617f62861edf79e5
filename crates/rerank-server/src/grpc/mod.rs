//! gRPC binding (tonic) for `reranker.RerankerService`.
//!
//! This module is primarily used by the `rerank-grpc` binary.

pub mod conversions;
pub mod error;
pub mod service;


/// Generated protobuf types and service definitions.
pub mod proto {
    tonic::include_proto!("reranker");
}

use std::future::Future;

use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;

pub use error::ServiceError;
pub use proto::reranker_service_server::RerankerServiceServer;
pub use service::RerankerGrpcService;

use rerank::PairScorer;

/// Serves `service` over plaintext HTTP/2 on `listener` until `shutdown` resolves.
pub async fn serve<S, F>(
    listener: TcpListener,
    service: RerankerGrpcService<S>,
    shutdown: F,
) -> Result<(), tonic::transport::Error>
where
    S: PairScorer + 'static,
    F: Future<Output = ()> + Send,
{
    Server::builder()
        .add_service(RerankerServiceServer::new(service))
        .serve_with_incoming_shutdown(TcpListenerStream::new(listener), shutdown)
        .await
}
