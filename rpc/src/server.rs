//! Axum-based RPC server.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use votechain_node::LedgerService;

use crate::error::RpcError;
use crate::handlers;

/// Build the API router over a shared ledger service.
pub fn router(service: Arc<LedgerService>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/chain", get(handlers::chain))
        .route("/chain/validate", get(handlers::validate_chain))
        .route("/mine", get(handlers::mine).post(handlers::mine))
        .route("/transactions/new", post(handlers::submit_vote))
        .route("/transactions/pending", get(handlers::pending_votes))
        .route("/election/status", get(handlers::election_status))
        .route("/election/results", get(handlers::election_results))
        .route("/voters/register", post(handlers::register_voter))
        .route("/register", post(handlers::register_voter))
        .route("/candidates/register", post(handlers::register_candidate))
        .fallback(handlers::not_found)
        .with_state(service)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

pub struct RpcServer {
    addr: SocketAddr,
    service: Arc<LedgerService>,
}

impl RpcServer {
    pub fn new(addr: SocketAddr, service: Arc<LedgerService>) -> Self {
        Self { addr, service }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Serve until `shutdown` resolves, then drain in-flight requests.
    pub async fn start<F>(self, shutdown: F) -> Result<(), RpcError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = tokio::net::TcpListener::bind(self.addr)
            .await
            .map_err(|e| RpcError::Server(format!("bind {}: {e}", self.addr)))?;
        tracing::info!(addr = %self.addr, "RPC server listening");

        axum::serve(listener, router(self.service))
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| RpcError::Server(e.to_string()))?;

        tracing::info!("RPC server stopped");
        Ok(())
    }
}
