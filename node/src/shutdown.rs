//! Graceful shutdown controller for the VoteChain node.
//!
//! Listens for SIGINT/SIGTERM and broadcasts a shutdown signal to all
//! subsystems via a `tokio::sync::broadcast` channel. An in-flight proof
//! search is cancelled as soon as the signal fires, so the HTTP server's
//! drain does not wait on it.

use std::future::Future;
use std::sync::Arc;

use tokio::signal;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::LedgerService;

/// Coordinates graceful shutdown across all node subsystems.
///
/// Subsystems call [`subscribe`](Self::subscribe) to get a receiver, then
/// `select!` on it alongside their main loop. When shutdown is triggered
/// (either by OS signal or programmatically), every receiver is notified.
pub struct ShutdownController {
    tx: broadcast::Sender<()>,
}

impl ShutdownController {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Get a receiver that will be notified on shutdown.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Trigger shutdown programmatically.
    pub fn shutdown(&self) {
        let _ = self.tx.send(());
    }

    /// Wait for SIGTERM or SIGINT, then trigger shutdown.
    pub async fn wait_for_signal(&self) {
        let ctrl_c = signal::ctrl_c();

        #[cfg(unix)]
        let terminate = async {
            match signal::unix::signal(signal::unix::SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    sigterm.recv().await;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "failed to install SIGTERM handler");
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => { tracing::info!("received SIGINT, shutting down"); }
            _ = terminate => { tracing::info!("received SIGTERM, shutting down"); }
        }

        self.shutdown();
    }
}

impl ShutdownController {
    /// Resolves once shutdown is triggered. Suitable for
    /// `axum::serve(..).with_graceful_shutdown(..)`.
    pub fn signalled(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut rx = self.subscribe();
        async move {
            let _ = rx.recv().await;
        }
    }

    /// Cancel `service`'s mining when shutdown is triggered.
    pub fn cancel_mining_on_shutdown(&self, service: Arc<LedgerService>) -> JoinHandle<()> {
        let signalled = self.signalled();
        tokio::spawn(async move {
            signalled.await;
            service.cancel_mining();
            tracing::info!(mining = service.is_mining(), "mining cancelled for shutdown");
        })
    }
}

impl Default for ShutdownController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn programmatic_shutdown_notifies_subscribers() {
        let controller = ShutdownController::new();
        let mut rx = controller.subscribe();
        controller.shutdown();
        assert!(rx.recv().await.is_ok());
    }

    #[tokio::test]
    async fn shutdown_cancels_mining() {
        use votechain_nullables::{NullClock, NullStore};
        use votechain_types::LedgerParams;

        use crate::{ElectionPolicy, MineError, Roster};

        let store = Arc::new(NullStore::new());
        let roster = Arc::new(Roster::load(store.clone()).unwrap());
        let service = Arc::new(
            LedgerService::open(
                LedgerParams::new(1),
                ElectionPolicy::default(),
                store,
                roster,
                Arc::new(NullClock::new(1)),
            )
            .unwrap(),
        );

        let controller = ShutdownController::new();
        let hook = controller.cancel_mining_on_shutdown(Arc::clone(&service));
        let server_stop = controller.signalled();
        controller.shutdown();

        hook.await.unwrap();
        server_stop.await;
        assert!(matches!(service.mine_block().await, Err(MineError::Cancelled)));
    }

    #[tokio::test]
    async fn multiple_subscribers_all_notified() {
        let controller = ShutdownController::new();
        let mut rx1 = controller.subscribe();
        let mut rx2 = controller.subscribe();
        controller.shutdown();
        assert!(rx1.recv().await.is_ok());
        assert!(rx2.recv().await.is_ok());
    }
}
