use std::future::Future;
use std::sync::Arc;

use tokio::net::TcpListener;

use grove_ledger::{InMemoryLedger, Ledger};

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::handler::AppState;
use crate::hooks::{ConfirmHook, NoOpHook, SimulatedPartnerHook};
use crate::router::build_router;

/// Grove HTTP server.
pub struct GroveServer {
    config: ServerConfig,
    state: AppState,
}

impl GroveServer {
    /// Validate `config` and build a server around a fresh in-memory ledger.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        config.validate()?;
        let ledger = Arc::new(InMemoryLedger::new(config.ledger.clone()));
        let hook: Arc<dyn ConfirmHook> = match config.settle_delay() {
            Some(delay) => Arc::new(SimulatedPartnerHook::new(delay)),
            None => Arc::new(NoOpHook),
        };
        Ok(Self {
            config,
            state: AppState { ledger, hook },
        })
    }

    pub fn with_ledger(mut self, ledger: Arc<dyn Ledger>) -> Self {
        self.state.ledger = ledger;
        self
    }

    pub fn with_hook(mut self, hook: Arc<dyn ConfirmHook>) -> Self {
        self.state.hook = hook;
        self
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn ledger(&self) -> Arc<dyn Ledger> {
        Arc::clone(&self.state.ledger)
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.state.clone())
    }

    /// Serve until Ctrl-C or SIGTERM.
    pub async fn serve(self) -> ServerResult<()> {
        self.serve_with_shutdown(shutdown_signal()).await
    }

    /// Serve until `signal` resolves, then drain in-flight requests.
    pub async fn serve_with_shutdown<F>(self, signal: F) -> ServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.router();
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!("Grove server listening on {}", listener.local_addr()?);
        axum::serve(listener, app)
            .with_graceful_shutdown(signal)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?;
        tracing::info!("Grove server stopped");
        Ok(())
    }
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
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
    tracing::info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use grove_ledger::{LedgerConfig, LedgerReader};
    use std::net::SocketAddr;

    #[test]
    fn server_construction() {
        let server = GroveServer::new(ServerConfig::default()).unwrap();
        assert_eq!(server.config().bind_addr, "127.0.0.1:8787".parse().unwrap());
        assert_eq!(server.ledger().intent_count().unwrap(), 0);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = ServerConfig {
            ledger: LedgerConfig {
                jitter: f64::NAN,
                ..LedgerConfig::default()
            },
            ..ServerConfig::default()
        };
        assert!(matches!(
            GroveServer::new(config),
            Err(ServerError::Ledger(_))
        ));
    }

    #[test]
    fn router_builds() {
        let server = GroveServer::new(ServerConfig::default()).unwrap();
        let _router = server.router();
    }

    #[tokio::test]
    async fn serve_stops_on_shutdown_signal() {
        let config = ServerConfig {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            ..ServerConfig::default()
        };
        let server = GroveServer::new(config).unwrap();
        server.serve_with_shutdown(async {}).await.unwrap();
    }
}
