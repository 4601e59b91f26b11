//! GraphQL server exposing `search(filter: SearchFilterInput!)` over the demo
//! catalog.

#![cfg_attr(test, allow(unused_crate_dependencies))]

mod error;
mod router;
mod schema;

use std::net::SocketAddr;

pub use error::Error;
pub use oneof_config::SchemaMode;
pub use router::router;
pub use schema::{build_schema, LooseSearchFilterInput, Schema, SearchFilterInput, SearchSchema};

use oneof_config::Config;
use oneof_search::Catalog;
use tokio::{net::TcpListener, signal, sync::oneshot};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Start parameters for the server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The GraphQL endpoint listen address.
    pub listen_addr: SocketAddr,
    /// The GraphQL endpoint path.
    pub path: String,
    /// Whether the filter is a one-of input object.
    pub mode: SchemaMode,
    /// Whether introspection queries are answered.
    pub introspection: bool,
}

impl ServerConfig {
    /// Server parameters from the configuration file, with an optional listen
    /// address taking precedence.
    pub fn from_config(config: &Config, listen_addr: Option<SocketAddr>) -> Self {
        Self {
            listen_addr: listen_addr.unwrap_or_else(|| config.network.listen_address()),
            path: config.graph.path().to_string(),
            mode: config.graph.mode,
            introspection: config.graph.introspection,
        }
    }
}

/// Serves the schema until ctrl-c or SIGTERM.
pub async fn serve(config: ServerConfig) -> crate::Result<()> {
    let listener = bind(config.listen_addr).await?;
    let app = router(build_schema(config.mode, config.introspection, Catalog::seeded()), &config.path);

    tracing::info!(mode = ?config.mode, "GraphQL endpoint exposed at http://{}{}", config.listen_addr, config.path);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(Error::Server)?;

    Ok(())
}

/// A server running in the background, stopped when dropped.
pub struct SearchServer {
    addr: SocketAddr,
    path: String,
    shutdown: Option<oneshot::Sender<()>>,
}

impl Drop for SearchServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            shutdown.send(()).ok();
        }
    }
}

impl SearchServer {
    /// Binds the listener and spawns the server on the current runtime. Use
    /// port 0 to pick a free port.
    pub async fn start(config: ServerConfig) -> crate::Result<Self> {
        let listener = bind(config.listen_addr).await?;
        let addr = listener.local_addr().map_err(Error::Server)?;
        let app = router(build_schema(config.mode, config.introspection, Catalog::seeded()), &config.path);

        let (shutdown_sender, shutdown_receiver) = oneshot::channel::<()>();

        tokio::spawn(async move {
            let result = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_receiver.await.ok();
                })
                .await;

            if let Err(err) = result {
                tracing::error!("search server stopped: {err}");
            }
        });

        Ok(SearchServer {
            addr,
            path: config.path,
            shutdown: Some(shutdown_sender),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn url(&self) -> String {
        format!("http://{}{}", self.addr, self.path)
    }
}

async fn bind(addr: SocketAddr) -> crate::Result<TcpListener> {
    TcpListener::bind(addr).await.map_err(|source| Error::Bind { addr, source })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.ok();
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::warn!("cannot listen for SIGTERM: {err}");
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

    tracing::info!("Shutting down gracefully...");
}
