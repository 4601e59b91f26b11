use std::net::SocketAddr;

/// The search server error type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Cannot bind the listen address
    #[error("binding {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    /// Cannot start or keep running the HTTP server
    #[error("starting server: {0}")]
    Server(#[source] std::io::Error),
}
