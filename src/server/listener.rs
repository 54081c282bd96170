use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing::info;

use crate::app::{self, FsResourceLoader, InMemoryUserRepository};
use crate::config::Config;
use crate::http::connection::Connection;
use crate::http::parser::Limits;
use crate::routing::Router;
use crate::session::SessionStore;

/// Pause after a failed accept. EMFILE and friends persist until a
/// descriptor is released, so retrying immediately only spins.
pub const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// A bound listener plus everything connections share.
pub struct Server {
    listener: TcpListener,
    router: Arc<Router>,
    limits: Limits,
}

impl Server {
    pub async fn bind(addr: &str, router: Router, limits: Limits) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        info!("Listening on {}", listener.local_addr()?);

        Ok(Self {
            listener,
            router: Arc::new(router),
            limits,
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts connections forever, one task per connection.
    pub async fn run(self) -> anyhow::Result<()> {
        loop {
            let listener = &self.listener;
            let (socket, peer) = next_connection(move || listener.accept()).await;
            info!("Accepted connection from {}", peer);

            let router = Arc::clone(&self.router);
            let limits = self.limits;
            tokio::spawn(async move {
                let conn = Connection::with_limits(socket, router, limits);
                if let Err(e) = conn.run().await {
                    tracing::error!("Connection error from {}: {}", peer, e);
                }
            });
        }
    }
}

/// Retries `accept` until it yields a connection, sleeping `ACCEPT_BACKOFF`
/// after every failure.
pub async fn next_connection<F, Fut, T>(mut accept: F) -> T
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::io::Result<T>>,
{
    loop {
        match accept().await {
            Ok(accepted) => return accepted,
            Err(e) => {
                tracing::error!("Accept failed: {}", e);
                tokio::time::sleep(ACCEPT_BACKOFF).await;
            }
        }
    }
}

/// Builds the demo application from `cfg` and serves it.
pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let sessions = SessionStore::new();
    let users = Arc::new(InMemoryUserRepository::with_users(cfg.users.clone()));
    let resources = Arc::new(FsResourceLoader::new(&cfg.static_root));
    let router = app::router(sessions, users, resources);

    Server::bind(&cfg.listen_addr, router, cfg.limits())
        .await?
        .run()
        .await
}
