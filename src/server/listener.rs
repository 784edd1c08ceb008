use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{Instrument, debug, info, warn};

use crate::config::Config;
use crate::handlers::FileStore;
use crate::http::connection::Connection;
use crate::router::Router;

/// Pause after a failed accept so a persistent error (e.g. out of file
/// descriptors) does not turn the loop into a busy spin.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(50);

/// Binds the configured address and serves until the process ends.
///
/// Fails only if the socket cannot be bound.
pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.listen_addr))?;
    info!(addr = %cfg.listen_addr, "listening");

    let files = Arc::new(FileStore::new(cfg.directory.clone()));
    match files.base() {
        Some(dir) => info!(directory = %dir.display(), "serving files"),
        None => info!("no files directory configured, /files/ answers 404"),
    }

    serve(listener, Router::new(files), cfg.idle_timeout()).await
}

/// Accepts connections on an already bound listener, one task per
/// connection. Errors on one connection never reach the others.
pub async fn serve(
    listener: TcpListener,
    router: Router,
    idle_timeout: Duration,
) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!(error = %e, "accept failed");
                tokio::time::sleep(ACCEPT_BACKOFF).await;
                continue;
            }
        };
        debug!(%peer, "accepted connection");

        let router = router.clone();
        tokio::spawn(
            async move {
                let mut conn = Connection::new(socket, router, idle_timeout);
                if let Err(e) = conn.run().await {
                    warn!("connection terminated: {e:#}");
                }
            }
            .instrument(tracing::info_span!("conn", %peer)),
        );
    }
}
