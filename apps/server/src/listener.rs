//! Accept loop and live-connection registry.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::main_lib::AppState;
use crate::worker;

/// Accepts connections forever, spawning one worker task per peer.
///
/// The registry tracks live connections by a monotonically increasing id;
/// each entry is inserted before the worker task is spawned so a worker
/// that exits immediately still finds its own entry to remove.
pub async fn serve(listener: TcpListener, state: AppState, idle_timeout: Duration) {
    let registry: Arc<DashMap<u64, SocketAddr>> = Arc::new(DashMap::new());
    let next_id = AtomicU64::new(0);

    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!("Failed to accept connection: {}", e);
                continue;
            }
        };

        let id = next_id.fetch_add(1, Ordering::Relaxed);
        registry.insert(id, peer);
        info!(
            "Connection {} from {} opened ({} active)",
            id,
            peer,
            registry.len()
        );

        let state = state.clone();
        let registry = Arc::clone(&registry);
        tokio::spawn(async move {
            worker::run(stream, peer, state, idle_timeout).await;
            registry.remove(&id);
            info!(
                "Connection {} from {} closed ({} active)",
                id,
                peer,
                registry.len()
            );
        });
    }
}
