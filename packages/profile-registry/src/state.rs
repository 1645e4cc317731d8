//! Application state shared across handlers.

use crate::config::Config;
use crate::rpc::RpcClient;
use crate::store::{self, ProfileStore};
use profile_auth::ManagerReader;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Shared application state. Immutable apart from counters.
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn ProfileStore>,
    pub managers: Arc<dyn ManagerReader>,
    pub start_time: Instant,
    pub request_count: AtomicU64,
}

impl AppState {
    /// Connect the configured store and RPC endpoint.
    pub async fn new(config: Config) -> Result<Self, crate::Error> {
        let store = store::connect(config.store_url.as_deref()).await?;
        let rpc = RpcClient::new(&config.rpc_url, config.rpc_timeout())?;
        info!(store = store.backend(), rpc = %config.rpc_url, "Collaborators ready");
        Ok(Self::with_parts(config, store, Arc::new(rpc)))
    }

    /// Assemble state from explicit collaborators.
    pub fn with_parts(
        config: Config,
        store: Arc<dyn ProfileStore>,
        managers: Arc<dyn ManagerReader>,
    ) -> Self {
        Self {
            config,
            store,
            managers,
            start_time: Instant::now(),
            request_count: AtomicU64::new(0),
        }
    }
}
