//! Key-value persistence for serialized profiles.
//!
//! Keys are opaque profile ids; values are JSON-serialized [`Profile`]s.
//! Backends provide their own consistency; writes are last-writer-wins.

mod memory;
mod redis_store;

pub use self::memory::MemoryStore;
pub use self::redis_store::RedisStore;

use async_trait::async_trait;
use profile_types::Profile;

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get(&self, id: &str) -> Result<Option<String>, crate::Error>;

    async fn put(&self, id: &str, value: String) -> Result<(), crate::Error>;

    /// Backend name for `/health`.
    fn backend(&self) -> &'static str;
}

/// Read and decode a profile. `Ok(None)` when the id is unknown.
pub async fn load_profile(
    store: &dyn ProfileStore,
    id: &str,
) -> Result<Option<Profile>, crate::Error> {
    match store.get(id).await? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

pub async fn save_profile(store: &dyn ProfileStore, profile: &Profile) -> Result<(), crate::Error> {
    let raw = serde_json::to_string(profile)?;
    store.put(&profile.id, raw).await
}

/// Redis when `store_url` is set, otherwise in-process memory.
pub async fn connect(
    store_url: Option<&str>,
) -> Result<std::sync::Arc<dyn ProfileStore>, crate::Error> {
    match store_url {
        Some(url) if !url.is_empty() => Ok(std::sync::Arc::new(RedisStore::connect(url).await?)),
        _ => Ok(std::sync::Arc::new(MemoryStore::new())),
    }
}
