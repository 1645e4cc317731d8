//! Redis-backed store. Keys are namespaced as `profile:{id}`.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tracing::info;

use super::ProfileStore;

const KEY_PREFIX: &str = "profile:";

fn storage_key(id: &str) -> String {
    format!("{KEY_PREFIX}{id}")
}

/// Redis store over a multiplexed, auto-reconnecting connection.
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    pub async fn connect(url: &str) -> Result<Self, crate::Error> {
        let client = redis::Client::open(url)
            .map_err(|e| crate::Error::Config(format!("Invalid store_url: {e}")))?;
        let conn = ConnectionManager::new(client)
            .await
            .map_err(|e| crate::Error::Config(format!("Redis connection failed: {e}")))?;
        info!("Connected to Redis profile store");
        Ok(Self { conn })
    }
}

#[async_trait]
impl ProfileStore for RedisStore {
    async fn get(&self, id: &str) -> Result<Option<String>, crate::Error> {
        let mut conn = self.conn.clone();
        conn.get::<_, Option<String>>(storage_key(id))
            .await
            .map_err(|e| crate::Error::Internal(format!("store read failed: {e}")))
    }

    async fn put(&self, id: &str, value: String) -> Result<(), crate::Error> {
        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(storage_key(id), value)
            .await
            .map_err(|e| crate::Error::Internal(format!("store write failed: {e}")))
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
