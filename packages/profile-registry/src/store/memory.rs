//! In-process store for development and tests. Contents are lost on restart.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::ProfileStore;

#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn get(&self, id: &str) -> Result<Option<String>, crate::Error> {
        Ok(self.entries.read().await.get(id).cloned())
    }

    async fn put(&self, id: &str, value: String) -> Result<(), crate::Error> {
        self.entries.write().await.insert(id.to_string(), value);
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
