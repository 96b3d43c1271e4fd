use crate::models::House;
use crate::storage::traits::{ListingStore, Mutation};
use crate::storage::StorageResult;
use async_trait::async_trait;
use tokio::sync::Mutex;

/// In-process store, used for dry runs and tests
#[derive(Default)]
pub struct MemoryStore {
    saved: Mutex<Option<Vec<House>>>,
    writes: Mutex<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an already saved collection
    pub fn with_houses(houses: Vec<House>) -> Self {
        Self {
            saved: Mutex::new(Some(houses)),
            writes: Mutex::new(0),
        }
    }

    pub async fn snapshot(&self) -> Option<Vec<House>> {
        self.saved.lock().await.clone()
    }

    /// Number of persist calls received
    pub async fn writes(&self) -> usize {
        *self.writes.lock().await
    }
}

#[async_trait]
impl ListingStore for MemoryStore {
    async fn load(&self) -> StorageResult<Option<Vec<House>>> {
        Ok(self.saved.lock().await.clone())
    }

    async fn persist(
        &self,
        _mutation: Mutation<'_>,
        snapshot: &[House],
    ) -> StorageResult<Option<String>> {
        *self.saved.lock().await = Some(snapshot.to_vec());
        *self.writes.lock().await += 1;
        Ok(None)
    }

    fn store_type(&self) -> &'static str {
        "memory"
    }
}
