//! File-backed key-value store holding the whole board as one JSON blob.

use crate::models::House;
use crate::storage::traits::{ListingStore, Mutation};
use crate::storage::{StorageError, StorageResult};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Key the board is stored under unless configured otherwise
pub const DEFAULT_KEY: &str = "houses-data";

pub struct LocalStore {
    dir: PathBuf,
    key: String,
}

impl LocalStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_key(dir, DEFAULT_KEY)
    }

    pub fn with_key(dir: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// File holding the value for this store's key
    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", self.key))
    }

    /// Overwrite the stored blob with the given collection
    pub async fn save(&self, houses: &[House]) -> StorageResult<()> {
        let json = serde_json::to_string_pretty(houses)?;
        tokio::fs::create_dir_all(&self.dir).await?;
        atomic_write(&self.path(), &json).await?;
        debug!("Saved {} listings to {}", houses.len(), self.path().display());
        Ok(())
    }
}

/// Write to a sibling temp file, then rename over the target
async fn atomic_write(path: &Path, content: &str) -> std::io::Result<()> {
    let tmp_path = path.with_extension("json.tmp");
    tokio::fs::write(&tmp_path, content).await?;
    tokio::fs::rename(&tmp_path, path).await
}

#[async_trait]
impl ListingStore for LocalStore {
    async fn load(&self) -> StorageResult<Option<Vec<House>>> {
        let path = self.path();
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No saved board at {}", path.display());
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let houses: Vec<House> =
            serde_json::from_str(&raw).map_err(|e| StorageError::Corrupt {
                key: self.key.clone(),
                reason: e.to_string(),
            })?;

        debug!("Loaded {} listings from {}", houses.len(), path.display());
        Ok(Some(houses))
    }

    async fn persist(
        &self,
        _mutation: Mutation<'_>,
        snapshot: &[House],
    ) -> StorageResult<Option<String>> {
        self.save(snapshot).await?;
        Ok(None)
    }

    fn store_type(&self) -> &'static str {
        "local"
    }
}
