use crate::models::House;
use async_trait::async_trait;

use super::StorageResult;

/// A single change to the collection, handed to the store after the board
/// has applied it
#[derive(Debug, Clone, Copy)]
pub enum Mutation<'a> {
    Created(&'a House),
    Updated(&'a House),
    Removed(&'a str),
}

impl Mutation<'_> {
    pub fn id(&self) -> &str {
        match self {
            Mutation::Created(h) | Mutation::Updated(h) => &h.id,
            Mutation::Removed(id) => id,
        }
    }
}

/// Common trait for all listing stores
/// Blob stores rewrite the snapshot, document stores apply the mutation per record
#[async_trait]
pub trait ListingStore: Send + Sync {
    /// Load the full collection, `None` when nothing was ever saved
    async fn load(&self) -> StorageResult<Option<Vec<House>>>;

    /// Persist one mutation. `snapshot` is the collection after the change.
    /// Returns the identity the store assigned to a created listing, if any.
    async fn persist(
        &self,
        mutation: Mutation<'_>,
        snapshot: &[House],
    ) -> StorageResult<Option<String>>;

    /// Get the name of the store backend
    fn store_type(&self) -> &'static str;
}
