pub mod local;
pub mod memory;
pub mod remote;
pub mod traits;

pub use local::LocalStore;
pub use memory::MemoryStore;
pub use remote::RemoteStore;
pub use traits::{ListingStore, Mutation};

use thiserror::Error;

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored listings under '{key}' could not be parsed: {reason}")]
    Corrupt { key: String, reason: String },

    #[error("Remote document '{id}' is not a valid listing: {reason}")]
    Decode { id: String, reason: String },

    #[error("Listing '{0}' already exists")]
    DuplicateId(String),

    #[error("Failed to serialize listings: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Remote store request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Remote store returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Store configuration error: {0}")]
    Config(String),
}

impl StorageError {
    /// Errors the board recovers from by starting over with the default listings
    pub fn falls_back_to_defaults(&self) -> bool {
        matches!(self, StorageError::Corrupt { .. })
    }
}
