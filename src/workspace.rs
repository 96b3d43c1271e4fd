//! A board bound to the store it saves to.
//!
//! Each mutation is applied to the in-memory board first and then written to
//! the store. The write is awaited and its result handed back, so a failed save
//! is visible to the caller; the board keeps the change either way.

use crate::board::{Board, ListingForm};
use crate::generator::{
    DescriptionGenerator, DescriptionRequest, GeneratedDescription, GenerationError,
};
use crate::models::{initial_houses, House, MediaItem, Status};
use crate::storage::{ListingStore, Mutation, StorageError, StorageResult};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum DescribeError {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub struct Workspace<S: ListingStore> {
    board: Board,
    store: S,
}

impl<S: ListingStore> Workspace<S> {
    /// Load the saved board, falling back to the default listings when none
    /// exists or the saved one is unreadable
    pub async fn open(store: S) -> StorageResult<Self> {
        let houses = match store.load().await {
            Ok(Some(houses)) => {
                info!("Loaded {} listings from {} store", houses.len(), store.store_type());
                houses
            }
            Ok(None) => {
                info!("No saved listings, starting from defaults");
                initial_houses()
            }
            Err(e) if e.falls_back_to_defaults() => {
                warn!("Failed to load saved listings, using defaults: {}", e);
                initial_houses()
            }
            Err(e) => return Err(e),
        };

        Ok(Self {
            board: Board::new(houses),
            store,
        })
    }

    /// Wrap an existing board without loading anything
    pub fn with_board(board: Board, store: S) -> Self {
        Self { board, store }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.board.set_query(query);
    }

    /// Add a listing built from the form; returns its final id
    pub async fn add_from_form(&mut self, form: ListingForm) -> StorageResult<String> {
        self.add(form.into_house()).await
    }

    /// Add a listing at the front of the board; returns its final id, which
    /// differs from the given one when the store assigns identity.
    /// An id already on the board is rejected before anything is written.
    pub async fn add(&mut self, house: House) -> StorageResult<String> {
        let id = house.id.clone();
        if !self.board.add(house.clone()) {
            return Err(StorageError::DuplicateId(id));
        }

        let assigned = self
            .store
            .persist(Mutation::Created(&house), self.board.houses())
            .await?;

        match assigned {
            Some(new_id) if new_id != id => {
                if !self.board.rekey(&id, &new_id) {
                    warn!("Store assigned id {} which is already on the board", new_id);
                    return Err(StorageError::DuplicateId(new_id));
                }
                Ok(new_id)
            }
            _ => Ok(id),
        }
    }

    /// Replace a listing by id; `Ok(false)` when it does not exist
    pub async fn update(&mut self, house: House) -> StorageResult<bool> {
        if !self.board.update(house.clone()) {
            return Ok(false);
        }
        self.store
            .persist(Mutation::Updated(&house), self.board.houses())
            .await?;
        Ok(true)
    }

    pub async fn move_house(&mut self, id: &str, status: Status) -> StorageResult<bool> {
        if !self.board.move_house(id, status) {
            return Ok(false);
        }
        self.persist_updated(id).await?;
        Ok(true)
    }

    /// Finish a drag on the given column and save the move
    pub async fn drop_on(&mut self, status: Status) -> StorageResult<Option<String>> {
        let Some(id) = self.board.drop_on(status) else {
            return Ok(None);
        };
        self.persist_updated(&id).await?;
        Ok(Some(id))
    }

    pub fn begin_drag(&mut self, id: &str) -> bool {
        self.board.begin_drag(id)
    }

    pub async fn remove(&mut self, id: &str) -> StorageResult<Option<House>> {
        let Some(removed) = self.board.remove(id) else {
            return Ok(None);
        };
        self.store
            .persist(Mutation::Removed(id), self.board.houses())
            .await?;
        Ok(Some(removed))
    }

    pub async fn add_media(
        &mut self,
        id: &str,
        items: Vec<MediaItem>,
    ) -> StorageResult<Option<House>> {
        let Some(house) = self.board.add_media(id, items) else {
            return Ok(None);
        };
        self.store
            .persist(Mutation::Updated(&house), self.board.houses())
            .await?;
        Ok(Some(house))
    }

    pub async fn remove_media(
        &mut self,
        id: &str,
        media_id: &str,
    ) -> StorageResult<Option<House>> {
        let Some(house) = self.board.remove_media(id, media_id) else {
            return Ok(None);
        };
        self.store
            .persist(Mutation::Updated(&house), self.board.houses())
            .await?;
        Ok(Some(house))
    }

    /// Generate copy for a listing and keep it as its description.
    /// Nothing changes unless generation succeeds; `Ok(None)` when the id is
    /// not on the board.
    pub async fn save_generated_description(
        &mut self,
        id: &str,
        generator: &impl DescriptionGenerator,
    ) -> Result<Option<GeneratedDescription>, DescribeError> {
        let Some(mut house) = self.board.get(id).cloned() else {
            return Ok(None);
        };
        let request =
            DescriptionRequest::new(house.name.clone(), house.feature_text(), house.price.clone())?;
        let generated = generator.generate(&request).await?;

        house.description = generated.text.clone();
        self.update(house).await?;
        info!("Saved {} description for {}", generated.model, id);
        Ok(Some(generated))
    }

    async fn persist_updated(&self, id: &str) -> StorageResult<()> {
        if let Some(house) = self.board.get(id) {
            self.store
                .persist(Mutation::Updated(house), self.board.houses())
                .await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::GeminiGenerator;
    use crate::storage::MemoryStore;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_open_empty_store_uses_defaults() {
        let workspace = Workspace::open(MemoryStore::new()).await.unwrap();
        assert_eq!(workspace.board().houses(), initial_houses().as_slice());
    }

    #[tokio::test]
    async fn test_every_mutation_is_saved() {
        let mut workspace = Workspace::open(MemoryStore::with_houses(initial_houses()))
            .await
            .unwrap();

        workspace.move_house("1", Status::Sold).await.unwrap();
        let id = workspace
            .add_from_form(ListingForm {
                name: "Studio".to_string(),
                price: "R$ 300.000".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        workspace.remove("2").await.unwrap();

        let saved = workspace.store().snapshot().await.unwrap();
        assert_eq!(saved, workspace.board().houses());
        assert_eq!(saved[0].id, id);
        assert_eq!(workspace.store().writes().await, 3);
    }

    #[tokio::test]
    async fn test_missing_ids_skip_the_store() {
        let mut workspace = Workspace::open(MemoryStore::new()).await.unwrap();

        assert!(!workspace.move_house("nope", Status::Sold).await.unwrap());
        assert!(workspace.remove("nope").await.unwrap().is_none());
        assert!(workspace.add_media("nope", vec![]).await.unwrap().is_none());
        assert_eq!(workspace.drop_on(Status::Sold).await.unwrap(), None);

        assert_eq!(workspace.store().writes().await, 0);
    }

    #[tokio::test]
    async fn test_add_with_existing_id_is_rejected() {
        let mut workspace = Workspace::open(MemoryStore::new()).await.unwrap();
        let duplicate = workspace.board().get("1").unwrap().clone();

        let err = workspace.add(duplicate).await.unwrap_err();

        assert!(matches!(err, StorageError::DuplicateId(ref id) if id == "1"));
        assert_eq!(workspace.board().len(), 4);
        assert_eq!(workspace.store().writes().await, 0);
    }

    #[tokio::test]
    async fn test_remove_unknown_media_skips_the_store() {
        let mut workspace = Workspace::open(MemoryStore::new()).await.unwrap();

        let removed = workspace.remove_media("1", "missing-media").await.unwrap();

        assert!(removed.is_none());
        assert_eq!(workspace.store().writes().await, 0);
    }

    #[tokio::test]
    async fn test_drag_and_drop_is_saved() {
        let mut workspace = Workspace::open(MemoryStore::new()).await.unwrap();

        assert!(workspace.begin_drag("3"));
        let moved = workspace.drop_on(Status::Highlight).await.unwrap();

        assert_eq!(moved, Some("3".to_string()));
        let saved = workspace.store().snapshot().await.unwrap();
        let house = saved.iter().find(|h| h.id == "3").unwrap();
        assert_eq!(house.status, Status::Highlight);
    }

    #[tokio::test]
    async fn test_failed_generation_keeps_description() {
        let mut workspace = Workspace::open(MemoryStore::new()).await.unwrap();
        let before = workspace.board().get("2").unwrap().description.clone();
        let generator = GeminiGenerator::new(None).unwrap();

        let err = workspace
            .save_generated_description("2", &generator)
            .await
            .unwrap_err();

        assert!(matches!(err, DescribeError::Generation(GenerationError::MissingApiKey)));
        assert_eq!(workspace.board().get("2").unwrap().description, before);
        assert_eq!(workspace.store().writes().await, 0);
    }

    #[tokio::test]
    async fn test_rejected_generation_writes_nothing() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut workspace = Workspace::open(MemoryStore::new()).await.unwrap();
        let before = workspace.board().get("3").unwrap().description.clone();
        let generator = GeminiGenerator::new(Some("key".to_string()))
            .unwrap()
            .with_base_url(mock_server.uri());

        let result = workspace.save_generated_description("3", &generator).await;

        assert!(matches!(result, Err(DescribeError::Generation(_))));
        assert_eq!(workspace.board().get("3").unwrap().description, before);
        assert_eq!(workspace.store().writes().await, 0);
    }

    #[tokio::test]
    async fn test_generated_description_is_saved() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-2.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{ "content": { "parts": [{ "text": "Loft living 🏙️" }] } }]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut workspace = Workspace::open(MemoryStore::new()).await.unwrap();
        let generator = GeminiGenerator::new(Some("key".to_string()))
            .unwrap()
            .with_base_url(mock_server.uri());

        let generated = workspace
            .save_generated_description("4", &generator)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(generated.text, "Loft living 🏙️");
        let saved = workspace.store().snapshot().await.unwrap();
        let house = saved.iter().find(|h| h.id == "4").unwrap();
        assert_eq!(house.description, "Loft living 🏙️");
        assert_eq!(workspace.store().writes().await, 1);
        assert!(workspace
            .save_generated_description("nope", &generator)
            .await
            .unwrap()
            .is_none());
    }
}
