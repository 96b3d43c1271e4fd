//! Remote document collection: one document per listing, identity assigned
//! by the server. No transactions and no concurrency checks; the last write
//! wins.

use crate::models::House;
use crate::storage::traits::{ListingStore, Mutation};
use crate::storage::{StorageError, StorageResult};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Collection used when none is configured
pub const DEFAULT_COLLECTION: &str = "listings";

#[derive(Debug, Deserialize)]
struct Document {
    id: String,
    fields: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct DocumentList {
    #[serde(default)]
    documents: Vec<Document>,
}

#[derive(Debug, Deserialize)]
struct Created {
    id: String,
}

pub struct RemoteStore {
    client: Client,
    base_url: String,
    collection: String,
    token: Option<String>,
}

impl RemoteStore {
    pub fn new(base_url: impl Into<String>) -> StorageResult<Self> {
        Self::with_collection(base_url, DEFAULT_COLLECTION)
    }

    pub fn with_collection(
        base_url: impl Into<String>,
        collection: impl Into<String>,
    ) -> StorageResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(StorageError::Config("remote store URL is empty".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("listing-board/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url,
            collection: collection.into(),
            token: None,
        })
    }

    /// Send a bearer token with every request
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, self.collection)
    }

    fn document_url(&self, id: &str) -> String {
        format!("{}/{}/{}", self.base_url, self.collection, id)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> StorageResult<Response> {
        let response = self.authorize(request).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Remote store returned status: {}", status);
            return Err(StorageError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Fetch every document in the collection
    pub async fn fetch_all(&self) -> StorageResult<Vec<House>> {
        let url = self.collection_url();
        debug!("Fetching URL: {}", url);

        let list: DocumentList = self.send(self.client.get(&url)).await?.json().await?;
        list.documents.into_iter().map(document_to_house).collect()
    }

    /// Create a document and return the id the server assigned
    pub async fn create(&self, house: &House) -> StorageResult<String> {
        let created: Created = self
            .send(self.client.post(self.collection_url()).json(&house_fields(house)?))
            .await?
            .json()
            .await?;
        info!("Created remote listing {} (local id {})", created.id, house.id);
        Ok(created.id)
    }

    pub async fn update(&self, house: &House) -> StorageResult<()> {
        self.send(
            self.client
                .patch(self.document_url(&house.id))
                .json(&house_fields(house)?),
        )
        .await?;
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> StorageResult<()> {
        self.send(self.client.delete(self.document_url(id))).await?;
        Ok(())
    }
}

/// A listing's fields without its identity, which lives on the document
fn house_fields(house: &House) -> StorageResult<Map<String, Value>> {
    match serde_json::to_value(house)? {
        Value::Object(mut fields) => {
            fields.remove("id");
            Ok(fields)
        }
        _ => Err(StorageError::Config(
            "listing did not serialize to an object".to_string(),
        )),
    }
}

fn document_to_house(doc: Document) -> StorageResult<House> {
    let mut fields = doc.fields;
    fields.insert("id".to_string(), Value::String(doc.id.clone()));
    serde_json::from_value(Value::Object(fields)).map_err(|e| StorageError::Decode {
        id: doc.id,
        reason: e.to_string(),
    })
}

#[async_trait]
impl ListingStore for RemoteStore {
    async fn load(&self) -> StorageResult<Option<Vec<House>>> {
        Ok(Some(self.fetch_all().await?))
    }

    async fn persist(
        &self,
        mutation: Mutation<'_>,
        _snapshot: &[House],
    ) -> StorageResult<Option<String>> {
        match mutation {
            Mutation::Created(house) => self.create(house).await.map(Some),
            Mutation::Updated(house) => self.update(house).await.map(|_| None),
            Mutation::Removed(id) => self.delete(id).await.map(|_| None),
        }
    }

    fn store_type(&self) -> &'static str {
        "remote"
    }
}
