//! Marketing copy generation for listings.

pub mod gemini;

pub use gemini::GeminiGenerator;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::error;

/// Returned in place of a description when no credential is configured
pub const MISSING_KEY_MESSAGE: &str = "Error: API key not configured.";
/// Returned in place of a description when the call fails
pub const FAILURE_MESSAGE: &str = "Could not generate the description automatically right now.";
/// Returned when the service answers with no text
pub const EMPTY_MESSAGE: &str = "Description not generated.";

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("API key not configured")]
    MissingApiKey,

    #[error("Name and price are required to generate a description")]
    MissingFields,

    #[error("Generation request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Generation API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Generation API returned no text")]
    EmptyResponse,
}

/// What the copywriter prompt is built from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionRequest {
    pub name: String,
    /// Comma joined feature tags
    pub features: String,
    pub price: String,
}

impl DescriptionRequest {
    pub fn new(
        name: impl Into<String>,
        features: impl Into<String>,
        price: impl Into<String>,
    ) -> Result<Self, GenerationError> {
        let request = Self {
            name: name.into(),
            features: features.into(),
            price: price.into(),
        };
        if request.name.trim().is_empty() || request.price.trim().is_empty() {
            return Err(GenerationError::MissingFields);
        }
        Ok(request)
    }

    pub fn prompt(&self) -> String {
        format!(
            "You are a copywriter specialised in luxury real estate.\n\
             Write a short, persuasive and attractive description (at most 300 characters) \
             for a property with the following characteristics:\n\n\
             Name: {}\n\
             Price: {}\n\
             Features: {}\n\n\
             Use emojis and sales-oriented language. Focus on desire.",
            self.name, self.price, self.features
        )
    }
}

/// Generated copy plus where it came from
#[derive(Debug, Clone)]
pub struct GeneratedDescription {
    pub text: String,
    pub model: String,
    pub generated_at: DateTime<Utc>,
}

/// Common trait for text generation backends
#[async_trait]
pub trait DescriptionGenerator: Send + Sync {
    /// One attempt at generating copy for a listing
    async fn generate(
        &self,
        request: &DescriptionRequest,
    ) -> Result<GeneratedDescription, GenerationError>;

    /// Get the name of the generation backend
    fn provider_name(&self) -> &'static str;

    /// Generate copy, turning every failure into a fixed message
    async fn describe(&self, request: &DescriptionRequest) -> String {
        match self.generate(request).await {
            Ok(description) => description.text,
            Err(e) => {
                error!("Error generating description with {}: {}", self.provider_name(), e);
                fallback_message(&e).to_string()
            }
        }
    }
}

/// Message shown in place of a description for the given failure
pub fn fallback_message(err: &GenerationError) -> &'static str {
    match err {
        GenerationError::MissingApiKey => MISSING_KEY_MESSAGE,
        GenerationError::EmptyResponse => EMPTY_MESSAGE,
        _ => FAILURE_MESSAGE,
    }
}
