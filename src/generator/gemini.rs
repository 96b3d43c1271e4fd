use crate::generator::{
    DescriptionGenerator, DescriptionRequest, GeneratedDescription, GenerationError,
};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Gemini API endpoint
pub const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiError,
}

/// Gemini text generation client
pub struct GeminiGenerator {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl GeminiGenerator {
    /// Create a generator; without a key every call yields the missing-key message
    pub fn new(api_key: Option<String>) -> Result<Self, GenerationError> {
        Self::with_timeout(api_key, Duration::from_secs(30))
    }

    pub fn with_timeout(
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, GenerationError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: GEMINI_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        })
    }

    /// Set a custom base URL
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl DescriptionGenerator for GeminiGenerator {
    async fn generate(
        &self,
        request: &DescriptionRequest,
    ) -> Result<GeneratedDescription, GenerationError> {
        let api_key = self.api_key.as_ref().ok_or(GenerationError::MissingApiKey)?;

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        debug!("Requesting description from {}", url);

        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: request.prompt(),
                }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            warn!("Gemini returned status: {}", status);
            let message = serde_json::from_str::<ApiErrorResponse>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateResponse =
            serde_json::from_str(&text).map_err(|e| GenerationError::Api {
                status: status.as_u16(),
                message: format!("Failed to parse response: {}", e),
            })?;

        let generated = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if generated.trim().is_empty() {
            return Err(GenerationError::EmptyResponse);
        }

        info!("Generated {} characters of copy for {}", generated.chars().count(), request.name);
        Ok(GeneratedDescription {
            text: generated,
            model: self.model.clone(),
            generated_at: Utc::now(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{EMPTY_MESSAGE, FAILURE_MESSAGE, MISSING_KEY_MESSAGE};
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request() -> DescriptionRequest {
        DescriptionRequest::new("Jardins Penthouse", "Duplex, Jacuzzi", "R$ 2.200.000").unwrap()
    }

    #[tokio::test]
    async fn test_missing_key_returns_fixed_message() {
        let generator = GeminiGenerator::new(None).unwrap();
        assert!(!generator.is_configured());
        assert_eq!(generator.describe(&request()).await, MISSING_KEY_MESSAGE);

        let blank = GeminiGenerator::new(Some("  ".to_string())).unwrap();
        assert!(matches!(
            blank.generate(&request()).await,
            Err(GenerationError::MissingApiKey)
        ));
    }

    #[tokio::test]
    async fn test_generate_joins_text_parts() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-2.5-flash:generateContent"))
            .and(header("x-goog-api-key", "key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": { "parts": [{ "text": "Live above " }, { "text": "the city ✨" }] }
                }]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let generator = GeminiGenerator::new(Some("key".to_string()))
            .unwrap()
            .with_base_url(mock_server.uri());
        let generated = generator.generate(&request()).await.unwrap();

        assert_eq!(generated.text, "Live above the city ✨");
        assert_eq!(generated.model, DEFAULT_MODEL);
    }

    #[tokio::test]
    async fn test_api_error_becomes_failure_message() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": { "message": "API key not valid" }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let generator = GeminiGenerator::new(Some("bad".to_string()))
            .unwrap()
            .with_base_url(mock_server.uri());

        match generator.generate(&request()).await {
            Err(GenerationError::Api { status, message }) => {
                assert_eq!(status, 403);
                assert_eq!(message, "API key not valid");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_describe_maps_failures_and_empty_text() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/empty:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path("/models/broken:generateContent"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let empty = GeminiGenerator::new(Some("key".to_string()))
            .unwrap()
            .with_base_url(mock_server.uri())
            .with_model("empty");
        assert_eq!(empty.describe(&request()).await, EMPTY_MESSAGE);

        let broken = GeminiGenerator::new(Some("key".to_string()))
            .unwrap()
            .with_base_url(mock_server.uri())
            .with_model("broken");
        assert_eq!(broken.describe(&request()).await, FAILURE_MESSAGE);
    }
}
