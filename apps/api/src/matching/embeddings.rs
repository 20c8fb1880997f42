//! Text embedding client.
//!
//! The `TextEmbedder` trait is the seam between the matcher and the
//! provider so tests can substitute a deterministic embedder.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::AppError;

const EMBEDDINGS_URL: &str = "https://api.openai.com/v1/embeddings";
const REQUEST_TIMEOUT_SECS: u64 = 30;
const MAX_ATTEMPTS: u32 = 2;

#[async_trait]
pub trait TextEmbedder: Send + Sync {
    /// Embeds one text into a fixed-length vector.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, AppError>;
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

/// OpenAI-compatible embeddings client.
#[derive(Clone)]
pub struct OpenAiEmbedder {
    client: Client,
    api_key: String,
    model: String,
}

impl OpenAiEmbedder {
    pub fn new(api_key: String, model: String) -> anyhow::Result<Self> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            api_key,
            model,
        })
    }

    async fn request(&self, text: &str) -> Result<Vec<f32>, String> {
        let body = EmbeddingRequest {
            model: &self.model,
            input: text,
        };

        let mut last_error = String::new();

        for attempt in 0..MAX_ATTEMPTS {
            if attempt > 0 {
                warn!("Embedding call failed, retrying once...");
                tokio::time::sleep(std::time::Duration::from_millis(500)).await;
            }

            let response = match self
                .client
                .post(EMBEDDINGS_URL)
                .bearer_auth(&self.api_key)
                .json(&body)
                .send()
                .await
            {
                Ok(r) => r,
                Err(e) => {
                    last_error = format!("transport error: {e}");
                    continue;
                }
            };

            let status = response.status();
            if status.as_u16() == 429 || status.is_server_error() {
                last_error = format!("provider returned {status}");
                continue;
            }
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(format!("provider returned {status}: {body}"));
            }

            let parsed: EmbeddingResponse = response
                .json()
                .await
                .map_err(|e| format!("malformed embedding response: {e}"))?;
            return parsed
                .data
                .into_iter()
                .next()
                .map(|d| d.embedding)
                .ok_or_else(|| "embedding response contained no vectors".to_string());
        }

        Err(last_error)
    }
}

#[async_trait]
impl TextEmbedder for OpenAiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, AppError> {
        self.request(text)
            .await
            .map_err(|e| AppError::Upstream(format!("Embedding request failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedding_response_parses_first_vector() {
        let json = r#"{"data": [{"embedding": [0.1, 0.2]}, {"embedding": [0.3]}]}"#;
        let parsed: EmbeddingResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.data[0].embedding, vec![0.1, 0.2]);
    }
}
