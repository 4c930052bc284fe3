use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error};

use super::types::*;
use crate::error::{GenerationError, GenerationResult};
use crate::model::CompletionModel;

/// Client for the Gemini `generateContent` endpoint.
///
/// No request timeout is configured; a generation call lasts as long as the
/// remote model takes.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            model: model.into(),
        }
    }

    fn endpoint(&self) -> String {
        let model = self.model.trim_start_matches("models/");
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model
        )
    }
}

#[async_trait]
impl CompletionModel for GeminiClient {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn complete(&self, api_key: &str, prompt: &str) -> GenerationResult<String> {
        debug!(
            model = %self.model,
            prompt_chars = prompt.len(),
            "Requesting content generation"
        );

        let request = GenerateContentRequest::from_prompt(prompt);

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            if let Ok(error_resp) = serde_json::from_str::<GeminiErrorResponse>(&error_text) {
                error!(
                    "Gemini API error: {} (status: {:?})",
                    error_resp.error.message, error_resp.error.status
                );
                return Err(GenerationError::GeminiApi {
                    message: error_resp.error.message,
                    status_code: Some(status.as_u16()),
                });
            }

            return Err(GenerationError::GeminiApi {
                message: error_text,
                status_code: Some(status.as_u16()),
            });
        }

        let body: GenerateContentResponse = response.json().await?;
        body.text().ok_or(GenerationError::EmptyResponse)
    }
}
