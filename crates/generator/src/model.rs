use async_trait::async_trait;

use crate::error::GenerationResult;

/// A text-in, text-out generative model.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// Name of the backing model, for logging
    fn model_name(&self) -> &str;

    /// Send one prompt and wait for the full response text.
    async fn complete(&self, api_key: &str, prompt: &str) -> GenerationResult<String>;
}
