use std::sync::Arc;
use tracing::info;

use crate::error::{GenerationError, GenerationResult};
use crate::model::CompletionModel;
use crate::prompts;

/// Turns a brief (and optionally the current page) into new page content.
#[derive(Clone)]
pub struct ContentGenerator {
    model: Arc<dyn CompletionModel>,
}

impl ContentGenerator {
    pub fn new(model: Arc<dyn CompletionModel>) -> Self {
        Self { model }
    }

    pub async fn generate(
        &self,
        api_key: &str,
        brief: &str,
        existing: Option<&str>,
    ) -> GenerationResult<String> {
        let prompt = match existing {
            Some(current) => prompts::revision_prompt(brief, current),
            None => prompts::creation_prompt(brief),
        };

        info!(
            model = %self.model.model_name(),
            revision = existing.is_some(),
            "Generating page content"
        );
        let raw = self.model.complete(api_key, &prompt).await?;
        let content = strip_code_fences(&raw);

        if content.is_empty() {
            return Err(GenerationError::EmptyResponse);
        }

        info!(chars = content.len(), "Model responded");
        Ok(content)
    }
}

/// Removes markdown code-fence markers anywhere in `raw` and trims the result.
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```html", "")
        .replace("```", "")
        .trim()
        .to_string()
}
