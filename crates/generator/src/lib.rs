//! Page generation for deployed sites
//!
//! - **Gemini Client**: `generateContent` calls against the Gemini REST API
//! - **Prompts**: creation and revision templates for a single HTML page
//! - **ContentGenerator**: prompt selection plus response clean-up

pub mod content;
pub mod error;
pub mod gemini;
pub mod model;
pub mod prompts;

pub use content::{strip_code_fences, ContentGenerator};
pub use error::{GenerationError, GenerationResult};
pub use gemini::client::GeminiClient;
pub use model::CompletionModel;
