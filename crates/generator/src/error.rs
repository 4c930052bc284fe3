use thiserror::Error;

/// Generation-specific error types
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Gemini API error: {message}")]
    GeminiApi {
        message: String,
        status_code: Option<u16>,
    },

    #[error("Model returned no usable content")]
    EmptyResponse,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for generation operations
pub type GenerationResult<T> = Result<T, GenerationError>;
