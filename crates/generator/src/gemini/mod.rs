//! Gemini API client for single-turn text generation

pub mod client;
pub mod types;

pub use client::GeminiClient;
pub use types::*;
