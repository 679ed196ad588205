//! LLM integration module
//!
//! Requests move suggestions for a position from the Gemini generation API.

mod client;
mod parser;
mod prompt;

pub use client::{GeminiClient, GeminiConfig, TextGenerator};
pub use parser::{parse_candidates, MAX_CANDIDATES};
pub use prompt::PromptTemplate;
