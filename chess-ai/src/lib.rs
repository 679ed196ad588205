//! AI move pipeline for a human-vs-LLM chess game.
//!
//! Contains:
//! - Gemini API client and prompt/candidate handling (`llm`)
//! - move-suggestion requester
//! - move-resolution procedure (first legal candidate, else uniform-random
//!   fallback from the legal-move list)

pub mod llm;
mod resolver;
mod suggest;

pub use resolver::{apply_candidates, MoveResolver, MoveSource, Resolution, SkipReason};
pub use suggest::MoveSuggester;
