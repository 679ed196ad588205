//! Move-suggestion requester
//!
//! Given a position, obtains up to three suggested moves in short algebraic
//! notation, ordered by confidence. One request, no retry: any transport,
//! authentication or parse failure propagates as a single failure signal and
//! the caller falls back to a random legal move.

use anyhow::{Context, Result};
use chess_game::GameSession;
use tracing::{debug, info};

use crate::llm::{parse_candidates, PromptTemplate, TextGenerator};

/// Requests candidate moves for a position from a text-generation backend.
pub struct MoveSuggester<G> {
    generator: G,
}

impl<G: TextGenerator> MoveSuggester<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    /// Request up to three candidate moves for `fen`, ordered by confidence.
    ///
    /// The legal-move list is computed locally and embedded in the prompt to
    /// ground the request. Every returned entry is untrusted: none is
    /// guaranteed legal or even well-formed.
    pub async fn suggest(&self, fen: &str) -> Result<Vec<String>> {
        let session =
            GameSession::from_fen(fen).context("Invalid position for suggestion request")?;
        let legal = session.legal_moves_san();
        let prompt = PromptTemplate::move_request(fen, &legal);

        debug!(
            "Requesting suggestions: fen={}, legal_moves={}",
            fen,
            legal.len()
        );

        let response = self.generator.generate(&prompt).await?;
        let candidates = parse_candidates(&response);

        info!("Received {} candidate moves", candidates.len());
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Echoes a canned reply and records the prompt it was given.
    struct RecordingGenerator {
        reply: &'static str,
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl TextGenerator for RecordingGenerator {
        async fn generate(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.reply.to_string())
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            bail!("connection refused")
        }
    }

    #[tokio::test]
    async fn test_suggest_parses_ordered_candidates() {
        let generator = RecordingGenerator {
            reply: "e4, Nf3, d4",
            prompts: Mutex::new(Vec::new()),
        };
        let suggester = MoveSuggester::new(generator);
        let fen = GameSession::new().fen();

        let candidates = suggester.suggest(&fen).await.unwrap();
        assert_eq!(candidates, vec!["e4", "Nf3", "d4"]);

        // The prompt carried the position and its legal moves.
        let prompts = suggester.generator.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains(&fen));
        assert!(prompts[0].contains("Nf3"));
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let suggester = MoveSuggester::new(FailingGenerator);
        let fen = GameSession::new().fen();
        assert!(suggester.suggest(&fen).await.is_err());
    }

    #[tokio::test]
    async fn test_invalid_fen_is_an_error() {
        let generator = RecordingGenerator {
            reply: "e4",
            prompts: Mutex::new(Vec::new()),
        };
        let suggester = MoveSuggester::new(generator);
        assert!(suggester.suggest("not a fen").await.is_err());
    }
}
