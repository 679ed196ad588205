//! Manual test for the Gemini suggestion pipeline.
//!
//! ```bash
//! GEMINI_API_KEY=... cargo run -p chess-ai --example suggest_demo
//!
//! # against a specific position
//! GEMINI_API_KEY=... cargo run -p chess-ai --example suggest_demo -- "<fen>"
//! ```

use chess_ai::llm::GeminiClient;
use chess_ai::MoveSuggester;
use chess_game::GameSession;
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let client = GeminiClient::from_env()?;
    println!("Using model: {}\n", client.config().model);

    let args: Vec<String> = env::args().collect();
    let fen = if args.len() > 1 {
        GameSession::from_fen(&args[1])?.fen()
    } else {
        GameSession::new().fen()
    };

    println!("Position: {fen}");
    let suggester = MoveSuggester::new(client);
    let candidates = suggester.suggest(&fen).await?;

    println!("Candidates, ordered by confidence:");
    for (i, candidate) in candidates.iter().enumerate() {
        println!("  {}. {}", i + 1, candidate);
    }
    Ok(())
}
