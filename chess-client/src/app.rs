//! Interactive game loop.
//!
//! The human plays White from stdin; after each accepted human move the AI
//! reply is requested following a fixed short delay. This mirrors the flow
//! of a drag-and-drop board: move gesture in, status line out, reset action.

use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use chess_ai::llm::TextGenerator;
use chess_ai::{MoveResolver, Resolution};
use chess_game::{Color, GameSession, GameStatus, Role, Square};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use crate::input::{parse_command, Command};
use crate::render;

/// Delay between the human move and the AI request.
const AI_MOVE_DELAY: Duration = Duration::from_millis(300);

/// The terminal front end: one session, one resolver.
pub struct App<G> {
    resolver: MoveResolver<G>,
    session: GameSession,
}

impl<G: TextGenerator> App<G> {
    pub fn new(generator: G) -> Self {
        Self {
            resolver: MoveResolver::new(generator),
            session: GameSession::new(),
        }
    }

    pub async fn run(mut self) -> Result<()> {
        println!("Chess vs Gemini AI");
        println!("Moves are coordinate pairs (e2e4, e7e8q). Commands: moves, new, quit.");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            println!("\n{}", render::board(&self.session));
            println!("{}", self.status_line());

            print!("> ");
            std::io::stdout().flush()?;

            let line = match lines.next_line().await? {
                Some(line) => line,
                None => break,
            };

            match parse_command(&line) {
                Command::Move {
                    from,
                    to,
                    promotion,
                } => self.human_move(from, to, promotion).await,
                Command::Moves => {
                    println!("{}", self.session.legal_moves_san().join(", "));
                }
                Command::New => {
                    info!("New game");
                    self.session = GameSession::new();
                }
                Command::Quit => break,
                Command::Invalid => {
                    println!("Unrecognized input. Try a move like e2e4, or: moves, new, quit.");
                }
            }
        }

        Ok(())
    }

    /// Validate and apply the human's move, then trigger the AI reply.
    async fn human_move(&mut self, from: Square, to: Square, promotion: Option<Role>) {
        if self.session.is_game_over() {
            println!("Game over. Type 'new' to start again.");
            return;
        }
        if self.resolver.is_thinking() {
            return;
        }

        match self.session.try_move(from, to, promotion) {
            Some(next) => {
                self.session = next;
                self.ai_reply().await;
            }
            None => println!("Illegal move."),
        }
    }

    /// Request and apply the AI's reply to the current position.
    async fn ai_reply(&mut self) {
        if self.session.is_game_over() {
            return;
        }

        println!("\n{}", render::board(&self.session));
        println!("AI is thinking...");
        tokio::time::sleep(AI_MOVE_DELAY).await;

        let resolution = self.resolver.resolve(&self.session).await;
        self.apply_if_fresh(resolution);
    }

    /// Apply a resolved AI move, unless it is stale.
    ///
    /// The resolution may have been computed against a position that is no
    /// longer current, e.g. when the game was reset while the request was
    /// outstanding; such a result is discarded rather than applied to the
    /// wrong position.
    fn apply_if_fresh(&mut self, resolution: Resolution) {
        match resolution {
            Resolution::Applied {
                next,
                san,
                source,
                resolved_from,
            } => {
                if self.session.fen() != resolved_from {
                    debug!("Discarding stale AI move {}", san);
                    return;
                }
                info!("AI plays {} ({:?})", san, source);
                println!("AI plays {san}");
                self.session = next;
            }
            Resolution::Skipped(reason) => {
                debug!("AI move skipped: {:?}", reason);
            }
        }
    }

    fn status_line(&self) -> String {
        match self.session.status() {
            GameStatus::InProgress {
                turn: Color::White,
            } => "Your turn".to_string(),
            GameStatus::InProgress {
                turn: Color::Black,
            } => "AI is thinking...".to_string(),
            status => status.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct StubGenerator(&'static str);

    #[async_trait]
    impl TextGenerator for StubGenerator {
        async fn generate(&self, _prompt: &str) -> anyhow::Result<String> {
            Ok(self.0.to_string())
        }
    }

    #[tokio::test]
    async fn test_human_move_triggers_ai_reply() {
        let mut app = App::new(StubGenerator("e5, Nf6, d5"));
        app.human_move(Square::E2, Square::E4, None).await;

        // Both plies landed: the human's e4 and the AI's suggested e5.
        assert_eq!(app.session.turn(), Color::White);
        assert!(app.session.fen().contains("4p3/4P3"));
    }

    #[tokio::test]
    async fn test_illegal_human_move_leaves_position_unchanged() {
        let mut app = App::new(StubGenerator("e5"));
        let before = app.session.fen();
        app.human_move(Square::E2, Square::E5, None).await;
        assert_eq!(app.session.fen(), before);
    }

    #[tokio::test]
    async fn test_fresh_resolution_is_applied() {
        let mut app = App::new(StubGenerator("e5, Nf6, d5"));
        app.session = GameSession::new().try_move_san("e4").unwrap();

        let snapshot = app.session.clone();
        let resolution = app.resolver.resolve(&snapshot).await;
        app.apply_if_fresh(resolution);

        assert_ne!(app.session.fen(), snapshot.fen());
        assert_eq!(app.session.turn(), Color::White);
    }

    #[tokio::test]
    async fn test_stale_resolution_is_discarded() {
        let mut app = App::new(StubGenerator("Nf3, Bc4"));

        // Resolve against a position two plies ahead of the app's, as if
        // the game had been reset while the request was outstanding.
        let outdated = GameSession::new()
            .try_move_san("e4")
            .unwrap()
            .try_move_san("e5")
            .unwrap();
        let resolution = app.resolver.resolve(&outdated).await;
        assert!(matches!(resolution, Resolution::Applied { .. }));

        let before = app.session.fen();
        app.apply_if_fresh(resolution);
        assert_eq!(app.session.fen(), before);
    }

    #[tokio::test]
    async fn test_status_line_reports_turn() {
        let app = App::new(StubGenerator(""));
        assert_eq!(app.status_line(), "Your turn");
    }

    #[tokio::test]
    async fn test_status_line_reports_checkmate() {
        let mut app = App::new(StubGenerator(""));
        app.session = GameSession::from_fen(
            "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
        )
        .unwrap();
        assert_eq!(app.status_line(), "Checkmate!");
    }
}
