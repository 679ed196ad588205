//! Game-over classification.
//!
//! Derived on demand from the position, never stored. Variants are mutually
//! exclusive; `Display` is the user-facing status line.

use std::fmt;

use shakmaty::Color;

/// Result of classifying the current position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    /// Game still running; carries the side to move.
    InProgress { turn: Color },
    /// The side to move is mated.
    Checkmate { winner: Color },
    /// The side to move has no legal move but is not in check.
    Stalemate,
    /// The same position occurred three times.
    DrawByRepetition,
    /// Neither side can possibly mate.
    DrawByInsufficientMaterial,
    /// Any other draw (fifty-move rule).
    Draw,
}

impl GameStatus {
    pub fn is_game_over(&self) -> bool {
        !matches!(self, GameStatus::InProgress { .. })
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress { turn: Color::White } => write!(f, "White to move"),
            GameStatus::InProgress { turn: Color::Black } => write!(f, "Black to move"),
            GameStatus::Checkmate { .. } => write!(f, "Checkmate!"),
            GameStatus::Stalemate => write!(f, "Stalemate!"),
            GameStatus::DrawByRepetition => write!(f, "Draw by repetition!"),
            GameStatus::DrawByInsufficientMaterial => {
                write!(f, "Draw by insufficient material!")
            }
            GameStatus::Draw => write!(f, "Draw!"),
        }
    }
}
