//! Game-state holder for a human-vs-LLM chess game.
//!
//! Wraps the `shakmaty` rules engine:
//! - position construction from FEN
//! - lenient move application (coordinate pair or SAN)
//! - legal-move enumeration (plain SAN and verbose forms)
//! - terminal-condition classification
//!
//! There is deliberately no engine, no search and no evaluation here;
//! legality and state transitions are delegated entirely to `shakmaty`.

mod error;
mod session;
mod status;

pub use error::{GameError, Result};
pub use session::GameSession;
pub use status::GameStatus;

// Re-exported so downstream crates don't need a direct shakmaty dependency.
pub use shakmaty::{Board, Color, File, Rank, Role, Square};
