//! Error types.

use thiserror::Error;

/// Game-state construction errors.
///
/// Note that illegal or malformed *moves* are not errors: per the holder's
/// contract they are reported as a rejection (`None`), never a fault.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The FEN string could not be parsed
    #[error("Invalid FEN string: {reason}")]
    InvalidFen { reason: String },

    /// The FEN parsed, but does not describe a playable standard position
    #[error("Invalid position: {reason}")]
    InvalidPosition { reason: String },
}

/// Game-state operation result type.
pub type Result<T> = std::result::Result<T, GameError>;
