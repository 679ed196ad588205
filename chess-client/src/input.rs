//! Command-line move entry.
//!
//! A move gesture is a (from, to) square pair with an optional promotion
//! piece, written in coordinate form: `e2e4`, `e7e8q`.

use chess_game::{Role, Square};

/// One line of user input, parsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// A move gesture.
    Move {
        from: Square,
        to: Square,
        promotion: Option<Role>,
    },
    /// List the legal moves.
    Moves,
    /// Reset to a new game.
    New,
    /// Leave the program.
    Quit,
    /// Anything unrecognized.
    Invalid,
}

pub fn parse_command(line: &str) -> Command {
    match line.trim() {
        "new" => Command::New,
        "quit" | "exit" => Command::Quit,
        "moves" => Command::Moves,
        other => parse_move(other)
            .map(|(from, to, promotion)| Command::Move {
                from,
                to,
                promotion,
            })
            .unwrap_or(Command::Invalid),
    }
}

fn parse_move(text: &str) -> Option<(Square, Square, Option<Role>)> {
    let text = text.to_ascii_lowercase();
    if !text.is_ascii() || text.len() < 4 || text.len() > 5 {
        return None;
    }

    let from: Square = text[0..2].parse().ok()?;
    let to: Square = text[2..4].parse().ok()?;
    let promotion = match text.len() {
        5 => Some(Role::from_char(text.chars().nth(4)?)?),
        _ => None,
    };

    Some((from, to, promotion))
}
