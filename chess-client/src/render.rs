//! ASCII board rendering.

use chess_game::{File, GameSession, Rank, Square};

/// Render the position as an ASCII board, white at the bottom.
pub fn board(session: &GameSession) -> String {
    let board = session.board();
    let mut out = String::new();

    out.push_str("  +---+---+---+---+---+---+---+---+\n");
    for rank in (0..8u32).rev() {
        out.push_str(&format!("{} |", rank + 1));
        for file in 0..8u32 {
            let square = Square::from_coords(File::new(file), Rank::new(rank));
            let piece = board.piece_at(square).map(|p| p.char()).unwrap_or(' ');
            out.push_str(&format!(" {piece} |"));
        }
        out.push('\n');
        out.push_str("  +---+---+---+---+---+---+---+---+\n");
    }
    out.push_str("    a   b   c   d   e   f   g   h");

    out
}
