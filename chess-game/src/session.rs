//! Game session: one immutable position plus its repetition history.
//!
//! A session is never mutated in place. Applying a move constructs a fresh
//! `GameSession` for the resulting position, so every ply has a new identity
//! and callers can compare snapshots by FEN to detect staleness.

use shakmaty::fen::Fen;
use shakmaty::san::SanPlus;
use shakmaty::uci::UciMove;
use shakmaty::zobrist::{Zobrist64, ZobristHash};
use shakmaty::{
    Board, CastlingMode, Chess, Color, EnPassantMode, Move, MoveList, Position, Rank, Role, Square,
};
use tracing::debug;

use crate::error::{GameError, Result};
use crate::status::GameStatus;

/// Halfmove-clock threshold for the fifty-move rule.
const FIFTY_MOVE_HALFMOVES: u32 = 100;

/// The game-state holder.
///
/// Owns the position exclusively; exposes it only as a FEN string or through
/// read-only accessors. The Zobrist history is carried alongside because the
/// rules engine reports repetition only against externally kept history.
#[derive(Clone, Debug)]
pub struct GameSession {
    pos: Chess,
    history: Vec<Zobrist64>,
}

impl GameSession {
    /// Standard starting position.
    pub fn new() -> Self {
        let pos = Chess::default();
        let history = vec![pos.zobrist_hash(EnPassantMode::Legal)];
        Self { pos, history }
    }

    /// Construct a session from a FEN string.
    ///
    /// Repetition history restarts at the given position.
    pub fn from_fen(fen: &str) -> Result<Self> {
        let parsed: Fen = fen
            .trim()
            .parse()
            .map_err(|e: shakmaty::fen::ParseFenError| GameError::InvalidFen {
                reason: e.to_string(),
            })?;
        let pos: Chess =
            parsed
                .into_position(CastlingMode::Standard)
                .map_err(|e| GameError::InvalidPosition {
                    reason: e.to_string(),
                })?;
        let history = vec![pos.zobrist_hash(EnPassantMode::Legal)];
        Ok(Self { pos, history })
    }

    /// Current position as a FEN string.
    pub fn fen(&self) -> String {
        Fen::from_position(self.pos.clone(), EnPassantMode::Legal).to_string()
    }

    /// Side to move.
    pub fn turn(&self) -> Color {
        self.pos.turn()
    }

    /// Piece placement, for rendering.
    pub fn board(&self) -> &Board {
        self.pos.board()
    }

    /// Legal moves in verbose form.
    pub fn legal_moves(&self) -> MoveList {
        self.pos.legal_moves()
    }

    /// Legal moves in short algebraic notation (with check/mate suffixes).
    pub fn legal_moves_san(&self) -> Vec<String> {
        self.pos
            .legal_moves()
            .iter()
            .map(|m| SanPlus::from_move(self.pos.clone(), m).to_string())
            .collect()
    }

    /// Apply a move given as a (from, to, promotion) triple.
    ///
    /// Lenient: when the move requires a promotion and none is specified the
    /// pawn auto-promotes to a queen; a promotion piece given for a
    /// non-promoting move is ignored. Returns the successor session, or
    /// `None` if the move is illegal or malformed. The current session is
    /// left untouched either way.
    pub fn try_move(
        &self,
        from: Square,
        to: Square,
        promotion: Option<Role>,
    ) -> Option<GameSession> {
        let is_promotion = self
            .pos
            .board()
            .piece_at(from)
            .map_or(false, |piece| {
                piece.role == Role::Pawn
                    && (to.rank() == Rank::Eighth || to.rank() == Rank::First)
            });
        let promotion = if is_promotion {
            promotion.or(Some(Role::Queen))
        } else {
            None
        };

        let uci = UciMove::Normal {
            from,
            to,
            promotion,
        };
        let m = match uci.to_move(&self.pos) {
            Ok(m) => m,
            Err(_) => {
                debug!("Rejected move {}{}", from, to);
                return None;
            }
        };
        self.advance(&m)
    }

    /// Apply a move given in short algebraic notation.
    ///
    /// Lenient: whitespace, check/mate/annotation suffixes and the `0-0`
    /// castling spelling are tolerated. Same rejection contract as
    /// [`GameSession::try_move`].
    pub fn try_move_san(&self, input: &str) -> Option<GameSession> {
        let cleaned = normalize_san(input);
        if cleaned.is_empty() {
            return None;
        }
        let san: SanPlus = match cleaned.parse() {
            Ok(san) => san,
            Err(_) => {
                debug!("Unparseable SAN {:?}", input);
                return None;
            }
        };
        let m = match san.san.to_move(&self.pos) {
            Ok(m) => m,
            Err(_) => {
                debug!("SAN {:?} is not legal here", input);
                return None;
            }
        };
        self.advance(&m)
    }

    /// Play an already-validated move and build the successor session.
    fn advance(&self, m: &Move) -> Option<GameSession> {
        let next = self.pos.clone().play(m).ok()?;
        let mut history = self.history.clone();
        history.push(next.zobrist_hash(EnPassantMode::Legal));
        Some(GameSession { pos: next, history })
    }

    pub fn is_checkmate(&self) -> bool {
        self.pos.is_checkmate()
    }

    pub fn is_stalemate(&self) -> bool {
        self.pos.is_stalemate()
    }

    pub fn is_insufficient_material(&self) -> bool {
        self.pos.is_insufficient_material()
    }

    /// Whether the current position has occurred at least three times.
    pub fn is_threefold_repetition(&self) -> bool {
        let current = match self.history.last() {
            Some(hash) => *hash,
            None => return false,
        };
        self.history.iter().filter(|h| **h == current).count() >= 3
    }

    /// Fifty-move rule: 100 halfmoves without a capture or pawn move.
    pub fn is_fifty_move_rule(&self) -> bool {
        self.pos.halfmoves() >= FIFTY_MOVE_HALFMOVES
    }

    pub fn is_draw(&self) -> bool {
        !self.is_checkmate()
            && (self.is_stalemate()
                || self.is_threefold_repetition()
                || self.is_insufficient_material()
                || self.is_fifty_move_rule())
    }

    pub fn is_game_over(&self) -> bool {
        self.pos.is_game_over() || self.is_threefold_repetition() || self.is_fifty_move_rule()
    }

    /// Mutually exclusive game-over classification, recomputed on demand.
    pub fn status(&self) -> GameStatus {
        if self.is_checkmate() {
            GameStatus::Checkmate {
                winner: !self.turn(),
            }
        } else if self.is_stalemate() {
            GameStatus::Stalemate
        } else if self.is_threefold_repetition() {
            GameStatus::DrawByRepetition
        } else if self.is_insufficient_material() {
            GameStatus::DrawByInsufficientMaterial
        } else if self.is_fifty_move_rule() {
            GameStatus::Draw
        } else {
            GameStatus::InProgress { turn: self.turn() }
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize an untrusted SAN token before handing it to the parser.
fn normalize_san(input: &str) -> String {
    let cleaned = input.trim().trim_end_matches(['!', '?']).trim();
    match cleaned {
        "0-0" => "O-O".to_string(),
        "0-0-0" => "O-O-O".to_string(),
        _ => cleaned.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Final position of the Fool's Mate (1.f3 e5 2.g4 Qh4#).
    const FOOLS_MATE_FEN: &str =
        "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";

    #[test]
    fn test_new_session_is_start_position() {
        let session = GameSession::new();
        assert_eq!(session.fen(), START_FEN);
        assert_eq!(session.turn(), Color::White);
        assert_eq!(session.legal_moves().len(), 20);
        assert!(!session.is_game_over());
    }

    #[test]
    fn test_from_fen_round_trip() {
        let session = GameSession::from_fen(FOOLS_MATE_FEN).unwrap();
        assert_eq!(session.fen(), FOOLS_MATE_FEN);
    }

    #[test]
    fn test_from_fen_rejects_garbage() {
        assert!(matches!(
            GameSession::from_fen("not a fen"),
            Err(GameError::InvalidFen { .. })
        ));
    }

    #[test]
    fn test_legal_move_advances_one_ply() {
        let session = GameSession::new();
        let next = session.try_move(Square::E2, Square::E4, None).unwrap();

        // The original holder is untouched.
        assert_eq!(session.fen(), START_FEN);

        // The successor reflects the opponent's turn.
        assert_eq!(next.turn(), Color::Black);
        assert!(next.legal_moves_san().contains(&"e5".to_string()));
        assert!(next.legal_moves_san().contains(&"Nf6".to_string()));
    }

    #[test]
    fn test_illegal_move_is_rejected() {
        let session = GameSession::new();
        assert!(session.try_move(Square::E2, Square::E5, None).is_none());
        assert!(session.try_move(Square::E7, Square::E5, None).is_none());
        assert_eq!(session.fen(), START_FEN);
    }

    #[test]
    fn test_san_application_is_lenient() {
        let session = GameSession::new();
        assert!(session.try_move_san("Nf3").is_some());
        assert!(session.try_move_san("  e4  ").is_some());
        assert!(session.try_move_san("e4!?").is_some());
        assert!(session.try_move_san("xyz").is_none());
        assert!(session.try_move_san("").is_none());
        // Legal SAN, but not legal in this position.
        assert!(session.try_move_san("Qh5").is_none());
    }

    #[test]
    fn test_castling_spellings() {
        let session =
            GameSession::from_fen("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
        assert!(session.try_move_san("O-O").is_some());
        assert!(session.try_move_san("0-0-0").is_some());

        // Castling entered as a king (from, to) gesture.
        let next = session.try_move(Square::E1, Square::G1, None).unwrap();
        assert!(next.fen().starts_with("4k3/8/8/8/8/8/8/R4RK1"));
    }

    #[test]
    fn test_promotion_auto_queens() {
        let session = GameSession::from_fen("8/P7/8/8/8/8/k6K/8 w - - 0 1").unwrap();
        let next = session.try_move(Square::A7, Square::A8, None).unwrap();
        assert!(next.fen().starts_with("Q7/"));
    }

    #[test]
    fn test_promotion_honors_explicit_piece() {
        let session = GameSession::from_fen("8/P7/8/8/8/8/k6K/8 w - - 0 1").unwrap();
        let next = session
            .try_move(Square::A7, Square::A8, Some(Role::Knight))
            .unwrap();
        assert!(next.fen().starts_with("N7/"));
    }

    #[test]
    fn test_promotion_piece_ignored_for_plain_move() {
        let session = GameSession::new();
        assert!(session
            .try_move(Square::E2, Square::E4, Some(Role::Queen))
            .is_some());
    }

    #[test]
    fn test_checkmate_classification() {
        let session = GameSession::from_fen(FOOLS_MATE_FEN).unwrap();
        assert!(session.is_checkmate());
        assert!(session.is_game_over());
        assert!(session.legal_moves().is_empty());
        assert_eq!(
            session.status(),
            GameStatus::Checkmate {
                winner: Color::Black
            }
        );
        assert_eq!(session.status().to_string(), "Checkmate!");
    }

    #[test]
    fn test_stalemate_classification() {
        let session = GameSession::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(session.is_stalemate());
        assert!(!session.is_checkmate());
        assert_eq!(session.status(), GameStatus::Stalemate);
    }

    #[test]
    fn test_insufficient_material_classification() {
        let session = GameSession::from_fen("8/8/8/4k3/8/4K3/8/8 w - - 0 1").unwrap();
        assert!(session.is_insufficient_material());
        assert!(session.is_draw());
        assert_eq!(session.status(), GameStatus::DrawByInsufficientMaterial);
    }

    #[test]
    fn test_fifty_move_rule_classification() {
        let session =
            GameSession::from_fen("8/8/8/4k3/8/4K3/8/6R1 w - - 100 80").unwrap();
        assert!(session.is_fifty_move_rule());
        assert!(session.is_game_over());
        assert_eq!(session.status(), GameStatus::Draw);
    }

    #[test]
    fn test_threefold_repetition() {
        // Shuffle the knights back and forth until the start position has
        // occurred three times.
        let mut session = GameSession::new();
        for san in ["Nf3", "Nf6", "Ng1", "Ng8", "Nf3", "Nf6", "Ng1", "Ng8"] {
            assert!(!session.is_threefold_repetition());
            session = session.try_move_san(san).unwrap();
        }
        assert!(session.is_threefold_repetition());
        assert!(session.is_game_over());
        assert_eq!(session.status(), GameStatus::DrawByRepetition);
    }

    #[test]
    fn test_repetition_history_survives_cloning() {
        let session = GameSession::new();
        let next = session.try_move_san("e4").unwrap();
        // Independent copies: extending one history never affects the other.
        assert!(!session.is_threefold_repetition());
        assert!(!next.is_threefold_repetition());
    }

    #[test]
    fn test_in_progress_status() {
        let session = GameSession::new();
        assert_eq!(
            session.status(),
            GameStatus::InProgress { turn: Color::White }
        );
        let next = session.try_move_san("e4").unwrap();
        assert_eq!(next.status(), GameStatus::InProgress { turn: Color::Black });
    }

    #[test]
    fn test_normalize_san() {
        assert_eq!(normalize_san(" Nf3+ "), "Nf3+");
        assert_eq!(normalize_san("e4!?"), "e4");
        assert_eq!(normalize_san("0-0"), "O-O");
        assert_eq!(normalize_san("0-0-0"), "O-O-O");
    }
}
