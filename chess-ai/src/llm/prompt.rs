//! LLM prompt construction
//!
//! The move-request prompt embeds the position (FEN) and the full legal-move
//! list, and asks for exactly the top three moves as a comma-separated list.

/// LLM prompt templates
pub struct PromptTemplate;

impl PromptTemplate {
    /// Move-request prompt for a position.
    ///
    /// Grounding the request in the legal-move list keeps the model's answers
    /// mostly parseable, but nothing downstream trusts it.
    pub fn move_request(fen: &str, legal_moves_san: &[String]) -> String {
        let legal = legal_moves_san.join(", ");

        format!(
            "You are a chess engine. Given the following chess position in FEN notation: {fen}\n\
             \n\
             Here are all legal moves in this position: {legal}\n\
             \n\
             Analyze the position and suggest the top 3 strongest moves from the legal moves list above.\n\
             Return ONLY the moves separated by commas (e.g., 'e4, Nf6, O-O').\n\
             The moves must be from the provided legal moves list."
        )
    }
}
