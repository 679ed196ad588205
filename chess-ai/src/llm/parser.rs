//! Candidate extraction from the raw model response
//!
//! The response is untrusted free-form text. This module only splits it into
//! an ordered list of tokens; nothing here guarantees a token is a legal or
//! even well-formed move. Validation happens in the resolver, against the
//! actual position.

use tracing::debug;

/// Maximum number of candidates kept from one response.
pub const MAX_CANDIDATES: usize = 3;

/// Split a model response into an ordered list of candidate move tokens.
///
/// Splits on commas, trims each entry, drops empties and caps the list at
/// [`MAX_CANDIDATES`]. Markdown fences, wrapping quotes and list numbering
/// the model sometimes adds are stripped first.
pub fn parse_candidates(response: &str) -> Vec<String> {
    let cleaned = strip_decorations(response);

    let candidates: Vec<String> = cleaned
        .split(',')
        .map(clean_token)
        .filter(|token| !token.is_empty())
        .take(MAX_CANDIDATES)
        .collect();

    debug!("Extracted {} candidates from response", candidates.len());
    candidates
}

/// Remove markdown code fences and quoting around the whole response.
fn strip_decorations(text: &str) -> String {
    let cleaned = text.replace("```json", "").replace("```", "");
    cleaned.replace(['\'', '"', '`'], " ").trim().to_string()
}

/// Tidy one comma-separated token.
fn clean_token(token: &str) -> String {
    let token = strip_numbering(token.trim());
    token.trim_end_matches('.').trim().to_string()
}

/// Drop a leading list index like "1." or "2)" without touching moves that
/// start with a digit themselves ("0-0").
fn strip_numbering(token: &str) -> &str {
    let digits = token.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        let rest = &token[digits..];
        if let Some(stripped) = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
            return stripped.trim_start();
        }
    }
    token
}
