//! Move-resolution procedure
//!
//! Tries each suggested candidate in order with lenient SAN parsing; the
//! first candidate that is a legal move in the current position is applied
//! and resolution stops. First match wins, not best match: no ranking or
//! scoring beyond the order the requester returned. If no candidate applies,
//! or the suggestion request failed outright, a uniformly random legal move
//! is applied instead. The procedure is a no-op only when the game is
//! already over or another resolution is in flight.

use std::sync::atomic::{AtomicBool, Ordering};

use chess_game::GameSession;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::llm::TextGenerator;
use crate::suggest::MoveSuggester;

/// Where an applied AI move came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveSource {
    /// A suggested candidate; `rank` is its 0-based index in the list.
    Suggested { rank: usize },
    /// Uniform-random fallback from the legal-move list.
    Random,
}

/// Outcome of one resolution attempt.
#[derive(Debug)]
pub enum Resolution {
    /// A move was applied; `next` is the freshly constructed holder.
    Applied {
        next: GameSession,
        san: String,
        source: MoveSource,
        /// FEN snapshot the move was computed against. The caller must
        /// discard the result if this no longer matches the current
        /// position, e.g. after a reset while the request was outstanding.
        resolved_from: String,
    },
    /// Nothing was applied.
    Skipped(SkipReason),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The game is already over; there is nothing to resolve.
    GameOver,
    /// Another resolution is still in flight.
    InFlight,
}

/// First-match fold over the candidate list, with uniform-random fallback.
///
/// A candidate that fails lenient parsing is silently skipped, exactly like
/// one that parses to an illegal move; the two cases are indistinguishable
/// by contract. Returns `None` only when the position has no legal move.
pub fn apply_candidates<R: Rng>(
    session: &GameSession,
    candidates: &[String],
    rng: &mut R,
) -> Option<(GameSession, String, MoveSource)> {
    for (rank, candidate) in candidates.iter().enumerate() {
        if let Some(next) = session.try_move_san(candidate) {
            debug!("Applied suggested move {:?} (rank {})", candidate, rank);
            return Some((next, candidate.clone(), MoveSource::Suggested { rank }));
        }
        debug!("Rejected candidate {:?}", candidate);
    }

    let legal = session.legal_moves_san();
    let san = legal.choose(rng)?.clone();
    let next = session.try_move_san(&san)?;
    Some((next, san, MoveSource::Random))
}

/// Drives one AI ply: suggestion request, first-match application, random
/// fallback. `idle -> awaiting-suggestion -> resolving -> idle` per ply.
pub struct MoveResolver<G> {
    suggester: MoveSuggester<G>,
    /// Explicit re-entrancy guard. Set for the whole suggestion round trip,
    /// checked before any mutation; also drives the UI busy indicator.
    in_flight: AtomicBool,
}

impl<G: TextGenerator> MoveResolver<G> {
    pub fn new(generator: G) -> Self {
        Self {
            suggester: MoveSuggester::new(generator),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Whether a resolution is currently in flight.
    pub fn is_thinking(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Resolve one AI move for `session`.
    ///
    /// A second call while a request is outstanding is skipped, not queued.
    /// When at least one legal move exists this always returns `Applied`;
    /// suggestion failures degrade to the random fallback, never to an
    /// error.
    pub async fn resolve(&self, session: &GameSession) -> Resolution {
        if session.is_game_over() {
            return Resolution::Skipped(SkipReason::GameOver);
        }
        if self.in_flight.swap(true, Ordering::AcqRel) {
            return Resolution::Skipped(SkipReason::InFlight);
        }
        let _reset = InFlightReset(&self.in_flight);

        let resolved_from = session.fen();

        // awaiting-suggestion
        let candidates = match self.suggester.suggest(&resolved_from).await {
            Ok(candidates) => candidates,
            Err(e) => {
                // Never surfaced to the user; the fallback below still
                // produces a valid move.
                warn!("Suggestion request failed: {:#}", e);
                Vec::new()
            }
        };

        // resolving
        let mut rng = rand::thread_rng();
        match apply_candidates(session, &candidates, &mut rng) {
            Some((next, san, source)) => {
                info!("AI move resolved: {} ({:?})", san, source);
                Resolution::Applied {
                    next,
                    san,
                    source,
                    resolved_from,
                }
            }
            // No legal move can only mean the game ended under us.
            None => Resolution::Skipped(SkipReason::GameOver),
        }
    }
}

/// Clears the in-flight flag on every exit path.
struct InFlightReset<'a>(&'a AtomicBool);

impl Drop for InFlightReset<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
