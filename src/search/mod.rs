//! Move ranking for a single roll.
//!
//! The search itself is a plain exhaustive enumeration, see `move_gen`. This module collects
//! its output, merges duplicates and orders the moves by heuristic score.

use log::{debug, warn};

use crate::evaluation::EvalContext;
use crate::position::{Dice, Position};

pub use candidates::{Candidate, CandidateBuffer, MAX_CANDIDATES};

mod candidates;

pub type Score = f32;

/// Fill a candidate buffer with every move for the roll, without ranking them.
pub fn generate_candidates(position: &Position, dice: Dice) -> CandidateBuffer {
    let context = EvalContext::new(position);
    let mut candidates = CandidateBuffer::new();
    position.generate_candidates(dice, &context, &mut candidates);
    candidates
}

/// The best `max_moves` moves for the roll, best first.
pub fn ranked_moves(position: &Position, dice: Dice, max_moves: usize) -> Vec<Candidate> {
    let candidates = generate_candidates(position, dice);
    if candidates.dropped() > 0 {
        warn!(
            "Candidate buffer full for {} on {}, dropped {} moves",
            dice,
            position.position_id(),
            candidates.dropped()
        );
    }
    let generated = candidates.len();
    let ranked = candidates.into_ranked(max_moves);
    debug!(
        "Generated {} candidates for {} on {}, returning {}",
        generated,
        dice,
        position.position_id(),
        ranked.len()
    );
    ranked
}
