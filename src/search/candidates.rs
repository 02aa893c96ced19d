use arrayvec::ArrayVec;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::position::Move;
use crate::search::Score;

/// Maximum number of candidates kept for a single search. Further candidates are dropped.
pub const MAX_CANDIDATES: usize = 256;

#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Candidate {
    pub mv: Move,
    pub score: Score,
    /// Secondary score, currently always equal to `score`
    pub score2: Score,
}

impl Candidate {
    pub fn new(mv: Move, score: Score) -> Self {
        Candidate {
            mv,
            score,
            score2: score,
        }
    }

    pub fn pass() -> Self {
        Candidate::new(Move::pass(), 0.0)
    }
}

/// Fixed-capacity store of the candidates from one search.
/// Once full, new candidates are silently dropped and counted.
#[derive(Clone, Debug, Default)]
pub struct CandidateBuffer {
    candidates: ArrayVec<Candidate, MAX_CANDIDATES>,
    dropped: usize,
}

impl CandidateBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, candidate: Candidate) {
        if self.candidates.try_push(candidate).is_err() {
            self.dropped += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Number of candidates that did not fit in the buffer
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Merge candidates with identical moves, keeping the highest score.
    /// Surviving candidates stay in the order they were first seen.
    pub fn deduplicate(&mut self) {
        let mut unique: ArrayVec<Candidate, MAX_CANDIDATES> = ArrayVec::new();
        for candidate in self.candidates.drain(..) {
            match unique.iter_mut().find(|kept| kept.mv == candidate.mv) {
                Some(kept) => {
                    if candidate.score > kept.score {
                        *kept = candidate;
                    }
                }
                None => unique.push(candidate),
            }
        }
        self.candidates = unique;
    }

    /// Deduplicate, sort by descending score, and return the best `max_candidates`.
    ///
    /// Equal scores are ordered by the raw step array, lowest first, so the result does not depend
    /// on the sorting algorithm.
    pub fn into_ranked(mut self, max_candidates: usize) -> Vec<Candidate> {
        self.deduplicate();
        let mut candidates = self.candidates.into_iter().collect::<Vec<_>>();
        candidates.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.mv.cmp(&b.mv)));
        candidates.truncate(max_candidates);
        candidates
    }
}
