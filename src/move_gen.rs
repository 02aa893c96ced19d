//! Exhaustive generation of every move sequence for a roll.

use arrayvec::ArrayVec;

use crate::evaluation::{static_eval, EvalContext};
use crate::position::{
    Dice, Move, Player, Position, Source, Step, Target, BAR, MAX_STEPS, NUM_POINTS,
};
use crate::search::{Candidate, CandidateBuffer};

type Steps = ArrayVec<Step, MAX_STEPS>;

impl Position {
    /// Generate every complete move for the roll, scoring each against `context`.
    ///
    /// Non-doubles are searched in both dice orders, and doubles as four plies of the same die.
    /// Moves reached through both orders are pushed twice, and are merged when the buffer is ranked.
    ///
    /// An order whose first die cannot be played at all pushes a pass. An order that plays its
    /// first die but cannot finish pushes nothing, so a roll where only one die is playable
    /// has no candidates.
    pub fn generate_candidates(
        &self,
        dice: Dice,
        context: &EvalContext,
        candidates: &mut CandidateBuffer,
    ) {
        for sequence in dice.sequences() {
            let mut steps = Steps::new();
            if !self.generate_sequences(&sequence, &mut steps, 0, context, candidates) {
                candidates.push(Candidate::pass());
            }
        }
    }

    /// Depth-first search over the remaining dice. Every branch plays on its own copy of the position.
    ///
    /// Returns whether a step was played from this node, whether or not it led to a complete move.
    fn generate_sequences(
        &self,
        dice: &[u8],
        steps: &mut Steps,
        borne_off: u8,
        context: &EvalContext,
        candidates: &mut CandidateBuffer,
    ) -> bool {
        let Some(&die) = dice.get(steps.len()) else {
            let score = static_eval(self, context, borne_off);
            candidates.push(Candidate::new(Move::from_steps(steps.clone()), score));
            return true;
        };
        let die = die as usize;

        if self.bar(Player::Mover) > 0 {
            // A checker on the bar must enter before anything else moves
            if let Some(next) = self.enter_from_bar(die) {
                steps.push(Step::new(Source::Bar, Target::Point((BAR - die) as u8)));
                next.generate_sequences(dice, steps, borne_off, context, candidates);
                steps.pop();
                return true;
            }
            return false;
        }

        let mut generated = false;
        for from in (0..NUM_POINTS).rev() {
            if self[Player::Mover][from] == 0 {
                continue;
            }
            let mut next = *self;
            let mut next_borne_off = borne_off;
            let step = if from < die {
                if !self.all_checkers_in_home() {
                    continue;
                }
                next.side_mut(Player::Mover)[from] -= 1;
                next_borne_off += 1;
                Step::new(Source::Point(from as u8), Target::Off)
            } else {
                let to = from - die;
                if self.opponent_checkers_at(to) >= 2 {
                    continue;
                }
                next.hit_blot(to);
                next.side_mut(Player::Mover)[from] -= 1;
                next.side_mut(Player::Mover)[to] += 1;
                Step::new(Source::Point(from as u8), Target::Point(to as u8))
            };

            steps.push(step);
            next.generate_sequences(dice, steps, next_borne_off, context, candidates);
            steps.pop();
            generated = true;
        }
        generated
    }

    /// The position after entering a checker from the bar with `die`, or `None` if the point is blocked.
    fn enter_from_bar(&self, die: usize) -> Option<Position> {
        let to = BAR.checked_sub(die).filter(|&to| to < NUM_POINTS)?;
        if self.opponent_checkers_at(to) >= 2 {
            return None;
        }
        let mut next = *self;
        next.hit_blot(to);
        next.side_mut(Player::Mover)[BAR] -= 1;
        next.side_mut(Player::Mover)[to] += 1;
        Some(next)
    }
}
