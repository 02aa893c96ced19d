use crate::evaluation::parameters::{point_weight, ValueFeatures, VALUE_PARAMS};
use crate::position::{Player, Position, NUM_POINTS};
use crate::search::Score;

/// Snapshot of the position before any checker is moved.
/// Every move generated from the position is scored relative to it.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct EvalContext {
    player_pips: f64,
    opponent_pips: f64,
    opponent_bar: u8,
    player_points: [u8; NUM_POINTS],
}

impl EvalContext {
    pub fn new(position: &Position) -> Self {
        let mut player_points = [0; NUM_POINTS];
        player_points.copy_from_slice(&position[Player::Mover][..NUM_POINTS]);
        EvalContext {
            player_pips: position.pip_count(Player::Mover) as f64,
            opponent_pips: position.pip_count(Player::Opponent) as f64,
            opponent_bar: position.bar(Player::Opponent),
            player_points,
        }
    }
}

pub(crate) fn static_eval_features(
    position: &Position,
    context: &EvalContext,
    borne_off: u8,
    value_features: &mut ValueFeatures,
) {
    value_features.pip_gain = context.player_pips - position.pip_count(Player::Mover) as f64;
    value_features.opponent_pip_shift =
        context.opponent_pips - position.pip_count(Player::Opponent) as f64;
    value_features.opponent_pressure =
        position.bar(Player::Opponent) as f64 - context.opponent_bar as f64;
    value_features.borne_off = borne_off as f64;

    value_features.new_points = position[Player::Mover][..NUM_POINTS]
        .iter()
        .zip(context.player_points)
        .enumerate()
        .filter(|(_, (&now, before))| now >= 2 && *before < 2)
        .map(|(point, _)| point_weight(point))
        .sum();
}

/// Heuristic score of the position reached after a move, from the mover's perspective.
/// Evaluated in double precision and rounded once at the end.
pub fn static_eval(position: &Position, context: &EvalContext, borne_off: u8) -> Score {
    let mut value_features = ValueFeatures::default();
    static_eval_features(position, context, borne_off, &mut value_features);
    value_features.score_with_params(&VALUE_PARAMS) as Score
}
