//! Weights of the heuristic evaluation.

pub const NUM_VALUE_FEATURES: usize = 5;

/// Weights for [`ValueFeatures`], in the order of [`ValueFeatures::as_array`]
pub const VALUE_PARAMS: [f64; NUM_VALUE_FEATURES] = [1.0, 0.5, 3.0, 4.0, 1.0];

/// Bonus for making any new point
pub const POINT_WEIGHT: f64 = 1.5;
/// Extra bonus for making a point in the home board
pub const HOME_POINT_BONUS: f64 = 2.0;
/// Extra bonus for making the five-point
pub const GOLDEN_POINT_BONUS: f64 = 3.0;
pub const GOLDEN_POINT: usize = 4;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ValueFeatures {
    /// Pips gained by the mover
    pub pip_gain: f64,
    /// Pips the opponent has to travel compared to the start of the move. Negative after a hit.
    pub opponent_pip_shift: f64,
    /// Opponent checkers sent to the bar
    pub opponent_pressure: f64,
    pub borne_off: f64,
    /// Sum of [`point_weight`] over points with two or more checkers that had fewer at the start of the move
    pub new_points: f64,
}

impl ValueFeatures {
    pub fn as_array(&self) -> [f64; NUM_VALUE_FEATURES] {
        [
            self.pip_gain,
            self.opponent_pip_shift,
            self.opponent_pressure,
            self.borne_off,
            self.new_points,
        ]
    }

    pub fn score_with_params(&self, params: &[f64; NUM_VALUE_FEATURES]) -> f64 {
        self.as_array()
            .iter()
            .zip(params)
            .fold(0.0, |score, (feature, param)| score + feature * param)
    }
}

pub fn point_weight(point: usize) -> f64 {
    let mut weight = POINT_WEIGHT;
    if point < crate::position::HOME_POINTS {
        weight += HOME_POINT_BONUS;
    }
    if point == GOLDEN_POINT {
        weight += GOLDEN_POINT_BONUS;
    }
    weight
}
