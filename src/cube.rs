//! Doubling cube decisions.
//!
//! Only the calling contract is implemented here. [`NeutralCubeEvaluator`] always returns a
//! zero evaluation, and a real equity model can be plugged in through [`CubeEvaluator`].

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::engine::HintError;
use crate::position::{Player, Position};

/// State of the cube and the match
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CubeInfo {
    pub cube_value: u32,
    /// `None` for a centered cube
    pub cube_owner: Option<Player>,
    pub match_score: [u32; 2],
    /// Zero for money play
    pub match_length: u32,
    pub crawford: bool,
    pub jacoby: bool,
    pub beavers: bool,
}

impl Default for CubeInfo {
    fn default() -> Self {
        CubeInfo {
            cube_value: 1,
            cube_owner: None,
            match_score: [0, 0],
            match_length: 7,
            crawford: false,
            jacoby: false,
            beavers: false,
        }
    }
}

/// Outcome probabilities and equities, from the mover's perspective
#[derive(Clone, Copy, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Evaluation {
    pub win: f32,
    pub win_gammon: f32,
    pub win_backgammon: f32,
    pub lose_gammon: f32,
    pub lose_backgammon: f32,
    pub equity: f32,
    pub cubeful_equity: f32,
}

impl Evaluation {
    fn check_finite(&self) -> Result<(), HintError> {
        let values = [
            self.win,
            self.win_gammon,
            self.win_backgammon,
            self.lose_gammon,
            self.lose_backgammon,
            self.equity,
            self.cubeful_equity,
        ];
        if values.iter().all(|value| value.is_finite()) {
            Ok(())
        } else {
            Err(HintError::Internal(format!(
                "evaluation contains a non-finite value: {:?}",
                self
            )))
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DoubleAction {
    NoDouble,
    Double,
    TooGood,
}

impl DoubleAction {
    /// Classify a cubeful equity. Above 1.0 the position is too good to double.
    pub fn from_equity(equity: f32) -> Result<Self, HintError> {
        if !equity.is_finite() {
            return Err(HintError::Internal(format!(
                "cannot classify double with equity {}",
                equity
            )));
        }
        Ok(if equity > 1.0 {
            DoubleAction::TooGood
        } else if equity > 0.5 {
            DoubleAction::Double
        } else {
            DoubleAction::NoDouble
        })
    }
}

impl fmt::Display for DoubleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DoubleAction::NoDouble => write!(f, "no-double"),
            DoubleAction::Double => write!(f, "double"),
            DoubleAction::TooGood => write!(f, "too-good"),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TakeAction {
    Take,
    Drop,
}

impl TakeAction {
    pub fn from_equities(take_equity: f32, drop_equity: f32) -> Result<Self, HintError> {
        if !take_equity.is_finite() || !drop_equity.is_finite() {
            return Err(HintError::Internal(format!(
                "cannot classify take with equities {} and {}",
                take_equity, drop_equity
            )));
        }
        Ok(if take_equity > drop_equity {
            TakeAction::Take
        } else {
            TakeAction::Drop
        })
    }
}

impl fmt::Display for TakeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TakeAction::Take => write!(f, "take"),
            TakeAction::Drop => write!(f, "drop"),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DoubleHint {
    pub action: DoubleAction,
    pub take_point: f32,
    pub drop_point: f32,
    pub evaluation: Evaluation,
    pub cubeful_equity: f32,
}

impl DoubleHint {
    pub(crate) fn validate(&self) -> Result<(), HintError> {
        self.evaluation.check_finite()?;
        let expected = DoubleAction::from_equity(self.cubeful_equity)?;
        if !self.take_point.is_finite() || !self.drop_point.is_finite() {
            return Err(HintError::Internal(format!(
                "non-finite take/drop point in {:?}",
                self
            )));
        }
        if expected != self.action {
            return Err(HintError::Internal(format!(
                "double action {} does not match cubeful equity {}",
                self.action, self.cubeful_equity
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TakeHint {
    pub action: TakeAction,
    pub evaluation: Evaluation,
    pub take_equity: f32,
    pub drop_equity: f32,
}

impl TakeHint {
    pub(crate) fn validate(&self) -> Result<(), HintError> {
        self.evaluation.check_finite()?;
        let expected = TakeAction::from_equities(self.take_equity, self.drop_equity)?;
        if expected != self.action {
            return Err(HintError::Internal(format!(
                "take action {} does not match equities {} / {}",
                self.action, self.take_equity, self.drop_equity
            )));
        }
        Ok(())
    }
}

/// An equity model able to make cube decisions.
pub trait CubeEvaluator {
    /// Called once when the engine is initialized, for instance to load weights.
    fn initialize(&mut self) -> Result<(), HintError> {
        Ok(())
    }

    /// Whether the player on roll should double
    fn double_hint(
        &self,
        position: &Position,
        cube_info: &CubeInfo,
    ) -> Result<DoubleHint, HintError>;

    /// Whether the player on roll should take a double offered by the opponent
    fn take_hint(
        &self,
        position: &Position,
        cube_info: &CubeInfo,
    ) -> Result<TakeHint, HintError>;
}

/// Placeholder evaluator that considers every position dead even.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct NeutralCubeEvaluator;

impl CubeEvaluator for NeutralCubeEvaluator {
    fn double_hint(
        &self,
        _position: &Position,
        _cube_info: &CubeInfo,
    ) -> Result<DoubleHint, HintError> {
        let evaluation = Evaluation::default();
        Ok(DoubleHint {
            action: DoubleAction::from_equity(evaluation.cubeful_equity)?,
            take_point: 0.0,
            drop_point: 0.0,
            evaluation,
            cubeful_equity: evaluation.cubeful_equity,
        })
    }

    fn take_hint(
        &self,
        _position: &Position,
        _cube_info: &CubeInfo,
    ) -> Result<TakeHint, HintError> {
        let evaluation = Evaluation::default();
        let take_equity = evaluation.equity;
        let drop_equity = -1.0;
        Ok(TakeHint {
            action: TakeAction::from_equities(take_equity, drop_equity)?,
            evaluation,
            take_equity,
            drop_equity,
        })
    }
}
