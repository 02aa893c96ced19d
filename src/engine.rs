//! The hint engine: lifecycle, settings, and the move/cube hint entry points.

use std::fmt;

use log::{debug, info};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cube::{CubeEvaluator, CubeInfo, DoubleHint, NeutralCubeEvaluator, TakeHint};
use crate::position::{Dice, Move, Position, PositionIdError, StepOutcome};
use crate::search;
use crate::search::Score;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum HintError {
    #[error("engine is not initialized")]
    NotInitialized,
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid position id: {0}")]
    InvalidPositionId(#[from] PositionIdError),
    #[error("internal error: {0}")]
    Internal(String),
    #[error("hint worker panicked")]
    WorkerPanicked,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum EngineState {
    #[default]
    Uninitialized,
    Ready,
    ShutDown,
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineState::Uninitialized => write!(f, "uninitialized"),
            EngineState::Ready => write!(f, "ready"),
            EngineState::ShutDown => write!(f, "shut down"),
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct HintSetting {
    default_max_hints: usize,
    cube_info: CubeInfo,
}

impl Default for HintSetting {
    fn default() -> Self {
        HintSetting {
            default_max_hints: 10,
            cube_info: CubeInfo::default(),
        }
    }
}

impl HintSetting {
    /// Number of hints returned when a request does not ask for a specific count
    pub fn default_max_hints(mut self, max_hints: usize) -> Self {
        self.default_max_hints = max_hints;
        self
    }

    /// Cube and match context used when a request carries none
    pub fn cube_info(mut self, cube_info: CubeInfo) -> Self {
        self.cube_info = cube_info;
        self
    }

    pub fn max_hints(&self) -> usize {
        self.default_max_hints
    }

    pub fn default_cube_info(&self) -> &CubeInfo {
        &self.cube_info
    }
}

/// A ranked move suggestion.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MoveHint {
    pub mv: Move,
    pub score: Score,
    pub score2: Score,
    /// 1 for the best move
    pub rank: usize,
    /// Score difference from the best move, zero or negative
    pub difference: Score,
    /// Hits and bear-offs of each step, in order. Empty for a pass.
    pub outcomes: Vec<StepOutcome>,
}

pub struct Engine<C: CubeEvaluator = NeutralCubeEvaluator> {
    state: EngineState,
    setting: HintSetting,
    cube_evaluator: C,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(HintSetting::default())
    }
}

impl Engine {
    pub fn new(setting: HintSetting) -> Self {
        Self::with_cube_evaluator(setting, NeutralCubeEvaluator)
    }
}

impl<C: CubeEvaluator> Engine<C> {
    pub fn with_cube_evaluator(setting: HintSetting, cube_evaluator: C) -> Self {
        Engine {
            state: EngineState::Uninitialized,
            setting,
            cube_evaluator,
        }
    }

    /// Prepare the engine for searching. Calling this on a ready engine does nothing.
    pub fn initialize(&mut self) -> Result<(), HintError> {
        if self.state == EngineState::Ready {
            debug!("Engine already initialized");
            return Ok(());
        }
        self.cube_evaluator.initialize()?;
        info!("Engine initialized, was {}", self.state);
        self.state = EngineState::Ready;
        Ok(())
    }

    pub fn shutdown(&mut self) {
        if self.state == EngineState::Ready {
            info!("Engine shut down");
        }
        self.state = EngineState::ShutDown;
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == EngineState::Ready
    }

    pub fn setting(&self) -> &HintSetting {
        &self.setting
    }

    fn check_ready(&self) -> Result<(), HintError> {
        if self.is_ready() {
            Ok(())
        } else {
            Err(HintError::NotInitialized)
        }
    }

    /// The best `max_hints` moves for the roll, best first.
    ///
    /// A roll whose first die cannot be played returns a pass, possibly alongside real moves when
    /// only one dice order is blocked. A roll where a single die can be played returns no hints.
    pub fn move_hints(
        &self,
        position: &Position,
        dice: Dice,
        max_hints: usize,
    ) -> Result<Vec<MoveHint>, HintError> {
        self.check_ready()?;
        if max_hints == 0 {
            return Ok(vec![]);
        }
        let candidates = search::ranked_moves(position, dice, max_hints);
        let best_score = candidates.first().map(|candidate| candidate.score);
        candidates
            .into_iter()
            .enumerate()
            .map(|(i, candidate)| {
                let mut after = *position;
                let outcomes = after
                    .do_move(&candidate.mv)
                    .map_err(|err| HintError::Internal(format!("{}: {}", candidate.mv, err)))?;
                Ok(MoveHint {
                    difference: best_score.map_or(0.0, |best| candidate.score - best),
                    mv: candidate.mv,
                    score: candidate.score,
                    score2: candidate.score2,
                    rank: i + 1,
                    outcomes,
                })
            })
            .collect()
    }

    pub fn move_hints_from_position_id(
        &self,
        position_id: &str,
        dice: Dice,
        max_hints: usize,
    ) -> Result<Vec<MoveHint>, HintError> {
        self.check_ready()?;
        let position = Position::from_position_id(position_id)?;
        self.move_hints(&position, dice, max_hints)
    }

    pub fn double_hint(
        &self,
        position: &Position,
        cube_info: Option<&CubeInfo>,
    ) -> Result<DoubleHint, HintError> {
        self.check_ready()?;
        let cube_info = cube_info.unwrap_or(&self.setting.cube_info);
        let hint = self.cube_evaluator.double_hint(position, cube_info)?;
        hint.validate()?;
        Ok(hint)
    }

    pub fn take_hint(
        &self,
        position: &Position,
        cube_info: Option<&CubeInfo>,
    ) -> Result<TakeHint, HintError> {
        self.check_ready()?;
        let cube_info = cube_info.unwrap_or(&self.setting.cube_info);
        let hint = self.cube_evaluator.take_hint(position, cube_info)?;
        hint.validate()?;
        Ok(hint)
    }
}
