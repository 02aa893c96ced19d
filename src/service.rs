//! Runs hint requests on worker threads, reporting back through callbacks.
//!
//! Searches hold the read side of the engine lock, so several can run at once, while
//! initialization and shutdown take the write side and wait for them to finish.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::thread::{self, JoinHandle};

use log::{error, warn};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::cube::{CubeEvaluator, CubeInfo, DoubleHint, NeutralCubeEvaluator, TakeHint};
use crate::engine::{Engine, EngineState, HintError, MoveHint};
use crate::position::{Dice, Position};

/// A single hint request. The position may be given directly or as a position ID.
#[derive(Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HintRequest {
    pub position: Option<Position>,
    /// Takes precedence over `position` when non-empty
    pub position_id: Option<String>,
    pub dice: Option<Dice>,
    pub cube_info: Option<CubeInfo>,
    pub max_hints: Option<usize>,
}

impl HintRequest {
    pub fn from_position(position: Position) -> Self {
        HintRequest {
            position: Some(position),
            ..Default::default()
        }
    }

    pub fn from_position_id(position_id: &str) -> Self {
        HintRequest {
            position_id: Some(position_id.to_string()),
            ..Default::default()
        }
    }

    pub fn dice(mut self, dice: Dice) -> Self {
        self.dice = Some(dice);
        self
    }

    pub fn cube_info(mut self, cube_info: CubeInfo) -> Self {
        self.cube_info = Some(cube_info);
        self
    }

    pub fn max_hints(mut self, max_hints: usize) -> Self {
        self.max_hints = Some(max_hints);
        self
    }

    pub fn resolve_position(&self) -> Result<Position, HintError> {
        match (self.position_id.as_deref(), &self.position) {
            (Some(id), _) if !id.is_empty() => Ok(Position::from_position_id(id)?),
            (_, Some(position)) => Ok(*position),
            (Some(_), None) => Err(HintError::InvalidInput("empty position id".to_string())),
            (None, None) => Err(HintError::InvalidInput("missing position".to_string())),
        }
    }

    pub fn resolve_dice(&self) -> Result<Dice, HintError> {
        self.dice
            .ok_or_else(|| HintError::InvalidInput("missing dice".to_string()))
    }
}

pub struct HintService<C: CubeEvaluator = NeutralCubeEvaluator> {
    engine: Arc<RwLock<Engine<C>>>,
}

impl<C: CubeEvaluator> Clone for HintService<C> {
    fn clone(&self) -> Self {
        HintService {
            engine: Arc::clone(&self.engine),
        }
    }
}

impl<C> HintService<C>
where
    C: CubeEvaluator + Send + Sync + 'static,
{
    pub fn new(engine: Engine<C>) -> Self {
        HintService {
            engine: Arc::new(RwLock::new(engine)),
        }
    }

    fn read_engine(
        engine: &RwLock<Engine<C>>,
    ) -> Result<RwLockReadGuard<'_, Engine<C>>, HintError> {
        engine.read().map_err(|_| {
            error!("Engine lock poisoned");
            HintError::Internal("engine lock poisoned".to_string())
        })
    }

    fn write_engine(
        engine: &RwLock<Engine<C>>,
    ) -> Result<RwLockWriteGuard<'_, Engine<C>>, HintError> {
        engine.write().map_err(|_| {
            error!("Engine lock poisoned");
            HintError::Internal("engine lock poisoned".to_string())
        })
    }

    pub fn state(&self) -> Result<EngineState, HintError> {
        Ok(Self::read_engine(&self.engine)?.state())
    }

    /// Initialize the engine on a worker thread. Waits for in-flight searches to finish first.
    pub fn initialize<F>(&self, callback: F) -> JoinHandle<()>
    where
        F: FnOnce(Result<(), HintError>) + Send + 'static,
    {
        let engine = Arc::clone(&self.engine);
        spawn_worker(
            "initialize",
            move || {
                let mut engine = Self::write_engine(&engine)?;
                engine.initialize()
            },
            callback,
        )
    }

    /// Shut the engine down, blocking until in-flight searches finish.
    pub fn shutdown(&self) -> Result<(), HintError> {
        Self::write_engine(&self.engine)?.shutdown();
        Ok(())
    }

    pub fn move_hints<F>(&self, request: HintRequest, callback: F) -> JoinHandle<()>
    where
        F: FnOnce(Result<Vec<MoveHint>, HintError>) + Send + 'static,
    {
        let engine = Arc::clone(&self.engine);
        spawn_worker(
            "move hints",
            move || {
                let engine = Self::read_engine(&engine)?;
                let position = request.resolve_position()?;
                let dice = request.resolve_dice()?;
                let max_hints = request
                    .max_hints
                    .unwrap_or_else(|| engine.setting().max_hints());
                engine.move_hints(&position, dice, max_hints)
            },
            callback,
        )
    }

    pub fn double_hint<F>(&self, request: HintRequest, callback: F) -> JoinHandle<()>
    where
        F: FnOnce(Result<DoubleHint, HintError>) + Send + 'static,
    {
        let engine = Arc::clone(&self.engine);
        spawn_worker(
            "double hint",
            move || {
                let engine = Self::read_engine(&engine)?;
                let position = request.resolve_position()?;
                engine.double_hint(&position, request.cube_info.as_ref())
            },
            callback,
        )
    }

    pub fn take_hint<F>(&self, request: HintRequest, callback: F) -> JoinHandle<()>
    where
        F: FnOnce(Result<TakeHint, HintError>) + Send + 'static,
    {
        let engine = Arc::clone(&self.engine);
        spawn_worker(
            "take hint",
            move || {
                let engine = Self::read_engine(&engine)?;
                let position = request.resolve_position()?;
                engine.take_hint(&position, request.cube_info.as_ref())
            },
            callback,
        )
    }
}

/// Run `work` on a new thread and hand its result, or the panic, to `callback`.
fn spawn_worker<T, W, F>(name: &'static str, work: W, callback: F) -> JoinHandle<()>
where
    T: Send + 'static,
    W: FnOnce() -> Result<T, HintError> + Send + 'static,
    F: FnOnce(Result<T, HintError>) + Send + 'static,
{
    thread::spawn(move || {
        let result = match panic::catch_unwind(AssertUnwindSafe(work)) {
            Ok(result) => result,
            Err(_) => {
                error!("Worker for {} panicked", name);
                Err(HintError::WorkerPanicked)
            }
        };
        if let Err(err) = &result {
            warn!("Request for {} failed: {}", name, err);
        }
        callback(result)
    })
}
