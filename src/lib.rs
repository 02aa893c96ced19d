//! Move hints for backgammon: exhaustive legal move generation, heuristic scoring
//! and ranking of the resulting moves.

pub mod cube;
pub mod engine;
pub mod evaluation;
mod move_gen;
pub mod position;
pub mod search;
pub mod service;
mod tests;

pub use engine::{Engine, EngineState, HintError, HintSetting, MoveHint};
