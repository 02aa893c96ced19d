//! Heuristic scoring of the positions reached by each candidate move.

pub mod parameters;
pub mod value_eval;

pub use value_eval::{static_eval, EvalContext};
