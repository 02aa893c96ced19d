use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use arrayvec::ArrayVec;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::position::{BAR, NUM_POINTS};

/// Maximum number of steps in a move, reached when playing a double
pub const MAX_STEPS: usize = 4;

/// Value used for unused slots and for bearing off in the raw move representation
pub const SENTINEL: i8 = -1;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Source {
    Point(u8),
    Bar,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Target {
    Point(u8),
    Off,
}

/// Movement of a single checker by a single die
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Step {
    pub from: Source,
    pub to: Target,
}

impl Step {
    pub fn new(from: Source, to: Target) -> Self {
        Step { from, to }
    }

    /// The `(from, to)` pair in raw form, with the bar as 24 and bearing off as -1
    pub fn to_raw(self) -> [i8; 2] {
        let from = match self.from {
            Source::Point(point) => point as i8,
            Source::Bar => BAR as i8,
        };
        let to = match self.to {
            Target::Point(point) => point as i8,
            Target::Off => SENTINEL,
        };
        [from, to]
    }

    pub fn from_raw(from: i8, to: i8) -> Option<Self> {
        let source = match from {
            24 => Source::Bar,
            0..=23 => Source::Point(from as u8),
            _ => return None,
        };
        let target = match to {
            SENTINEL => Target::Off,
            0..=23 => Target::Point(to as u8),
            _ => return None,
        };
        Some(Step::new(source, target))
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.from {
            Source::Point(point) => write!(f, "{}/", point + 1)?,
            Source::Bar => write!(f, "bar/")?,
        }
        match self.to {
            Target::Point(point) => write!(f, "{}", point + 1),
            Target::Off => write!(f, "off"),
        }
    }
}

impl FromStr for Step {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let (from, to) = input
            .split_once('/')
            .ok_or_else(|| format!("Step \"{}\" is missing '/'", input))?;
        let parse_point = |s: &str| -> Result<u8, String> {
            match s.parse::<u8>() {
                Ok(point) if (1..=NUM_POINTS as u8).contains(&point) => Ok(point - 1),
                _ => Err(format!("Invalid point \"{}\" in step \"{}\"", s, input)),
            }
        };
        let source = match from {
            "bar" => Source::Bar,
            s => Source::Point(parse_point(s)?),
        };
        // A trailing '*' marks a hit, which is implied by the position
        let to = to.trim_end_matches('*');
        let target = match to {
            "off" => Target::Off,
            s => Target::Point(parse_point(s)?),
        };
        Ok(Step::new(source, target))
    }
}

/// A complete move for one roll: up to four steps, or none at all for a pass.
#[derive(Clone, PartialEq, Eq, Debug, Default, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move {
    steps: ArrayVec<Step, MAX_STEPS>,
}

impl Move {
    pub fn pass() -> Self {
        Move::default()
    }

    pub fn from_steps(steps: ArrayVec<Step, MAX_STEPS>) -> Self {
        Move { steps }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn is_pass(&self) -> bool {
        self.steps.is_empty()
    }

    /// Fixed-size representation, padded with [`SENTINEL`]. Two moves are equal iff their raw forms are.
    pub fn to_raw(&self) -> [i8; 2 * MAX_STEPS] {
        let mut raw = [SENTINEL; 2 * MAX_STEPS];
        for (i, step) in self.steps.iter().enumerate() {
            raw[2 * i..2 * i + 2].copy_from_slice(&step.to_raw());
        }
        raw
    }

    /// Read a move from its raw representation. Parsing stops at the first unused slot.
    pub fn from_raw(raw: &[i8; 2 * MAX_STEPS]) -> Option<Self> {
        let mut steps = ArrayVec::new();
        for pair in raw.chunks_exact(2) {
            if pair[0] == SENTINEL {
                break;
            }
            steps.push(Step::from_raw(pair[0], pair[1])?);
        }
        Some(Move { steps })
    }
}

impl Ord for Move {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_raw().cmp(&other.to_raw())
    }
}

impl PartialOrd for Move {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_pass() {
            return write!(f, "pass");
        }
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}

impl FromStr for Move {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();
        if input == "pass" {
            return Ok(Move::pass());
        }
        let mut steps = ArrayVec::new();
        for word in input.split_whitespace() {
            let step = word.parse()?;
            steps
                .try_push(step)
                .map_err(|_| format!("Move \"{}\" has more than {} steps", input, MAX_STEPS))?;
        }
        if steps.is_empty() {
            return Err("Empty move".to_string());
        }
        Ok(Move { steps })
    }
}
