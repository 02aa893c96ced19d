use std::fmt;
use std::str::FromStr;

use arrayvec::ArrayVec;
use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::position::MAX_STEPS;

/// A roll of two dice. The order is kept, since it decides which ordering is searched first.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Dice {
    first: u8,
    second: u8,
}

impl Dice {
    pub fn new(first: u8, second: u8) -> Option<Self> {
        if (1..=6).contains(&first) && (1..=6).contains(&second) {
            Some(Dice { first, second })
        } else {
            None
        }
    }

    pub fn roll<R: Rng>(rng: &mut R) -> Self {
        Dice {
            first: rng.gen_range(1..=6),
            second: rng.gen_range(1..=6),
        }
    }

    pub fn first(self) -> u8 {
        self.first
    }

    pub fn second(self) -> u8 {
        self.second
    }

    pub fn is_double(self) -> bool {
        self.first == self.second
    }

    /// The die sequences to search: four plies of the same value for a double,
    /// otherwise both orderings of the two dice.
    pub fn sequences(self) -> ArrayVec<ArrayVec<u8, MAX_STEPS>, 2> {
        let mut sequences = ArrayVec::new();
        if self.is_double() {
            sequences.push([self.first; MAX_STEPS].into_iter().collect());
        } else {
            sequences.push([self.first, self.second].into_iter().collect());
            sequences.push([self.second, self.first].into_iter().collect());
        }
        sequences
    }
}

impl fmt::Display for Dice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.first, self.second)
    }
}

/// Parses `"3 1"`, `"3,1"`, `"[3,1]"` and `"31"`.
impl FromStr for Dice {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let cleaned = input.replace(|c: char| c == '[' || c == ']', " ");
        let words: Vec<&str> = cleaned
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|word| !word.is_empty())
            .collect();
        let values: Vec<u8> = match words.as_slice() {
            [word] if word.len() == 2 => word
                .chars()
                .map(|ch| ch.to_digit(10).map(|d| d as u8))
                .collect::<Option<Vec<u8>>>()
                .ok_or_else(|| format!("Invalid dice \"{}\"", input))?,
            [first, second] => vec![
                first
                    .parse()
                    .map_err(|_| format!("Invalid die \"{}\"", first))?,
                second
                    .parse()
                    .map_err(|_| format!("Invalid die \"{}\"", second))?,
            ],
            _ => return Err(format!("Expected two dice, got \"{}\"", input)),
        };
        Dice::new(values[0], values[1])
            .ok_or_else(|| format!("Dice must be between 1 and 6, got \"{}\"", input))
    }
}
