//! The backgammon board, along with moves, dice and position IDs.
//!
//! Both players' checkers are stored from their own point of view: index 0 is the point
//! closest to home, 23 the point furthest away, and index 24 is the bar.
//! The player on roll is always [`Player::Mover`].

use std::fmt::Write;
use std::ops::Index;
use std::{fmt, ops};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use dice::Dice;
pub use mv::{Move, Source, Step, Target, MAX_STEPS, SENTINEL};
pub use position_id::PositionIdError;

mod dice;
mod mv;
mod position_id;

/// Number of playable points on the board
pub const NUM_POINTS: usize = 24;
/// Index of the bar in each player's checker array
pub const BAR: usize = 24;
pub const NUM_SLOTS: usize = 25;
pub const NUM_CHECKERS: u8 = 15;
/// Points `0..HOME_POINTS` form each player's home board
pub const HOME_POINTS: usize = 6;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Player {
    /// The player on roll
    Mover,
    Opponent,
}

impl Player {
    pub const fn index(self) -> usize {
        match self {
            Player::Mover => 0,
            Player::Opponent => 1,
        }
    }
}

impl ops::Not for Player {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Player::Mover => Player::Opponent,
            Player::Opponent => Player::Mover,
        }
    }
}

/// The point index as seen by the other player
pub const fn mirror(point: usize) -> usize {
    NUM_POINTS - 1 - point
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StepOutcome {
    pub hit: bool,
    pub borne_off: bool,
}

/// A backgammon position, from the point of view of the player on roll.
///
/// The position is a small `Copy` value. Search code takes a fresh copy for every branch
/// instead of undoing moves.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    checkers: [[u8; NUM_SLOTS]; 2],
}

impl Default for Position {
    fn default() -> Self {
        Self::start_position()
    }
}

impl Index<Player> for Position {
    type Output = [u8; NUM_SLOTS];

    fn index(&self, player: Player) -> &Self::Output {
        &self.checkers[player.index()]
    }
}

impl Position {
    pub fn start_position() -> Self {
        let mut side = [0; NUM_SLOTS];
        side[5] = 5;
        side[7] = 3;
        side[12] = 5;
        side[23] = 2;
        Position {
            checkers: [side, side],
        }
    }

    pub fn empty() -> Self {
        Position {
            checkers: [[0; NUM_SLOTS]; 2],
        }
    }

    /// Build a position from raw checker counts, `[mover, opponent]`.
    ///
    /// Fails if a player has more than 15 checkers, or if both players have checkers on the same point.
    pub fn from_checkers(checkers: [[u8; NUM_SLOTS]; 2]) -> Result<Self, String> {
        let position = Position { checkers };
        for player in [Player::Mover, Player::Opponent] {
            let on_board = position.checkers_on_board(player);
            if on_board > NUM_CHECKERS as u32 {
                return Err(format!(
                    "{:?} has {} checkers, at most {} are allowed",
                    player, on_board, NUM_CHECKERS
                ));
            }
        }
        if let Some(point) = (0..NUM_POINTS).find(|&point| {
            position[Player::Mover][point] > 0 && position[Player::Opponent][mirror(point)] > 0
        }) {
            return Err(format!("Point {} is occupied by both players", point + 1));
        }
        Ok(position)
    }

    pub fn checkers(&self) -> &[[u8; NUM_SLOTS]; 2] {
        &self.checkers
    }

    /// The same position, with the opponent on roll
    pub fn flip(&self) -> Self {
        Position {
            checkers: [self.checkers[1], self.checkers[0]],
        }
    }

    pub(crate) fn side_mut(&mut self, player: Player) -> &mut [u8; NUM_SLOTS] {
        &mut self.checkers[player.index()]
    }

    pub fn bar(&self, player: Player) -> u8 {
        self[player][BAR]
    }

    pub fn checkers_on_board(&self, player: Player) -> u32 {
        self[player].iter().map(|&n| n as u32).sum()
    }

    pub fn borne_off(&self, player: Player) -> u32 {
        (NUM_CHECKERS as u32).saturating_sub(self.checkers_on_board(player))
    }

    /// Total distance the player's checkers need to travel to get home. Checkers on the bar count as 25 pips.
    pub fn pip_count(&self, player: Player) -> u32 {
        let side = &self[player];
        let on_points: u32 = side[..NUM_POINTS]
            .iter()
            .enumerate()
            .map(|(point, &n)| (point as u32 + 1) * n as u32)
            .sum();
        on_points + 25 * side[BAR] as u32
    }

    /// Whether the player on roll may bear off.
    pub fn all_checkers_in_home(&self) -> bool {
        let side = &self[Player::Mover];
        side[BAR] == 0 && side[HOME_POINTS..NUM_POINTS].iter().all(|&n| n == 0)
    }

    /// Number of opponent checkers on the point the mover calls `point`
    pub fn opponent_checkers_at(&self, point: usize) -> u8 {
        self[Player::Opponent][mirror(point)]
    }

    /// Send a lone opponent checker on the mover's `point` to the bar. Returns whether there was a hit.
    pub(crate) fn hit_blot(&mut self, point: usize) -> bool {
        let opponent_point = mirror(point);
        if self[Player::Opponent][opponent_point] == 1 {
            self.side_mut(Player::Opponent)[opponent_point] = 0;
            self.side_mut(Player::Opponent)[BAR] += 1;
            true
        } else {
            false
        }
    }

    /// Play a single step for the mover, checking that it is legal on the current position.
    ///
    /// This does not know which die was used, so it only checks the rules of the board itself:
    /// bar priority, blocked points and bear-off eligibility.
    pub fn do_step(&mut self, step: Step) -> Result<StepOutcome, String> {
        let from = match step.from {
            Source::Bar => BAR,
            Source::Point(point) => {
                if self.bar(Player::Mover) > 0 {
                    return Err(format!(
                        "Cannot move {} while a checker is on the bar",
                        step
                    ));
                }
                if point as usize >= NUM_POINTS {
                    return Err(format!("No such point in {}", step));
                }
                point as usize
            }
        };
        if self[Player::Mover][from] == 0 {
            return Err(format!("No checker to move in {}", step));
        }
        match step.to {
            Target::Off => {
                if !self.all_checkers_in_home() {
                    return Err(format!(
                        "Cannot bear off in {}, not all checkers are home",
                        step
                    ));
                }
                self.side_mut(Player::Mover)[from] -= 1;
                Ok(StepOutcome {
                    hit: false,
                    borne_off: true,
                })
            }
            Target::Point(to) => {
                let to = to as usize;
                if to >= NUM_POINTS || (from != BAR && to >= from) {
                    return Err(format!("{} does not move towards home", step));
                }
                if self.opponent_checkers_at(to) >= 2 {
                    return Err(format!("{} lands on a blocked point", step));
                }
                let hit = self.hit_blot(to);
                self.side_mut(Player::Mover)[from] -= 1;
                self.side_mut(Player::Mover)[to] += 1;
                Ok(StepOutcome {
                    hit,
                    borne_off: false,
                })
            }
        }
    }

    /// Play every step of a move, returning the outcome of each step.
    pub fn do_move(&mut self, mv: &Move) -> Result<Vec<StepOutcome>, String> {
        mv.steps().iter().map(|&step| self.do_step(step)).collect()
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut output = String::new();
        // Points are printed in the mover's numbering, 24 down to 1, positive counts for the mover
        for point in (0..NUM_POINTS).rev() {
            let ours = self[Player::Mover][point];
            let theirs = self.opponent_checkers_at(point);
            if ours > 0 {
                write!(output, "{:>3}", ours)?;
            } else if theirs > 0 {
                write!(output, "{:>3}", -(theirs as i16))?;
            } else {
                output.push_str("  .");
            }
            if point == 12 {
                output.push('\n');
            }
        }
        writeln!(
            f,
            "{}\nBar: {} / {}, pips: {} / {}",
            output,
            self.bar(Player::Mover),
            self.bar(Player::Opponent),
            self.pip_count(Player::Mover),
            self.pip_count(Player::Opponent)
        )
    }
}
