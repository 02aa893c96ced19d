#[cfg(test)]
mod position_id_tests;
#[cfg(test)]
mod position_tests;
#[cfg(test)]
mod random_game_tests;

#[cfg(test)]
use crate::position::{Dice, Move, Player, Position, Source, Target, BAR};

#[cfg(test)]
fn dice(first: u8, second: u8) -> Dice {
    Dice::new(first, second).unwrap()
}

#[cfg(test)]
fn position_from_sides(mover: &[(usize, u8)], opponent: &[(usize, u8)]) -> Position {
    let mut checkers = [[0; 25]; 2];
    for &(point, count) in mover {
        checkers[0][point] = count;
    }
    for &(point, count) in opponent {
        checkers[1][point] = count;
    }
    Position::from_checkers(checkers).unwrap()
}

/// Check that `mv` is a legal way to play `dice` on `position`, and that no checkers appear or disappear.
#[cfg(test)]
fn check_move_legality(position: &Position, dice: Dice, mv: &Move) {
    if mv.is_pass() {
        return;
    }
    let uses_dice = dice.sequences().iter().any(|sequence| {
        sequence.len() == mv.steps().len()
            && sequence.iter().zip(mv.steps()).all(|(&die, step)| {
                let from = match step.from {
                    Source::Bar => BAR,
                    Source::Point(point) => point as usize,
                };
                match step.to {
                    Target::Point(to) => from - to as usize == die as usize,
                    Target::Off => (die as usize) > from,
                }
            })
    });
    assert!(
        uses_dice,
        "Move {} does not match dice {} on\n{:?}",
        mv, dice, position
    );

    let mut after = *position;
    let outcomes = after
        .do_move(mv)
        .unwrap_or_else(|err| panic!("Illegal move {}: {}\n{:?}", mv, err, position));

    let borne_off = outcomes.iter().filter(|outcome| outcome.borne_off).count() as u32;
    let hits = outcomes.iter().filter(|outcome| outcome.hit).count() as u8;
    assert_eq!(
        after.checkers_on_board(Player::Mover) + borne_off,
        position.checkers_on_board(Player::Mover),
        "Checkers of the mover not conserved after {}",
        mv
    );
    assert_eq!(
        after.checkers_on_board(Player::Opponent),
        position.checkers_on_board(Player::Opponent),
        "Checkers of the opponent not conserved after {}",
        mv
    );
    assert_eq!(
        after.bar(Player::Opponent),
        position.bar(Player::Opponent) + hits
    );
    assert!(Position::from_checkers(*after.checkers()).is_ok());
}
