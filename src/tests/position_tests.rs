use crate::position::{
    mirror, Dice, Move, Player, Position, Source, Step, Target, BAR, NUM_CHECKERS,
};
use crate::tests::position_from_sides;

#[test]
fn start_position_test() {
    let position = Position::start_position();
    for player in [Player::Mover, Player::Opponent] {
        assert_eq!(position.checkers_on_board(player), NUM_CHECKERS as u32);
        assert_eq!(position.pip_count(player), 167);
        assert_eq!(position.borne_off(player), 0);
        assert_eq!(position.bar(player), 0);
    }
    assert!(!position.all_checkers_in_home());
    assert_eq!(position, position.flip());
    assert_eq!(position, Position::default());
}

#[test]
fn pip_count_counts_bar_as_25_test() {
    let position = position_from_sides(&[(BAR, 2), (0, 1)], &[(22, 1)]);
    assert_eq!(position.pip_count(Player::Mover), 51);
    assert_eq!(position.pip_count(Player::Opponent), 23);
    assert_eq!(position.borne_off(Player::Mover), 12);
}

#[test]
fn all_checkers_in_home_test() {
    let home = position_from_sides(&[(0, 5), (5, 10)], &[(0, 15)]);
    assert!(home.all_checkers_in_home());

    let outside = position_from_sides(&[(0, 5), (6, 1)], &[(0, 15)]);
    assert!(!outside.all_checkers_in_home());

    let on_bar = position_from_sides(&[(0, 5), (BAR, 1)], &[(0, 15)]);
    assert!(!on_bar.all_checkers_in_home());
}

#[test]
fn invalid_positions_are_rejected_test() {
    let mut checkers = [[0; 25]; 2];
    checkers[0][5] = 16;
    assert!(Position::from_checkers(checkers).is_err());

    // Mover's point 6 is the opponent's point 19
    let mut checkers = [[0; 25]; 2];
    checkers[0][5] = 2;
    checkers[1][mirror(5)] = 1;
    assert!(Position::from_checkers(checkers).is_err());

    let mut checkers = [[0; 25]; 2];
    checkers[0][BAR] = 2;
    checkers[1][BAR] = 2;
    assert!(Position::from_checkers(checkers).is_ok());
}

#[test]
fn flip_swaps_players_test() {
    let position = position_from_sides(&[(3, 2), (BAR, 1)], &[(10, 4)]);
    let flipped = position.flip();
    assert_eq!(flipped[Player::Mover][10], 4);
    assert_eq!(flipped[Player::Opponent][3], 2);
    assert_eq!(flipped.bar(Player::Opponent), 1);
    assert_eq!(flipped.flip(), position);
}

#[test]
fn do_step_hits_blot_test() {
    let mut position = position_from_sides(&[(7, 2)], &[(mirror(4), 1), (mirror(3), 2)]);
    let outcome = position
        .do_step(Step::new(Source::Point(7), Target::Point(4)))
        .unwrap();
    assert!(outcome.hit);
    assert_eq!(position.bar(Player::Opponent), 1);
    assert_eq!(position.opponent_checkers_at(4), 0);
    assert_eq!(position[Player::Mover][4], 1);

    assert!(position
        .do_step(Step::new(Source::Point(7), Target::Point(3)))
        .is_err());
}

#[test]
fn do_step_requires_bar_entry_first_test() {
    let mut position = position_from_sides(&[(BAR, 1), (12, 2)], &[(0, 2)]);
    assert!(position
        .do_step(Step::new(Source::Point(12), Target::Point(9)))
        .is_err());
    let outcome = position
        .do_step(Step::new(Source::Bar, Target::Point(20)))
        .unwrap();
    assert!(!outcome.hit);
    assert_eq!(position.bar(Player::Mover), 0);
    assert!(position
        .do_step(Step::new(Source::Point(12), Target::Point(9)))
        .is_ok());
}

#[test]
fn do_step_bear_off_needs_all_home_test() {
    let mut position = position_from_sides(&[(0, 1), (8, 1)], &[(0, 2)]);
    assert!(position
        .do_step(Step::new(Source::Point(0), Target::Off))
        .is_err());
    position
        .do_step(Step::new(Source::Point(8), Target::Point(3)))
        .unwrap();
    let outcome = position
        .do_step(Step::new(Source::Point(0), Target::Off))
        .unwrap();
    assert!(outcome.borne_off);
    assert_eq!(position.borne_off(Player::Mover), 14);
}

#[test]
fn do_step_rejects_backwards_and_empty_test() {
    let mut position = Position::start_position();
    assert!(position
        .do_step(Step::new(Source::Point(5), Target::Point(8)))
        .is_err());
    assert!(position
        .do_step(Step::new(Source::Point(4), Target::Point(2)))
        .is_err());
    assert!(position
        .do_step(Step::new(Source::Point(24), Target::Point(20)))
        .is_err());
    assert!(position
        .do_step(Step::new(Source::Bar, Target::Point(20)))
        .is_err());
    assert_eq!(position, Position::start_position());
}

#[test]
fn move_notation_test() {
    let mv: Move = "24/21 13/9*".parse().unwrap();
    assert_eq!(mv.to_raw(), [23, 20, 12, 8, -1, -1, -1, -1]);
    assert_eq!(mv.to_string(), "24/21 13/9");

    let mv: Move = "bar/22 6/off".parse().unwrap();
    assert_eq!(mv.to_raw(), [24, 21, 5, -1, -1, -1, -1, -1]);
    assert_eq!(mv.to_string(), "bar/22 6/off");

    let pass: Move = "pass".parse().unwrap();
    assert!(pass.is_pass());
    assert_eq!(pass.to_raw(), [-1; 8]);
    assert_eq!(pass.to_string(), "pass");

    assert!("".parse::<Move>().is_err());
    assert!("25/20".parse::<Move>().is_err());
    assert!("13-9".parse::<Move>().is_err());
    assert!("6/5 6/5 6/5 6/5 6/5".parse::<Move>().is_err());
}

#[test]
fn move_from_raw_test() {
    let raw = [24, 22, 7, 1, -1, -1, -1, -1];
    let mv = Move::from_raw(&raw).unwrap();
    assert_eq!(mv.to_string(), "bar/23 8/2");
    assert_eq!(mv.to_raw(), raw);
    assert_eq!(Move::from_raw(&[-1; 8]), Some(Move::pass()));
    assert_eq!(Move::from_raw(&[30, 2, -1, -1, -1, -1, -1, -1]), None);
}

#[test]
fn move_order_follows_raw_array_test() {
    let pass = Move::pass();
    let bear_off: Move = "1/off".parse().unwrap();
    let low: Move = "6/2 6/3".parse().unwrap();
    let high: Move = "8/4 6/3".parse().unwrap();
    assert!(pass < bear_off);
    assert!(bear_off < low);
    assert!(low < high);
}

#[test]
fn parse_dice_test() {
    for input in ["3 1", "3,1", "[3,1]", "31", " [3, 1] "] {
        let dice: Dice = input.parse().unwrap();
        assert_eq!((dice.first(), dice.second()), (3, 1), "{}", input);
    }
    for input in ["", "3", "7 1", "0,2", "3 1 2", "ab"] {
        assert!(input.parse::<Dice>().is_err(), "{}", input);
    }
    assert_eq!(Dice::new(6, 6).unwrap().to_string(), "66");
}

#[test]
fn dice_sequences_test() {
    let double = Dice::new(3, 3).unwrap();
    let sequences = double.sequences();
    assert_eq!(sequences.len(), 1);
    assert_eq!(sequences[0].as_slice(), &[3, 3, 3, 3]);

    let sequences = Dice::new(3, 4).unwrap().sequences();
    assert_eq!(sequences.len(), 2);
    assert_eq!(sequences[0].as_slice(), &[3, 4]);
    assert_eq!(sequences[1].as_slice(), &[4, 3]);
}
