use crate::engine::HintError;
use crate::position::{Player, Position, PositionIdError, BAR};
use crate::tests::position_from_sides;

#[test]
fn start_position_id_test() {
    assert_eq!(Position::start_position().position_id(), "4HPwATDgc/ABMA");
    assert_eq!(
        Position::from_position_id("4HPwATDgc/ABMA").unwrap(),
        Position::start_position()
    );
}

#[test]
fn position_ids_test() {
    let bear_off = position_from_sides(&[(0, 2), (1, 1)], &[(0, 15)]);
    assert_eq!(bear_off.position_id(), "CwAA8P8HAAAAAA");

    let mut blocked_sides = vec![(12, 3)];
    blocked_sides.extend((0..6).map(|point| (point, 2)));
    let blocked = position_from_sides(&[(BAR, 1), (5, 14)], &blocked_sides);
    assert_eq!(blocked.position_id(), "4P8HAEDbtgEHAA");

    let empty = Position::empty();
    assert_eq!(empty.position_id(), "AAAAAAAAAAAAAA");

    for position in [bear_off, blocked, empty] {
        assert_eq!(
            Position::from_position_id(&position.position_id()).unwrap(),
            position
        );
    }
}

#[test]
fn decoded_position_keeps_bar_checkers_test() {
    let position = Position::from_position_id("4HPwAFiSz8EHAA").unwrap();
    assert_eq!(position.bar(Player::Mover), 1);
    assert_eq!(position.bar(Player::Opponent), 0);
    assert_eq!(position[Player::Opponent][1], 1);
    assert_eq!(position[Player::Opponent][3], 1);
    assert_eq!(position.checkers_on_board(Player::Mover), 15);
    assert_eq!(position.checkers_on_board(Player::Opponent), 15);
}

#[test]
fn malformed_position_ids_test() {
    assert_eq!(Position::from_position_id(""), Err(PositionIdError::Empty));
    assert_eq!(
        Position::from_position_id("4HPwATDgc/AB"),
        Err(PositionIdError::WrongLength(12))
    );
    assert_eq!(
        Position::from_position_id("4HPwATDgc/ABMAA"),
        Err(PositionIdError::WrongLength(15))
    );
    assert_eq!(
        Position::from_position_id("4HPwATDgc/AB!A"),
        Err(PositionIdError::InvalidCharacter('!'))
    );
    assert_eq!(
        Position::from_position_id("4HPwATDgc/ABMæ"),
        Err(PositionIdError::InvalidCharacter('æ'))
    );
}

#[test]
fn position_id_error_messages_test() {
    assert_eq!(
        PositionIdError::WrongLength(12).to_string(),
        "position id must be 14 characters, got 12"
    );
    assert_eq!(
        PositionIdError::InvalidCharacter('!').to_string(),
        "invalid character '!' in position id"
    );
    assert_eq!(
        HintError::from(PositionIdError::WrongLength(15)).to_string(),
        "invalid position id: position id must be 14 characters, got 15"
    );
}

#[test]
fn position_id_bit_stream_errors_test() {
    assert_eq!(
        Position::from_position_id("//////////////"),
        Err(PositionIdError::Truncated)
    );
    assert_eq!(
        Position::from_position_id("AAAAAAAABAAAAA"),
        Err(PositionIdError::TrailingCheckers)
    );
    assert!(matches!(
        Position::from_position_id("//8AAAAAAAAAAA"),
        Err(PositionIdError::InvalidPosition(_))
    ));
    // Both players on the mover's 1-point
    assert!(matches!(
        Position::from_position_id("AQAAAAAAAgAAAA"),
        Err(PositionIdError::InvalidPosition(_))
    ));
}
