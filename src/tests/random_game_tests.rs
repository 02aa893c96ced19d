use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::position::{Dice, Player, Position};
use crate::search;
use crate::tests::check_move_legality;

#[test]
fn play_random_games_test() {
    let mut rng = SmallRng::seed_from_u64(2024);

    for _ in 0..20 {
        let mut position = Position::start_position();
        for _ in 0..400 {
            let dice = Dice::roll(&mut rng);
            let candidates = search::ranked_moves(&position, dice, usize::MAX);
            for candidate in candidates.iter() {
                check_move_legality(&position, dice, &candidate.mv);
            }
            assert!(candidates
                .windows(2)
                .all(|pair| pair[0].score >= pair[1].score));

            // Rolls where only one die can be played have no candidates
            if let Some(candidate) = candidates.choose(&mut rng) {
                position.do_move(&candidate.mv).unwrap();
            }
            assert_eq!(
                Position::from_position_id(&position.position_id()),
                Ok(position)
            );

            if position.checkers_on_board(Player::Mover) == 0 {
                break;
            }
            position = position.flip();
        }
    }
}

#[test]
fn random_positions_are_deterministic_test() {
    let mut rng = SmallRng::seed_from_u64(7);
    let mut position = Position::start_position();
    for _ in 0..60 {
        let dice = Dice::roll(&mut rng);
        let first = search::ranked_moves(&position, dice, 10);
        let second = search::ranked_moves(&position, dice, 10);
        assert_eq!(first, second);
        if let Some(best) = first.first() {
            position.do_move(&best.mv).unwrap();
        }
        position = position.flip();
    }
}
