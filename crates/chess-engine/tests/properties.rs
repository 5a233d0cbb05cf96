//! Property tests over random playouts.

use chess_core::Move;
use chess_engine::{is_king_attacked, make_move, GameState, Position};
use proptest::prelude::*;

const POSITIONS: [&str; 4] = [
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
];

/// Plays up to `choices.len()` moves, each picked by index into the legal list.
fn playout(fen: &str, choices: &[usize]) -> GameState {
    let mut game = GameState::from_fen(fen).unwrap();
    for &choice in choices {
        let moves = game.legal_moves();
        if moves.is_empty() || game.status().is_over() {
            break;
        }
        game.make_move(moves[choice % moves.len()]).unwrap();
    }
    game
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn undo_reverses_every_move(
        start in 0..POSITIONS.len(),
        choices in prop::collection::vec(any::<usize>(), 0..40),
    ) {
        let mut game = GameState::from_fen(POSITIONS[start]).unwrap();
        let mut seen: Vec<Position> = vec![game.position().clone()];
        for &choice in &choices {
            let moves = game.legal_moves();
            if moves.is_empty() || game.status().is_over() {
                break;
            }
            game.make_move(moves[choice % moves.len()]).unwrap();
            seen.push(game.position().clone());
        }

        while let Some(expected) = seen.pop() {
            prop_assert_eq!(game.position(), &expected);
            if game.undo_move().is_none() {
                break;
            }
        }
        prop_assert_eq!(game.ply_count(), 0);
        prop_assert!(seen.is_empty());
    }

    #[test]
    fn legal_moves_never_leave_king_attacked(
        start in 0..POSITIONS.len(),
        choices in prop::collection::vec(any::<usize>(), 0..30),
    ) {
        let game = playout(POSITIONS[start], &choices);
        let us = game.side_to_move();
        for m in game.legal_moves().iter() {
            let after = make_move(game.position(), *m);
            prop_assert!(!is_king_attacked(&after, us), "{} leaves the king attacked", m);
        }
    }

    #[test]
    fn notation_round_trips(
        start in 0..POSITIONS.len(),
        choices in prop::collection::vec(any::<usize>(), 0..30),
    ) {
        let game = playout(POSITIONS[start], &choices);
        for m in game.legal_moves().iter() {
            let text = m.to_algebraic();
            let parsed = Move::from_algebraic(&text, game.board()).unwrap();
            prop_assert_eq!(parsed, *m);
            prop_assert_eq!(parsed.flag(), m.flag());
            prop_assert_eq!(parsed.captured(), m.captured());
        }
    }

    #[test]
    fn record_replays_any_playout(
        start in 0..POSITIONS.len(),
        choices in prop::collection::vec(any::<usize>(), 0..30),
    ) {
        let game = playout(POSITIONS[start], &choices);
        let replayed = GameState::from_record(&game.record()).unwrap();
        prop_assert_eq!(replayed.position(), game.position());
        prop_assert_eq!(replayed.status(), game.status());
    }
}
