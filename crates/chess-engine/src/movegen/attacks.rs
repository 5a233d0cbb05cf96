//! Step tables and attack queries for all piece kinds.
//!
//! Offsets are `(row delta, col delta)` pairs in board orientation, so a
//! negative row delta moves toward rank 8.

use chess_core::{Board, Color, Piece, Square};

/// Knight jumps.
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// King steps, also the union of the slider directions.
pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Diagonal rays.
pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Orthogonal rays.
pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];

/// Ray directions of a sliding piece.
pub fn slider_directions(piece: Piece) -> &'static [(i8, i8)] {
    match piece {
        Piece::Bishop => &BISHOP_DIRECTIONS,
        Piece::Rook => &ROOK_DIRECTIONS,
        Piece::Queen => &KING_OFFSETS,
        _ => &[],
    }
}

/// Squares a pawn of `color` on `sq` attacks.
pub fn pawn_attacks(sq: Square, color: Color) -> impl Iterator<Item = Square> {
    [-1, 1]
        .into_iter()
        .filter_map(move |d_col| sq.offset(color.forward(), d_col))
}

/// Returns the first occupied square along a ray, with its contents.
pub fn first_blocker(
    board: &Board,
    from: Square,
    (d_row, d_col): (i8, i8),
) -> Option<(Square, Piece, Color)> {
    let mut sq = from;
    while let Some(next) = sq.offset(d_row, d_col) {
        if let Some((piece, color)) = board.get(next) {
            return Some((next, piece, color));
        }
        sq = next;
    }
    None
}

/// Returns true if any piece of `by` attacks `sq`.
///
/// Looks outward from the target square for each attacker kind, which gives
/// the same answer as asking whether some pseudo-legal capture of `by` lands
/// on `sq`.
pub fn is_square_attacked(board: &Board, sq: Square, by: Color) -> bool {
    let holds = |target: Option<Square>, piece: Piece| {
        target.is_some_and(|t| board.get(t) == Some((piece, by)))
    };

    // A pawn of `by` attacks forward-diagonally, so look one step backwards.
    if [-1, 1]
        .into_iter()
        .any(|d_col| holds(sq.offset(-by.forward(), d_col), Piece::Pawn))
    {
        return true;
    }

    if KNIGHT_OFFSETS
        .iter()
        .any(|&(dr, dc)| holds(sq.offset(dr, dc), Piece::Knight))
    {
        return true;
    }

    if KING_OFFSETS
        .iter()
        .any(|&(dr, dc)| holds(sq.offset(dr, dc), Piece::King))
    {
        return true;
    }

    let ray_hits = |directions: &[(i8, i8)], slider: Piece| {
        directions.iter().any(|&dir| {
            matches!(
                first_blocker(board, sq, dir),
                Some((_, piece, color)) if color == by && (piece == slider || piece == Piece::Queen)
            )
        })
    };

    ray_hits(&BISHOP_DIRECTIONS[..], Piece::Bishop) || ray_hits(&ROOK_DIRECTIONS[..], Piece::Rook)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn pawn_attacks_by_color() {
        let white: Vec<_> = pawn_attacks(sq("e4"), Color::White).collect();
        assert_eq!(white, vec![sq("d5"), sq("f5")]);

        let black: Vec<_> = pawn_attacks(sq("e4"), Color::Black).collect();
        assert_eq!(black, vec![sq("d3"), sq("f3")]);

        let edge: Vec<_> = pawn_attacks(sq("a2"), Color::White).collect();
        assert_eq!(edge, vec![sq("b3")]);
    }

    #[test]
    fn startpos_attacks() {
        let board = Board::standard();
        assert!(is_square_attacked(&board, sq("e3"), Color::White));
        assert!(is_square_attacked(&board, sq("f3"), Color::White));
        assert!(!is_square_attacked(&board, sq("e4"), Color::White));
        assert!(is_square_attacked(&board, sq("f6"), Color::Black));
        assert!(!is_square_attacked(&board, sq("e5"), Color::Black));
    }

    #[test]
    fn sliders_are_blocked() {
        let board = Board::from_fen_placement("4k3/8/8/8/8/8/4P3/4R2K");
        // The rook on e1 is screened from e8 by the pawn on e2.
        assert!(!is_square_attacked(&board, sq("e8"), Color::White));
        assert!(is_square_attacked(&board, sq("e2"), Color::White));
        assert!(is_square_attacked(&board, sq("a1"), Color::White));
    }

    #[test]
    fn queen_attacks_both_ways() {
        let board = Board::from_fen_placement("4k3/8/8/3q4/8/8/8/K7");
        assert!(is_square_attacked(&board, sq("a2"), Color::Black));
        assert!(is_square_attacked(&board, sq("d1"), Color::Black));
        assert!(is_square_attacked(&board, sq("h5"), Color::Black));
        assert!(!is_square_attacked(&board, sq("e3"), Color::Black));
    }

    #[test]
    fn knight_and_king_attacks() {
        let board = Board::from_fen_placement("4k3/8/8/8/8/8/8/N6K");
        assert!(is_square_attacked(&board, sq("b3"), Color::White));
        assert!(is_square_attacked(&board, sq("c2"), Color::White));
        assert!(!is_square_attacked(&board, sq("b2"), Color::White));
        assert!(is_square_attacked(&board, sq("g2"), Color::White));
        assert!(is_square_attacked(&board, sq("d7"), Color::Black));
    }

    #[test]
    fn first_blocker_stops_at_edge() {
        let board = Board::from_fen_placement("4k3/8/8/8/8/8/8/4K3");
        assert_eq!(first_blocker(&board, sq("a1"), (0, -1)), None);
        assert_eq!(
            first_blocker(&board, sq("e4"), (-1, 0)),
            Some((sq("e8"), Piece::King, Color::Black))
        );
    }
}
