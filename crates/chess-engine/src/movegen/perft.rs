//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the move generator.
//! Moves are played and taken back on a single position, so a count that
//! matches the reference also exercises undo.

use super::generate_moves;
use crate::Position;

/// Counts the number of leaf nodes at the given depth.
///
/// This is the standard perft function used to validate move generators.
pub fn perft(position: &Position, depth: u32) -> u64 {
    let mut scratch = position.clone();
    perft_in_place(&mut scratch, depth)
}

fn perft_in_place(position: &mut Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = generate_moves(position);

    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for m in &moves {
        let undo = position.play(*m);
        nodes += perft_in_place(position, depth - 1);
        position.unplay(*m, undo);
    }
    nodes
}

/// Perft with divide - shows node count for each move at depth-1.
/// Useful for debugging to identify which moves have incorrect counts.
pub fn perft_divide(position: &Position, depth: u32) -> Vec<(String, u64)> {
    let moves = generate_moves(position);
    let mut results = Vec::with_capacity(moves.len());
    let mut scratch = position.clone();

    for m in &moves {
        let undo = scratch.play(*m);
        let nodes = if depth > 1 {
            perft_in_place(&mut scratch, depth - 1)
        } else {
            1
        };
        scratch.unplay(*m, undo);
        results.push((m.to_algebraic(), nodes));
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
