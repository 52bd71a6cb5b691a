use once_cell::sync::Lazy;

use crate::board::{BOARD_SIZE, Board, Color, Position};
use crate::game::MoveSelector;

const CORNER_BONUS: i32 = 100;
const EDGE_BONUS: i32 = 20;
const NEAR_CORNER_PENALTY: i32 = -50;

/// A corner cell and its three neighbors, the cells that hand the corner to
/// the opponent while the corner is still empty.
struct CornerZone {
    corner: Position,
    neighbors: [Position; 3],
}

static CORNER_ZONES: Lazy<[CornerZone; 4]> = Lazy::new(|| {
    let hi = (BOARD_SIZE - 1) as u8;
    [(0, 0), (0, hi), (hi, 0), (hi, hi)].map(|(r, c)| {
        let nr = if r == 0 { 1 } else { hi - 1 };
        let nc = if c == 0 { 1 } else { hi - 1 };
        CornerZone {
            corner: Position::new(r, c),
            neighbors: [
                Position::new(r, nc),
                Position::new(nr, c),
                Position::new(nr, nc),
            ],
        }
    })
});

/// One-ply greedy selector: raw flip count plus a static positional bonus.
///
/// Corners dominate (+100), edges are worth taking (+20), and handing out an
/// empty corner costs dearly (-50). No search, no opponent modeling; ties keep
/// the first candidate in row-major order, so selection is deterministic.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicSelector;

impl MoveSelector for HeuristicSelector {
    fn select_move(&self, board: &Board, color: Color) -> Option<Position> {
        let mut best: Option<(Position, i32)> = None;
        for pos in board.legal_moves(color) {
            let score = board.flip_count(pos, color) as i32 + positional_bonus(board, pos);
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((pos, score));
            }
        }
        best.map(|(pos, _)| pos)
    }
}

fn positional_bonus(board: &Board, pos: Position) -> i32 {
    let hi = (BOARD_SIZE - 1) as u8;
    let edge_row = pos.row == 0 || pos.row == hi;
    let edge_col = pos.col == 0 || pos.col == hi;

    if edge_row && edge_col {
        CORNER_BONUS
    } else if edge_row || edge_col {
        EDGE_BONUS
    } else if next_to_empty_corner(board, pos) {
        NEAR_CORNER_PENALTY
    } else {
        0
    }
}

fn next_to_empty_corner(board: &Board, pos: Position) -> bool {
    CORNER_ZONES
        .iter()
        .any(|zone| board.cell(zone.corner).is_none() && zone.neighbors.contains(&pos))
}
