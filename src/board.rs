use serde::Serialize;

use crate::error::MoveError;

/// Number of cells on one edge of the board.
pub const BOARD_SIZE: usize = 8;
/// Total number of cells.
pub const NUM_CELLS: usize = BOARD_SIZE * BOARD_SIZE;

const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// One of the two players. A cell holds `Option<Color>`, `None` being empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    White,
}

impl std::ops::Not for Color {
    type Output = Self;

    /// The other player.
    fn not(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

/// A board coordinate, row and column both in `0..BOARD_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub fn new(row: u8, col: u8) -> Self {
        assert!(
            (row as usize) < BOARD_SIZE && (col as usize) < BOARD_SIZE,
            "position ({row}, {col}) is off the board"
        );
        Self { row, col }
    }

    /// One step along a direction vector, `None` past the board edge.
    fn step(self, dr: i32, dc: i32) -> Option<Self> {
        let row = self.row as i32 + dr;
        let col = self.col as i32 + dc;
        if in_bounds(row, col) {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }
}

/// Disc counts for both players, always recomputed from a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Score {
    pub black: u8,
    pub white: u8,
}

/// Result of applying a legal move: the successor board and the discs it flipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub board: Board,
    pub flipped: Vec<Position>,
}

/// An 8x8 Othello board.
///
/// Boards are immutable values: [`Board::apply_move`] returns a fresh board and
/// never touches the input, so speculative evaluation can never corrupt a board
/// held elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Color>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates the initial board: white on the main-diagonal center pair,
    /// black on the anti-diagonal pair.
    pub fn new() -> Self {
        let mut cells = [[None; BOARD_SIZE]; BOARD_SIZE];
        let mid = BOARD_SIZE / 2;
        cells[mid - 1][mid - 1] = Some(Color::White);
        cells[mid - 1][mid] = Some(Color::Black);
        cells[mid][mid - 1] = Some(Color::Black);
        cells[mid][mid] = Some(Color::White);
        Self { cells }
    }

    /// Parses a board from an 8-row picture of `'B'`, `'W'` and `'.'`.
    /// Mainly for tests and harnesses; panics on a malformed grid.
    pub fn from_grid(rows: [&str; BOARD_SIZE]) -> Self {
        let mut cells = [[None; BOARD_SIZE]; BOARD_SIZE];
        for (r, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), BOARD_SIZE, "grid row {r} must have {BOARD_SIZE} cells");
            for (c, ch) in row.chars().enumerate() {
                cells[r][c] = match ch {
                    'B' => Some(Color::Black),
                    'W' => Some(Color::White),
                    '.' => None,
                    other => panic!("invalid grid cell {other:?} at ({r}, {c})"),
                };
            }
        }
        Self { cells }
    }

    /// All positions in row-major order, the canonical enumeration order.
    pub fn positions() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE as u8)
            .flat_map(|row| (0..BOARD_SIZE as u8).map(move |col| Position { row, col }))
    }

    pub fn cell(&self, pos: Position) -> Option<Color> {
        self.cells[pos.row as usize][pos.col as usize]
    }

    /// A move is legal iff the cell is empty and at least one direction holds a
    /// bracketed run of opponent discs.
    pub fn is_legal(&self, pos: Position, color: Color) -> bool {
        self.cell(pos).is_none()
            && DIRECTIONS
                .iter()
                .any(|&dir| self.bracket_len(pos, color, dir) > 0)
    }

    /// Legal moves for `color` in row-major order.
    pub fn legal_moves(&self, color: Color) -> Vec<Position> {
        Self::positions()
            .filter(|&pos| self.is_legal(pos, color))
            .collect()
    }

    pub fn has_legal_move(&self, color: Color) -> bool {
        Self::positions().any(|pos| self.is_legal(pos, color))
    }

    /// Total discs that would flip if `color` played `pos`, without building
    /// the successor board. Zero for occupied or non-bracketing cells.
    pub fn flip_count(&self, pos: Position, color: Color) -> usize {
        if self.cell(pos).is_some() {
            return 0;
        }
        DIRECTIONS
            .iter()
            .map(|&dir| self.bracket_len(pos, color, dir))
            .sum()
    }

    /// Plays `pos` for `color`, returning the successor board and the flipped
    /// discs. Legality is established before any cell changes, so a rejected
    /// move can never leave a half-flipped board behind.
    pub fn apply_move(&self, pos: Position, color: Color) -> Result<Placement, MoveError> {
        let flipped = self.flips_for(pos, color);
        if flipped.is_empty() {
            return Err(MoveError::IllegalMove(pos));
        }

        let mut board = *self;
        board.cells[pos.row as usize][pos.col as usize] = Some(color);
        for flip in &flipped {
            board.cells[flip.row as usize][flip.col as usize] = Some(color);
        }

        Ok(Placement { board, flipped })
    }

    /// Disc counts for both players.
    pub fn score(&self) -> Score {
        let mut score = Score { black: 0, white: 0 };
        for pos in Self::positions() {
            match self.cell(pos) {
                Some(Color::Black) => score.black += 1,
                Some(Color::White) => score.white += 1,
                None => {}
            }
        }
        score
    }

    pub fn empty_count(&self) -> usize {
        Self::positions().filter(|&pos| self.cell(pos).is_none()).count()
    }

    /// The game is over when the board is full or neither player can move.
    /// One stuck player alone is a forced skip, not termination.
    pub fn is_terminal(&self) -> bool {
        self.empty_count() == 0
            || (!self.has_legal_move(Color::Black) && !self.has_legal_move(Color::White))
    }

    /// Converts the board to row-major `[u8; 64]` where 0=empty, 1=black, 2=white.
    pub fn to_array(&self) -> [u8; NUM_CELLS] {
        let mut cells = [0u8; NUM_CELLS];
        for (pos, cell) in Self::positions().zip(cells.iter_mut()) {
            *cell = match self.cell(pos) {
                None => 0,
                Some(Color::Black) => 1,
                Some(Color::White) => 2,
            };
        }
        cells
    }

    /// Length of the bracketed opponent run from `pos` along one direction:
    /// one or more opponent discs terminated by an own disc. Zero when the run
    /// hits an empty cell or the edge first.
    fn bracket_len(&self, pos: Position, color: Color, (dr, dc): (i32, i32)) -> usize {
        let mut run = 0;
        let mut cursor = pos.step(dr, dc);
        while let Some(next) = cursor {
            match self.cell(next) {
                Some(c) if c == !color => {
                    run += 1;
                    cursor = next.step(dr, dc);
                }
                Some(_) => return run,
                None => return 0,
            }
        }
        0
    }

    /// Every disc flipped by playing `pos`, across all bracketing directions.
    /// Empty when the move is illegal.
    fn flips_for(&self, pos: Position, color: Color) -> Vec<Position> {
        if self.cell(pos).is_some() {
            return Vec::new();
        }

        let mut flipped = Vec::new();
        for &(dr, dc) in &DIRECTIONS {
            let run_start = flipped.len();
            let mut cursor = pos.step(dr, dc);
            loop {
                match cursor {
                    Some(next) => match self.cell(next) {
                        Some(c) if c == !color => {
                            flipped.push(next);
                            cursor = next.step(dr, dc);
                        }
                        Some(_) => break,
                        None => {
                            flipped.truncate(run_start);
                            break;
                        }
                    },
                    None => {
                        flipped.truncate(run_start);
                        break;
                    }
                }
            }
        }
        flipped
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

fn in_bounds(row: i32, col: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: u8, col: u8) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn initial_board_has_standard_center_layout() {
        let board = Board::new();

        assert_eq!(board.cell(pos(3, 3)), Some(Color::White));
        assert_eq!(board.cell(pos(4, 4)), Some(Color::White));
        assert_eq!(board.cell(pos(3, 4)), Some(Color::Black));
        assert_eq!(board.cell(pos(4, 3)), Some(Color::Black));
        assert_eq!(board.empty_count(), 60);
        assert_eq!(board.score(), Score { black: 2, white: 2 });
    }

    #[test]
    fn initial_black_legal_moves_are_four_expected_squares_in_row_major_order() {
        let board = Board::new();

        assert_eq!(
            board.legal_moves(Color::Black),
            vec![pos(2, 3), pos(3, 2), pos(4, 5), pos(5, 4)]
        );
    }

    #[test]
    fn apply_move_flips_bracketed_run_and_leaves_input_unchanged() {
        let board = Board::new();

        let placement = board.apply_move(pos(2, 3), Color::Black).expect("legal move");

        assert_eq!(placement.board.cell(pos(2, 3)), Some(Color::Black));
        assert_eq!(placement.board.cell(pos(3, 3)), Some(Color::Black));
        assert_eq!(placement.flipped, vec![pos(3, 3)]);
        assert_eq!(placement.board.score(), Score { black: 4, white: 1 });
        // The input board is a distinct value and must be untouched.
        assert_eq!(board, Board::new());
    }

    #[test]
    fn apply_move_rejects_occupied_and_non_bracketing_cells() {
        let board = Board::new();

        assert_eq!(
            board.apply_move(pos(3, 3), Color::Black),
            Err(MoveError::IllegalMove(pos(3, 3)))
        );
        assert_eq!(
            board.apply_move(pos(0, 0), Color::Black),
            Err(MoveError::IllegalMove(pos(0, 0)))
        );
        assert!(!board.is_legal(pos(3, 3), Color::Black));
        assert!(!board.is_legal(pos(0, 0), Color::Black));
    }

    #[test]
    fn flip_count_sums_runs_across_all_bracketing_directions() {
        let board = Board::from_grid([
            ".WWB....",
            "WW......",
            "B.B.....",
            "........",
            "........",
            "........",
            "........",
            "........",
        ]);

        // East flips two, south one, southeast one.
        assert_eq!(board.flip_count(pos(0, 0), Color::Black), 4);

        let placement = board.apply_move(pos(0, 0), Color::Black).expect("legal move");
        assert_eq!(placement.flipped.len(), 4);
        for flip in [pos(0, 1), pos(0, 2), pos(1, 0), pos(1, 1)] {
            assert_eq!(placement.board.cell(flip), Some(Color::Black));
        }
    }

    #[test]
    fn disc_count_grows_by_exactly_one_per_move() {
        let mut board = Board::new();
        let mut total = 4u32;

        for (p, color) in [
            (pos(2, 3), Color::Black),
            (pos(2, 2), Color::White),
            (pos(3, 2), Color::Black),
        ] {
            board = board.apply_move(p, color).expect("legal move").board;
            let score = board.score();
            let new_total = score.black as u32 + score.white as u32;
            assert_eq!(new_total, total + 1);
            total = new_total;
        }
    }

    #[test]
    fn full_board_is_terminal() {
        let board = Board::from_grid([
            "BBBBWWWW",
            "BBBBWWWW",
            "BBBBWWWW",
            "BBBBWWWW",
            "WWWWBBBB",
            "WWWWBBBB",
            "WWWWBBBB",
            "WWWWBBBB",
        ]);

        assert_eq!(board.empty_count(), 0);
        assert!(board.is_terminal());
    }

    #[test]
    fn board_with_no_moves_for_either_player_is_terminal_despite_empty_cells() {
        // A lone black disc: black has nothing to bracket, white has no discs.
        let board = Board::from_grid([
            "B.......",
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
        ]);

        assert!(board.empty_count() > 0);
        assert!(!board.has_legal_move(Color::Black));
        assert!(!board.has_legal_move(Color::White));
        assert!(board.is_terminal());
    }

    #[test]
    fn initial_board_is_not_terminal() {
        assert!(!Board::new().is_terminal());
    }

    #[test]
    fn to_array_uses_zero_one_two_encoding() {
        let cells = Board::new().to_array();

        assert_eq!(cells[3 * BOARD_SIZE + 3], 2);
        assert_eq!(cells[3 * BOARD_SIZE + 4], 1);
        assert_eq!(cells[4 * BOARD_SIZE + 3], 1);
        assert_eq!(cells[4 * BOARD_SIZE + 4], 2);
        assert_eq!(cells.iter().filter(|&&c| c == 0).count(), 60);
    }

    #[test]
    #[should_panic(expected = "off the board")]
    fn position_constructor_rejects_out_of_range_coordinates() {
        Position::new(8, 0);
    }
}
