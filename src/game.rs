use crate::board::{Board, Color, Position, Score};
use crate::error::MoveError;
use crate::types::{GameResult, GameStateView, Winner};

/// Whether a game is still being played.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    InProgress,
    GameOver,
}

/// Picks one move for `color`, or `None` when `color` has no legal moves.
pub trait MoveSelector: Send + Sync {
    fn select_move(&self, board: &Board, color: Color) -> Option<Position>;
}

/// Baseline selector: the first legal move in row-major order.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstLegalMoveSelector;

impl MoveSelector for FirstLegalMoveSelector {
    fn select_move(&self, board: &Board, color: Color) -> Option<Position> {
        board.legal_moves(color).into_iter().next()
    }
}

/// The turn state machine: whose turn it is, forced skips, game end.
///
/// A `Game` is an owned value; callers thread it through their own state
/// rather than sharing a process-wide instance. Every accepted move replaces
/// the board wholesale, so a rejected move cannot leave partial state behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    to_move: Color,
    phase: Phase,
    skipped: Option<Color>,
    flipped: Vec<Position>,
}

impl Game {
    /// Fresh game: initial board, black to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            to_move: Color::Black,
            phase: Phase::InProgress,
            skipped: None,
            flipped: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Color {
        self.to_move
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Color that had to forfeit its turn during the last move resolution.
    pub fn skipped(&self) -> Option<Color> {
        self.skipped
    }

    /// Discs flipped by the last accepted move.
    pub fn last_flipped(&self) -> &[Position] {
        &self.flipped
    }

    pub fn score(&self) -> Score {
        self.board.score()
    }

    /// Legal moves for the side to move, row-major.
    pub fn legal_moves(&self) -> Vec<Position> {
        self.board.legal_moves(self.to_move)
    }

    /// Plays `pos` for the side to move, then resolves whose turn is next.
    ///
    /// An illegal position is rejected with [`MoveError::IllegalMove`] and the
    /// game is left untouched; the caller simply re-prompts.
    pub fn submit_move(&mut self, pos: Position) -> Result<(), MoveError> {
        if self.phase == Phase::GameOver {
            return Err(MoveError::GameOver);
        }

        let placement = self.board.apply_move(pos, self.to_move)?;
        self.board = placement.board;
        self.flipped = placement.flipped;
        self.resolve_next_turn();
        Ok(())
    }

    /// After an accepted move: end the game, hand the turn over, or skip the
    /// opponent and let the same color move again.
    fn resolve_next_turn(&mut self) {
        if self.board.is_terminal() {
            self.phase = Phase::GameOver;
            self.skipped = None;
            return;
        }

        let next = !self.to_move;
        if self.board.has_legal_move(next) {
            self.to_move = next;
            self.skipped = None;
        } else if self.board.has_legal_move(self.to_move) {
            // Opponent is stuck but the mover can continue: forced skip.
            self.skipped = Some(next);
        } else {
            // Neither side can move. `is_terminal` already covers this, but a
            // wrong answer from it must still land in GameOver, not a stuck turn.
            self.phase = Phase::GameOver;
            self.skipped = None;
        }
    }

    /// The winner once the game is over; `None` while in progress.
    pub fn winner(&self) -> Option<Winner> {
        match self.phase {
            Phase::InProgress => None,
            Phase::GameOver => Some(winner_for(self.score())),
        }
    }

    pub fn to_view(&self) -> GameStateView {
        GameStateView {
            board: self.board.to_array().to_vec(),
            to_move: self.to_move,
            score: self.score(),
            game_over: self.phase == Phase::GameOver,
            skipped: self.skipped,
            flipped: self.flipped.clone(),
            legal_moves: self.legal_moves(),
        }
    }

    /// Final result once the game is over; `None` while in progress.
    pub fn result(&self) -> Option<GameResult> {
        let winner = self.winner()?;
        let score = self.score();
        Some(GameResult {
            winner,
            black: score.black,
            white: score.white,
        })
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board, to_move: Color) {
        self.board = board;
        self.to_move = to_move;
        self.phase = Phase::InProgress;
        self.skipped = None;
        self.flipped.clear();
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

fn winner_for(score: Score) -> Winner {
    match score.black.cmp(&score.white) {
        std::cmp::Ordering::Greater => Winner::Black,
        std::cmp::Ordering::Less => Winner::White,
        std::cmp::Ordering::Equal => Winner::Tie,
    }
}
