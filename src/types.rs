use serde::Serialize;

use crate::board::{Color, Position, Score};

/// Outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Black,
    White,
    Tie,
}

/// Snapshot of a game as the UI renders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStateView {
    /// Row-major cells: 0=empty, 1=black, 2=white.
    pub board: Vec<u8>,
    pub to_move: Color,
    pub score: Score,
    pub game_over: bool,
    /// Color whose turn was forfeited by the last move resolution, if any.
    /// Purely a notification aid; rule evaluation never reads it.
    pub skipped: Option<Color>,
    /// Contract:
    /// - Normal move: positions flipped by the last accepted move.
    /// - Before the first move: an empty list.
    pub flipped: Vec<Position>,
    /// Legal moves for the side to move, row-major.
    pub legal_moves: Vec<Position>,
}

/// Response to a submitted move: whether it was accepted, what was played,
/// and the resulting state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveReport {
    pub accepted: bool,
    /// The position that was played; `None` when the move was rejected.
    pub played: Option<Position>,
    pub state: GameStateView,
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    pub winner: Winner,
    pub black: u8,
    pub white: u8,
}
