//! The wasm-bindgen surface consumed by the UI.
//!
//! A [`GameSession`] owns one game and one move selector. Everything here is
//! synchronous; the UI schedules its own "thinking" delay before calling
//! [`GameSession::computer_move`].

use wasm_bindgen::prelude::*;

use crate::ai::HeuristicSelector;
use crate::board::{BOARD_SIZE, Position};
use crate::error::MoveError;
use crate::game::{Game, MoveSelector, Phase};
use crate::types::MoveReport;

#[wasm_bindgen]
pub struct GameSession {
    game: Game,
    selector: Box<dyn MoveSelector>,
}

#[wasm_bindgen]
impl GameSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> GameSession {
        GameSession {
            game: Game::new(),
            selector: Box::new(HeuristicSelector),
        }
    }

    /// Discards the current game and starts a fresh one.
    pub fn reset(&mut self) {
        self.game = Game::new();
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        to_js(&self.game.to_view())
    }

    /// Legal moves for the side to move, row-major.
    pub fn legal_moves(&self) -> Result<JsValue, JsValue> {
        to_js(&self.game.legal_moves())
    }

    /// Plays a human move. An illegal cell yields `accepted: false` with the
    /// unchanged state rather than an exception; the UI keeps prompting.
    pub fn submit_move(&mut self, row: u8, col: u8) -> Result<JsValue, JsValue> {
        if (row as usize) >= BOARD_SIZE || (col as usize) >= BOARD_SIZE {
            return Err(JsValue::from_str("row/col out of range"));
        }

        let pos = Position::new(row, col);
        let report = match self.game.submit_move(pos) {
            Ok(()) => MoveReport {
                accepted: true,
                played: Some(pos),
                state: self.game.to_view(),
            },
            Err(MoveError::IllegalMove(_)) => MoveReport {
                accepted: false,
                played: None,
                state: self.game.to_view(),
            },
            Err(err @ MoveError::GameOver) => return Err(js_error(err)),
        };
        to_js(&report)
    }

    /// Picks and plays a move for the side to move using the built-in
    /// heuristic. Reports `accepted: false` when there is nothing to play.
    pub fn computer_move(&mut self) -> Result<JsValue, JsValue> {
        if self.game.phase() == Phase::GameOver {
            return Err(js_error(MoveError::GameOver));
        }

        let color = self.game.to_move();
        let Some(pos) = self.selector.select_move(self.game.board(), color) else {
            // The controller never leaves the turn with a stuck mover, so this
            // is only reachable through misuse. Report it rather than guess.
            return to_js(&MoveReport {
                accepted: false,
                played: None,
                state: self.game.to_view(),
            });
        };

        // A selector is replaceable code; re-check its pick before playing it.
        if !self.game.board().is_legal(pos, color) {
            return Err(JsValue::from_str("selector returned an illegal move"));
        }

        self.game.submit_move(pos).map_err(js_error)?;
        to_js(&MoveReport {
            accepted: true,
            played: Some(pos),
            state: self.game.to_view(),
        })
    }

    /// Final result once the game is over, `null` while in progress.
    pub fn result(&self) -> Result<JsValue, JsValue> {
        to_js(&self.game.result())
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|err| JsValue::from_str(&err.to_string()))
}

fn js_error(err: MoveError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
