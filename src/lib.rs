//! Othello rules engine with a one-ply heuristic computer opponent.
//!
//! ## Modules
//!
//! - [`board`] — immutable board rules: legality, flipping, scoring, termination
//! - [`game`] — the turn state machine and the [`game::MoveSelector`] seam
//! - [`ai`] — the greedy positional-heuristic selector
//! - [`history`] — checksummed codec for completed-game records
//! - [`types`] — serializable views handed to the UI
//! - [`api`] — the wasm-bindgen session facade
//!
//! Every core operation is a pure function over owned values: applying a move
//! returns a fresh [`board::Board`] and never mutates its input, so
//! speculative evaluation and rendering can hold old boards safely.

use wasm_bindgen::prelude::*;

pub mod ai;
pub mod api;
pub mod board;
pub mod error;
pub mod game;
pub mod history;
pub mod types;

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
