//! WASM bindings for dipole-core
//!
//! Provides a JavaScript-friendly API for the game logic. The wrapper tracks
//! whose turn it is; a side without legal moves passes.

use wasm_bindgen::prelude::*;
use crate::{Board, Bot, Color, Move, Piece, Pos};

/// WASM-friendly wrapper around Board
#[wasm_bindgen]
pub struct WasmBoard {
    inner: Board,
    to_move: Color,
}

#[wasm_bindgen]
impl WasmBoard {
    /// Create a standard board in the starting layout, White to move
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmBoard {
        WasmBoard { inner: Board::new(), to_move: Color::White }
    }

    /// Restore the starting layout, White to move
    pub fn reset(&mut self) {
        self.inner.reset();
        self.to_move = Color::White;
    }

    /// Board edge length
    pub fn dimension(&self) -> u8 {
        self.inner.dimension()
    }

    /// Side to move: "white" or "black"
    #[wasm_bindgen(js_name = sideToMove)]
    pub fn side_to_move(&self) -> String {
        self.to_move.to_string()
    }

    /// Stack at a cell as { color, size }, or null
    #[wasm_bindgen(js_name = pieceAt)]
    pub fn piece_at(&self, row: u8, col: u8) -> Result<JsValue, JsValue> {
        match self.stack_at(row, col) {
            Some(piece) => Ok(serde_wasm_bindgen::to_value(&piece)?),
            None => Ok(JsValue::NULL),
        }
    }

    /// Legal moves of the side to move as a JSON array
    /// Each move is { from: {row, col}, to: {row, col}, split, captures: [{row, col}] }
    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> Result<JsValue, JsValue> {
        let moves = self.inner.unique_moves(self.to_move);
        Ok(serde_wasm_bindgen::to_value(&moves)?)
    }

    /// Legal moves of the stack at a cell, if it belongs to the side to move
    #[wasm_bindgen(js_name = movesFrom)]
    pub fn moves_from(&self, row: u8, col: u8) -> Result<JsValue, JsValue> {
        let pos = Pos::new(row, col);
        let owned = self.inner.in_bounds(pos)
            && self.inner.piece_at(pos).map(|p| p.color) == Some(self.to_move);
        let moves: Vec<Move> = if owned { self.inner.moves_from(pos) } else { vec![] };
        Ok(serde_wasm_bindgen::to_value(&moves)?)
    }

    /// Apply a move for the side to move. Returns true if it was legal.
    /// A capture is implied when the destination holds an enemy stack.
    #[wasm_bindgen(js_name = applyMove)]
    pub fn apply_move(&mut self, from_row: u8, from_col: u8, to_row: u8, to_col: u8, split: u16) -> bool {
        let from = Pos::new(from_row, from_col);
        let to = Pos::new(to_row, to_col);
        if !self.inner.in_bounds(from) {
            return false;
        }
        let Some(mov) = self
            .inner
            .moves_from(from)
            .into_iter()
            .find(|m| m.to == to && m.split == split)
        else {
            return false;
        };
        if self.inner.try_apply(self.to_move, &mov).is_err() {
            return false;
        }
        self.pass_turn();
        true
    }

    /// Let the greedy bot play for the side to move.
    /// Returns the move played, or null if the side had to pass.
    #[wasm_bindgen(js_name = botMove)]
    pub fn bot_move(&mut self, seed: u64) -> Result<JsValue, JsValue> {
        let mut bot = Bot::seeded(self.to_move, seed);
        let played = bot.choose_move(&self.inner);
        if let Some(mov) = &played {
            self.inner.apply(mov);
        }
        self.pass_turn();
        Ok(serde_wasm_bindgen::to_value(&played)?)
    }

    /// Check if one side has been eliminated
    #[wasm_bindgen(js_name = isTerminal)]
    pub fn is_terminal(&self) -> bool {
        self.inner.is_terminal()
    }

    /// Get game result: "white", "black", or "none"
    pub fn winner(&self) -> String {
        match self.inner.winner() {
            Some(color) => color.to_string(),
            None => "none".to_string(),
        }
    }

    /// ASCII diagram of the board
    pub fn render(&self) -> String {
        self.inner.to_string()
    }

    /// Clone the board
    #[wasm_bindgen(js_name = clone)]
    pub fn clone_board(&self) -> WasmBoard {
        WasmBoard { inner: self.inner.clone(), to_move: self.to_move }
    }
}

impl WasmBoard {
    /// Stack at a cell; None for empty or off-board cells.
    fn stack_at(&self, row: u8, col: u8) -> Option<Piece> {
        let pos = Pos::new(row, col);
        if self.inner.in_bounds(pos) {
            self.inner.piece_at(pos)
        } else {
            None
        }
    }

    /// Hand the turn to the opponent.
    fn pass_turn(&mut self) {
        self.to_move = self.to_move.opponent();
    }
}

impl Default for WasmBoard {
    fn default() -> Self {
        Self::new()
    }
}
