//! Dipole game logic: stacks that split, leap, merge and capture.
//!
//! # Board Layout
//!
//! ```text
//! The board is an N×N grid (N = 8 by default) stored row-major.
//! Row 0 is Black's home edge, row N-1 is White's.
//!
//!        0   1   2   3   4   5   6   7
//!   0    .   :   .  B12  .   :   .   :
//!   1    :   .   :   .   :   .   :   .
//!   ...
//!   7    :   .   :   .  W12  .   :   .
//!
//! Dark squares (':') satisfy (row + col) % 2 == 1.
//! ```
//!
//! # Moves
//!
//! A stack of size N may detach any split S in 1..=N. The split leaps exactly
//! S squares along one direction; squares in between are never inspected.
//!
//! ```text
//! Forward set (3 directions toward the opponent's edge):
//!   destination must be dark
//!   empty      -> plain move
//!   friendly   -> merge
//!   enemy <= S -> capture
//!   enemy >  S -> no move
//!
//! Omnidirectional set (all 8 directions):
//!   destination may be any colour of square
//!   enemy <= S -> capture
//! ```
//!
//! A destination that qualifies under both sets yields two identical `Move`
//! records. Both are legal; see [`Board::unique_moves`] for a deduplicated view.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

pub mod bot;
pub mod config;
pub mod error;
pub mod perft;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use bot::{Bot, RandomMover, Strategy};
pub use config::{BotWeights, GameConfig, MAX_DIMENSION};
pub use error::{ConfigError, MoveError};

/// Side identifier.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

/// White advances toward row 0: straight, diagonal-left, diagonal-right.
const WHITE_FORWARD: [(i8, i8); 3] = [(-1, 0), (-1, -1), (-1, 1)];
/// Black advances toward row N-1.
const BLACK_FORWARD: [(i8, i8); 3] = [(1, 0), (1, -1), (1, 1)];
/// Orthogonals first, then diagonals.
const ALL_DIRECTIONS: [(i8, i8); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

impl Color {
    /// Get the opponent color.
    #[inline]
    pub fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// The three forward directions as (row, col) steps.
    #[inline]
    pub fn forward_directions(self) -> &'static [(i8, i8); 3] {
        match self {
            Color::White => &WHITE_FORWARD,
            Color::Black => &BLACK_FORWARD,
        }
    }

    /// Rows gained toward the opponent's edge by travelling `from` -> `to`.
    /// Negative when retreating.
    #[inline]
    pub fn progress(self, from: Pos, to: Pos) -> i32 {
        let (from_row, to_row) = (from.row as i32, to.row as i32);
        match self {
            Color::White => from_row - to_row,
            Color::Black => to_row - from_row,
        }
    }

    /// Single-letter tag used in board diagrams.
    #[inline]
    pub fn letter(self) -> char {
        match self {
            Color::White => 'W',
            Color::Black => 'B',
        }
    }

    pub fn all() -> impl Iterator<Item = Color> {
        [Color::White, Color::Black].into_iter()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => f.write_str("white"),
            Color::Black => f.write_str("black"),
        }
    }
}

/// Cell address on the board.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    #[inline]
    pub const fn new(row: u8, col: u8) -> Pos {
        Pos { row, col }
    }

    /// Dark squares are the only legal non-capturing forward destinations.
    #[inline]
    pub fn is_dark(self) -> bool {
        (self.row as u16 + self.col as u16) % 2 == 1
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// A stack of `size` tokens of one color.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub size: u16,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, size: u16) -> Piece {
        Piece { color, size }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.color.letter(), self.size)
    }
}

/// A proposed action: detach `split` tokens at `from` and leap them to `to`.
///
/// `captures` lists the cells whose occupants are removed when the move is
/// applied. Generated moves carry at most one capture.
#[derive(Clone, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Pos,
    pub to: Pos,
    pub split: u16,
    #[serde(default)]
    pub captures: Vec<Pos>,
}

impl Move {
    /// A non-capturing move (plain leap or merge).
    #[inline]
    pub fn leap(from: Pos, to: Pos, split: u16) -> Move {
        Move { from, to, split, captures: Vec::new() }
    }

    /// A move that captures the occupant of its destination.
    #[inline]
    pub fn capture(from: Pos, to: Pos, split: u16) -> Move {
        Move { from, to, split, captures: vec![to] }
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        !self.captures.is_empty()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{} x{}", self.from, self.to, self.split)?;
        for cell in &self.captures {
            write!(f, " captures {}", cell)?;
        }
        Ok(())
    }
}

// ============================================================================
// BOARD
// ============================================================================

/// Grid of optional stacks. The board exclusively owns every piece on it;
/// `clone()` yields a fully independent copy.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(try_from = "BoardRepr")]
pub struct Board {
    config: GameConfig,
    cells: Vec<Option<Piece>>,
}

/// Unchecked wire form of [`Board`].
#[derive(Deserialize)]
struct BoardRepr {
    config: GameConfig,
    cells: Vec<Option<Piece>>,
}

impl TryFrom<BoardRepr> for Board {
    type Error = ConfigError;

    fn try_from(repr: BoardRepr) -> Result<Self, Self::Error> {
        repr.config.validate()?;
        let n = repr.config.dimension as usize;
        if repr.cells.len() != n * n {
            return Err(ConfigError::CellCount { expected: n * n, found: repr.cells.len() });
        }
        if repr.cells.iter().flatten().any(|piece| piece.size == 0) {
            return Err(ConfigError::EmptyStack);
        }
        Ok(Board { config: repr.config, cells: repr.cells })
    }
}

impl Board {
    /// Standard 8×8 board in the starting layout.
    pub fn new() -> Board {
        let mut board = Board::empty(8);
        board.reset();
        board
    }

    /// Board built from an explicit configuration, in its starting layout.
    pub fn with_config(config: &GameConfig) -> Result<Board, ConfigError> {
        config.validate()?;
        let n = config.dimension as usize;
        let mut board = Board { config: *config, cells: vec![None; n * n] };
        board.reset();
        Ok(board)
    }

    /// Board of the given dimension with no pieces on it. `reset()` restores
    /// the default layout for that dimension.
    ///
    /// `dimension` must be within 2..=[`MAX_DIMENSION`].
    pub fn empty(dimension: u8) -> Board {
        debug_assert!((2..=MAX_DIMENSION).contains(&dimension));
        let n = dimension as usize;
        Board {
            config: GameConfig::for_dimension(dimension),
            cells: vec![None; n * n],
        }
    }

    /// Clear the grid and place the two starting stacks.
    pub fn reset(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = None);
        let GameConfig { white_start, black_start, start_size, .. } = self.config;
        self.place(black_start, Piece::new(Color::Black, start_size));
        self.place(white_start, Piece::new(Color::White, start_size));
    }

    #[inline]
    pub fn dimension(&self) -> u8 {
        self.config.dimension
    }

    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[inline]
    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.row < self.config.dimension && pos.col < self.config.dimension
    }

    #[inline]
    fn index(&self, pos: Pos) -> usize {
        debug_assert!(self.in_bounds(pos), "{} is off a {}x{} board", pos, self.dimension(), self.dimension());
        pos.row as usize * self.config.dimension as usize + pos.col as usize
    }

    /// Iterate over every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Pos> + '_ {
        let n = self.config.dimension;
        (0..n).flat_map(move |row| (0..n).map(move |col| Pos::new(row, col)))
    }

    /// Get the stack at a position, if any.
    #[inline]
    pub fn piece_at(&self, pos: Pos) -> Option<Piece> {
        self.cells[self.index(pos)]
    }

    /// Put a stack on a cell, replacing whatever was there.
    /// Does NOT validate - intended for setting up positions.
    #[inline]
    pub fn place(&mut self, pos: Pos, piece: Piece) {
        debug_assert!(piece.size > 0);
        let idx = self.index(pos);
        self.cells[idx] = Some(piece);
    }

    /// Remove whatever occupies a cell, returning it.
    #[inline]
    pub fn clear(&mut self, pos: Pos) -> Option<Piece> {
        let idx = self.index(pos);
        self.cells[idx].take()
    }

    /// Cells holding stacks of `color`, row-major.
    pub fn positions(&self, color: Color) -> Vec<Pos> {
        self.cells()
            .filter(|&pos| matches!(self.piece_at(pos), Some(p) if p.color == color))
            .collect()
    }

    /// Number of stacks of `color` on the board.
    pub fn piece_count(&self, color: Color) -> usize {
        self.cells.iter().flatten().filter(|p| p.color == color).count()
    }

    /// Sum of stack sizes of `color` on the board.
    pub fn token_count(&self, color: Color) -> u32 {
        self.cells
            .iter()
            .flatten()
            .filter(|p| p.color == color)
            .map(|p| p.size as u32)
            .sum()
    }

    /// Destination of a leap of `distance` squares in direction `dir`,
    /// or None if it falls off the board.
    #[inline]
    fn leap_target(&self, from: Pos, (d_row, d_col): (i8, i8), distance: u16) -> Option<Pos> {
        let n = self.config.dimension as i32;
        let row = from.row as i32 + d_row as i32 * distance as i32;
        let col = from.col as i32 + d_col as i32 * distance as i32;
        if (0..n).contains(&row) && (0..n).contains(&col) {
            Some(Pos::new(row as u8, col as u8))
        } else {
            None
        }
    }

    // ========== Move Generation ==========

    /// Generate every legal move for `color`.
    ///
    /// Order is deterministic: source cells row-major, splits ascending,
    /// forward directions (straight, diagonal-left, diagonal-right), then the
    /// omnidirectional captures (orthogonals, then diagonals).
    ///
    /// A destination reachable both as a forward capture and as an
    /// omnidirectional capture appears twice. Both records are legal.
    pub fn legal_moves(&self, color: Color) -> Vec<Move> {
        let mut moves = Vec::with_capacity(32);
        for from in self.positions(color) {
            if let Some(piece) = self.piece_at(from) {
                for split in 1..=piece.size {
                    self.push_piece_moves(from, piece, split, &mut moves);
                }
            }
        }
        moves
    }

    /// Legal moves for `color` with duplicates removed.
    /// Two moves are the same if they share source, destination and split;
    /// the first generated record is kept.
    pub fn unique_moves(&self, color: Color) -> Vec<Move> {
        let mut seen = HashSet::new();
        self.legal_moves(color)
            .into_iter()
            .filter(|mov| seen.insert((mov.from, mov.to, mov.split)))
            .collect()
    }

    /// Legal moves of whichever stack sits at `from`, over all splits.
    /// Empty if the cell is empty.
    pub fn moves_from(&self, from: Pos) -> Vec<Move> {
        let mut moves = Vec::new();
        if let Some(piece) = self.piece_at(from) {
            for split in 1..=piece.size {
                self.push_piece_moves(from, piece, split, &mut moves);
            }
        }
        moves
    }

    /// Moves obtainable by detaching exactly `split` tokens from the stack
    /// at `from`. Empty if the cell is empty or `split` is outside 1..=size.
    pub fn piece_moves(&self, from: Pos, split: u16) -> Vec<Move> {
        let mut moves = Vec::new();
        if let Some(piece) = self.piece_at(from) {
            if (1..=piece.size).contains(&split) {
                self.push_piece_moves(from, piece, split, &mut moves);
            }
        }
        moves
    }

    fn push_piece_moves(&self, from: Pos, piece: Piece, split: u16, moves: &mut Vec<Move>) {
        for &dir in piece.color.forward_directions() {
            let Some(to) = self.leap_target(from, dir, split) else {
                continue;
            };
            if !to.is_dark() {
                continue;
            }
            match self.piece_at(to) {
                None => moves.push(Move::leap(from, to, split)),
                Some(target) if target.color == piece.color => moves.push(Move::leap(from, to, split)),
                Some(target) if target.size <= split => moves.push(Move::capture(from, to, split)),
                Some(_) => {}
            }
        }

        for &dir in &ALL_DIRECTIONS {
            let Some(to) = self.leap_target(from, dir, split) else {
                continue;
            };
            if let Some(target) = self.piece_at(to) {
                if target.color != piece.color && target.size <= split {
                    moves.push(Move::capture(from, to, split));
                }
            }
        }
    }

    // ========== Apply ==========

    /// Apply a move generated against the current position.
    ///
    /// No legality check is made. A move whose source cell is empty does
    /// nothing. Use [`Board::try_apply`] for moves from untrusted callers.
    pub fn apply(&mut self, mov: &Move) {
        let Some(source) = self.piece_at(mov.from) else {
            return;
        };
        debug_assert!(
            mov.split >= 1 && mov.split <= source.size,
            "split {} out of range for {} at {}",
            mov.split,
            source,
            mov.from
        );
        log::trace!("{} plays {}", source.color, mov);

        let color = source.color;
        let src = self.index(mov.from);
        let remaining = source.size.saturating_sub(mov.split);
        self.cells[src] = (remaining > 0).then(|| Piece::new(color, remaining));

        for &cell in &mov.captures {
            if self.in_bounds(cell) {
                self.clear(cell);
            }
        }

        let dst = self.index(mov.to);
        match &mut self.cells[dst] {
            Some(target) if target.color == color => target.size += mov.split,
            slot => *slot = Some(Piece::new(color, mov.split)),
        }
    }

    /// Apply a move on behalf of `color` after checking it is legal here.
    pub fn try_apply(&mut self, color: Color, mov: &Move) -> Result<(), MoveError> {
        if !self.in_bounds(mov.from) || !self.in_bounds(mov.to) {
            return Err(MoveError::OutOfBounds(mov.clone()));
        }
        let piece = self.piece_at(mov.from).ok_or(MoveError::EmptySource(mov.from))?;
        if piece.color != color {
            return Err(MoveError::WrongColor { pos: mov.from, expected: color });
        }
        if !self.moves_from(mov.from).contains(mov) {
            return Err(MoveError::Illegal(mov.clone()));
        }
        self.apply(mov);
        Ok(())
    }

    // ========== Terminal Detection ==========

    /// True once either side has no stacks left.
    pub fn is_terminal(&self) -> bool {
        self.piece_count(Color::White) == 0 || self.piece_count(Color::Black) == 0
    }

    /// The only side with stacks left, if exactly one has any.
    pub fn winner(&self) -> Option<Color> {
        let white = self.piece_count(Color::White) > 0;
        let black = self.piece_count(Color::Black) > 0;
        match (white, black) {
            (true, false) => Some(Color::White),
            (false, true) => Some(Color::Black),
            _ => None,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.config.dimension;
        write!(f, "   ")?;
        for col in 0..n {
            write!(f, "{:>4}", col)?;
        }
        writeln!(f)?;
        for row in 0..n {
            write!(f, "{:>3}", row)?;
            for col in 0..n {
                let pos = Pos::new(row, col);
                let cell = match self.piece_at(pos) {
                    Some(piece) => format!("{}{}", piece.color.letter(), piece.size),
                    None if pos.is_dark() => ":".to_string(),
                    None => ".".to_string(),
                };
                write!(f, "{:>4}", cell)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
