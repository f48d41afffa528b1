//! Move-tree counting for verifying move generation.
//!
//! `perft` counts the leaf nodes of the legal-move tree to a fixed depth,
//! with the sides alternating from the given color. Duplicate move records
//! count as separate edges, exactly as `legal_moves` returns them.
//!
//! A node where the game is over (one side eliminated) or where the side to
//! move has no legal move counts as a single leaf.
//!
//! ```rust
//! use dipole_core::{Board, Color};
//!
//! let board = Board::new();
//! assert_eq!(board.perft(Color::White, 1), 10);
//! ```

use crate::{Board, Color, Move};

impl Board {
    /// Count leaf nodes of the move tree `depth` plies deep.
    #[must_use]
    pub fn perft(&self, color: Color, depth: u32) -> u64 {
        if depth == 0 {
            return 1;
        }
        if self.is_terminal() {
            return 1;
        }
        let moves = self.legal_moves(color);
        if moves.is_empty() {
            return 1;
        }
        // Bulk count at the frontier.
        if depth == 1 {
            return moves.len() as u64;
        }
        let mut nodes = 0;
        for mov in &moves {
            let mut child = self.clone();
            child.apply(mov);
            nodes += child.perft(color.opponent(), depth - 1);
        }
        nodes
    }

    /// Per-move breakdown of [`Board::perft`] at the root.
    pub fn perft_divide(&self, color: Color, depth: u32) -> Vec<(Move, u64)> {
        if depth == 0 || self.is_terminal() {
            return Vec::new();
        }
        self.legal_moves(color)
            .into_iter()
            .map(|mov| {
                let mut child = self.clone();
                child.apply(&mov);
                let nodes = child.perft(color.opponent(), depth - 1);
                (mov, nodes)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Piece, Pos};

    #[test]
    fn test_perft_depth_zero() {
        assert_eq!(Board::new().perft(Color::White, 0), 1);
    }

    #[test]
    fn test_perft_opening() {
        let board = Board::new();
        assert_eq!(board.perft(Color::White, 1), 10);
        assert_eq!(board.perft(Color::Black, 1), 10);
    }

    #[test]
    fn test_perft_terminal_is_leaf() {
        let mut board = Board::empty(8);
        board.place(Pos::new(4, 3), Piece::new(Color::White, 3));
        assert_eq!(board.perft(Color::White, 3), 1);
    }

    #[test]
    fn test_perft_stuck_side_is_leaf() {
        let mut board = Board::empty(8);
        // White on its goal row cannot leap forward and has nothing to capture.
        board.place(Pos::new(0, 1), Piece::new(Color::White, 1));
        board.place(Pos::new(7, 0), Piece::new(Color::Black, 1));
        assert!(board.legal_moves(Color::White).is_empty());
        assert_eq!(board.perft(Color::White, 2), 1);
    }

    #[test]
    fn test_divide_sums_to_perft() {
        let board = Board::new();
        let divide = board.perft_divide(Color::White, 2);
        assert_eq!(divide.len(), 10);
        let total: u64 = divide.iter().map(|(_, nodes)| nodes).sum();
        assert_eq!(total, board.perft(Color::White, 2));
    }
}
