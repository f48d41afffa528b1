//! Move-selection policies.
//!
//! [`Bot`] is the one-ply greedy opponent: every legal move is scored with
//! a linear heuristic and one of the best-scoring moves is picked at random.
//! [`RandomMover`] picks uniformly among all legal moves.
//!
//! Both take their random source as a type parameter so games can be
//! replayed exactly from a seed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{Board, BotWeights, Color, Move};

/// A policy that picks a move for one side.
pub trait Strategy {
    /// The side this policy plays.
    fn color(&self) -> Color;

    /// Pick a move, or None if the side has no legal move.
    fn choose_move(&mut self, board: &Board) -> Option<Move>;

    /// Short label for reports.
    fn name(&self) -> &'static str;
}

/// Heuristic value of `mov` for `color`.
///
/// The size and forward terms only count when a stack sits at the source.
pub fn score_move(color: Color, weights: &BotWeights, board: &Board, mov: &Move) -> i32 {
    let mut score = weights.capture * mov.captures.len() as i32;
    if board.piece_at(mov.from).is_some() {
        score += weights.size * mov.split as i32;
        score += weights.forward * color.progress(mov.from, mov.to);
    }
    score
}

/// Greedy one-ply opponent.
#[derive(Clone, Debug)]
pub struct Bot<R = StdRng> {
    color: Color,
    weights: BotWeights,
    rng: R,
}

impl Bot<StdRng> {
    /// Bot with reference weights and a reproducible random source.
    pub fn seeded(color: Color, seed: u64) -> Self {
        Bot::new(color, BotWeights::default(), StdRng::seed_from_u64(seed))
    }

    /// Bot with reference weights seeded from the operating system.
    pub fn from_os_rng(color: Color) -> Self {
        Bot::new(color, BotWeights::default(), StdRng::from_os_rng())
    }
}

impl<R: Rng> Bot<R> {
    pub fn new(color: Color, weights: BotWeights, rng: R) -> Self {
        Bot { color, weights, rng }
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn weights(&self) -> &BotWeights {
        &self.weights
    }

    /// Heuristic value of a candidate move for this bot.
    #[inline]
    pub fn score(&self, board: &Board, mov: &Move) -> i32 {
        score_move(self.color, &self.weights, board, mov)
    }

    /// All legal moves sharing the maximum score, in generation order.
    pub fn best_moves(&self, board: &Board) -> Vec<Move> {
        let moves = board.legal_moves(self.color);
        let scores: Vec<i32> = moves.iter().map(|mov| self.score(board, mov)).collect();
        keep_best(moves, &scores).1
    }

    /// Pick one of the best-scoring legal moves uniformly at random.
    /// Returns None when the bot's side cannot move.
    pub fn choose_move(&mut self, board: &Board) -> Option<Move> {
        let moves = board.legal_moves(self.color);
        let scores: Vec<i32> = moves.iter().map(|mov| self.score(board, mov)).collect();
        self.pick(moves, &scores)
    }

    /// Same selection as [`Bot::choose_move`], with scoring spread over the
    /// rayon pool. Each worker scores against its own clone of the board.
    #[cfg(feature = "parallel")]
    pub fn choose_move_par(&mut self, board: &Board) -> Option<Move> {
        use rayon::prelude::*;

        let moves = board.legal_moves(self.color);
        let (color, weights) = (self.color, self.weights);
        let scores: Vec<i32> = moves
            .par_iter()
            .map_init(|| board.clone(), |local, mov| score_move(color, &weights, local, mov))
            .collect();
        self.pick(moves, &scores)
    }

    fn pick(&mut self, moves: Vec<Move>, scores: &[i32]) -> Option<Move> {
        let total = moves.len();
        let (best_score, mut best) = keep_best(moves, scores);
        if best.is_empty() {
            log::debug!("{} bot has no legal move", self.color);
            return None;
        }
        let chosen = best.swap_remove(self.rng.random_range(0..best.len()));
        log::debug!(
            "{} bot plays {} (score {}, {} tied of {})",
            self.color,
            chosen,
            best_score,
            best.len() + 1,
            total
        );
        Some(chosen)
    }
}

/// Filter `moves` down to those with the maximum score.
fn keep_best(moves: Vec<Move>, scores: &[i32]) -> (i32, Vec<Move>) {
    let Some(&max) = scores.iter().max() else {
        return (0, Vec::new());
    };
    let best = moves
        .into_iter()
        .zip(scores)
        .filter(|(_, &score)| score == max)
        .map(|(mov, _)| mov)
        .collect();
    (max, best)
}

impl<R: Rng> Strategy for Bot<R> {
    fn color(&self) -> Color {
        self.color
    }

    fn choose_move(&mut self, board: &Board) -> Option<Move> {
        Bot::<R>::choose_move(self, board)
    }

    fn name(&self) -> &'static str {
        "greedy"
    }
}

/// Baseline opponent: any legal move, uniformly.
#[derive(Clone, Debug)]
pub struct RandomMover<R = StdRng> {
    color: Color,
    rng: R,
}

impl RandomMover<StdRng> {
    pub fn seeded(color: Color, seed: u64) -> Self {
        RandomMover::new(color, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomMover<R> {
    pub fn new(color: Color, rng: R) -> Self {
        RandomMover { color, rng }
    }
}

impl<R: Rng> Strategy for RandomMover<R> {
    fn color(&self) -> Color {
        self.color
    }

    fn choose_move(&mut self, board: &Board) -> Option<Move> {
        let mut moves = board.legal_moves(self.color);
        if moves.is_empty() {
            return None;
        }
        let idx = self.rng.random_range(0..moves.len());
        Some(moves.swap_remove(idx))
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Piece, Pos};

    fn p(row: u8, col: u8) -> Pos {
        Pos::new(row, col)
    }

    #[test]
    fn test_score_reference_weights() {
        let board = Board::new();
        let bot = Bot::seeded(Color::White, 0);
        // 6 tokens, 6 rows forward.
        assert_eq!(bot.score(&board, &Move::leap(p(7, 4), p(1, 4), 6)), 12);
        // 4 tokens, 4 rows forward.
        assert_eq!(bot.score(&board, &Move::leap(p(7, 4), p(3, 0), 4)), 8);
    }

    #[test]
    fn test_score_counts_captures() {
        let mut board = Board::empty(8);
        board.place(p(2, 2), Piece::new(Color::White, 5));
        board.place(p(5, 5), Piece::new(Color::Black, 3));
        let bot = Bot::seeded(Color::White, 0);
        // 10 for the capture, 3 tokens, 3 rows backward.
        assert_eq!(bot.score(&board, &Move::capture(p(2, 2), p(5, 5), 3)), 10);
    }

    #[test]
    fn test_score_black_progress() {
        let board = Board::new();
        let bot = Bot::seeded(Color::Black, 0);
        assert_eq!(bot.score(&board, &Move::leap(p(0, 3), p(4, 7), 4)), 8);
    }

    #[test]
    fn test_score_without_source_stack() {
        let board = Board::empty(8);
        let bot = Bot::seeded(Color::White, 0);
        assert_eq!(bot.score(&board, &Move::capture(p(4, 4), p(3, 3), 1)), 10);
        assert_eq!(bot.score(&board, &Move::leap(p(4, 4), p(3, 3), 1)), 0);
    }

    #[test]
    fn test_custom_weights() {
        let board = Board::new();
        let weights = BotWeights { capture: 0, size: 0, forward: 5 };
        let bot = Bot::new(Color::White, weights, StdRng::seed_from_u64(1));
        assert_eq!(bot.score(&board, &Move::leap(p(7, 4), p(5, 2), 2)), 10);
    }

    #[test]
    fn test_opening_best_move() {
        let board = Board::new();
        let bot = Bot::seeded(Color::White, 0);
        assert_eq!(bot.best_moves(&board), vec![Move::leap(p(7, 4), p(1, 4), 6)]);
    }

    #[test]
    fn test_bot_prefers_capture() {
        let mut board = Board::empty(8);
        board.place(p(4, 3), Piece::new(Color::White, 2));
        board.place(p(3, 2), Piece::new(Color::Black, 1));
        let mut bot = Bot::seeded(Color::White, 7);
        let mov = bot.choose_move(&board).unwrap();
        assert_eq!(mov.captures, vec![p(3, 2)]);
    }

    #[test]
    fn test_bot_without_pieces_returns_none() {
        let mut board = Board::empty(8);
        board.place(p(0, 3), Piece::new(Color::Black, 4));
        let mut bot = Bot::seeded(Color::White, 3);
        assert_eq!(bot.choose_move(&board), None);
        assert!(bot.best_moves(&board).is_empty());
    }

    #[test]
    fn test_bot_is_reproducible() {
        let mut board = Board::empty(8);
        board.place(p(4, 3), Piece::new(Color::White, 1));
        let first = Bot::seeded(Color::White, 42).choose_move(&board);
        let second = Bot::seeded(Color::White, 42).choose_move(&board);
        assert_eq!(first, second);
    }

    #[test]
    fn test_tie_break_reaches_every_best_move() {
        let mut board = Board::empty(8);
        board.place(p(4, 3), Piece::new(Color::White, 1));
        board.place(p(0, 7), Piece::new(Color::Black, 1));
        let left = Move::leap(p(4, 3), p(3, 2), 1);
        let right = Move::leap(p(4, 3), p(3, 4), 1);
        assert_eq!(Bot::seeded(Color::White, 0).best_moves(&board), vec![left.clone(), right.clone()]);

        let (mut lefts, mut rights) = (0, 0);
        for seed in 0..200 {
            match Bot::seeded(Color::White, seed).choose_move(&board) {
                Some(mov) if mov == left => lefts += 1,
                Some(mov) if mov == right => rights += 1,
                other => panic!("unexpected choice {:?}", other),
            }
        }
        assert!(lefts > 0 && rights > 0, "left={} right={}", lefts, rights);
    }

    #[test]
    fn test_strategy_trait_object() {
        let board = Board::new();
        let mut players: Vec<Box<dyn Strategy>> = vec![
            Box::new(Bot::seeded(Color::White, 1)),
            Box::new(RandomMover::seeded(Color::Black, 1)),
        ];
        for player in players.iter_mut() {
            let mov = player.choose_move(&board).unwrap();
            assert_eq!(board.piece_at(mov.from).map(|piece| piece.color), Some(player.color()));
        }
        assert_eq!(players[0].name(), "greedy");
        assert_eq!(players[1].name(), "random");
    }

    #[test]
    fn test_random_mover_stays_legal() {
        let board = Board::new();
        let legal = board.legal_moves(Color::Black);
        let mut mover = RandomMover::seeded(Color::Black, 9);
        for _ in 0..50 {
            let mov = mover.choose_move(&board).unwrap();
            assert!(legal.contains(&mov));
        }
        assert_eq!(RandomMover::seeded(Color::White, 0).choose_move(&Board::empty(4)), None);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let mut board = Board::new();
        board.apply(&Move::leap(p(7, 4), p(4, 1), 3));
        board.apply(&Move::leap(p(0, 3), p(3, 0), 3));
        for seed in 0..20 {
            let seq = Bot::seeded(Color::White, seed).choose_move(&board);
            let par = Bot::seeded(Color::White, seed).choose_move_par(&board);
            assert_eq!(seq, par);
        }
    }
}
